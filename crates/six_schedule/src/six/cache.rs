//! TTL-based caching for parsed schedules.

use super::types::CourseClass;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::time::{Duration, Instant};

/// How long a fetched schedule is served before SIX is asked again.
pub const SCHEDULE_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// A cached schedule with its freshness window.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The parsed classes
    pub data: Vec<CourseClass>,
    /// When the data was fetched from SIX
    pub fetched_at: DateTime<Utc>,
    /// When this entry stops being served
    pub expires_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Thread-safe schedule cache keyed by the full upstream URL.
///
/// Uses DashMap for concurrent access without external locking. Expired
/// entries stay in the map until the same key is set again; readers just skip
/// them.
pub struct ScheduleCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
}

impl ScheduleCache {
    /// Creates a new cache with the specified TTL.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    /// Creates a cache with the 5-minute schedule TTL.
    pub fn with_default_ttl() -> Self {
        Self::new(SCHEDULE_CACHE_TTL)
    }

    /// Gets an entry if it exists and hasn't expired.
    pub fn get(&self, key: &str) -> Option<CacheEntry> {
        let now = Instant::now();
        self.entries
            .get(key)
            .filter(|entry| entry.is_fresh(now))
            .map(|entry| entry.value().clone())
    }

    /// Inserts or replaces the entry for `key`.
    ///
    /// The freshness window starts now, not at `fetched_at`.
    pub fn set(&self, key: impl Into<String>, data: Vec<CourseClass>, fetched_at: DateTime<Utc>) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                data,
                fetched_at,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Returns the number of entries in the cache (including expired ones).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ScheduleCache {
    fn default() -> Self {
        Self::with_default_ttl()
    }
}
