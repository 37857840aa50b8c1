use std::sync::Arc;

use crate::config::AppConfig;
use crate::six::{ScheduleCache, SixClient, SixConfig, SixError};

/// State shared by every request handler.
pub struct AppState {
    /// Client for SIX; owns the schedule cache for the life of the process
    pub six: SixClient,
}

impl AppState {
    /// Builds the state, including a fresh, empty schedule cache.
    pub fn new(config: &AppConfig) -> Result<Self, SixError> {
        let six_config = SixConfig {
            base_url: config.six_base_url.clone(),
            ..SixConfig::default()
        };
        Self::with_cache(six_config, Arc::new(ScheduleCache::with_default_ttl()))
    }

    /// Builds the state around an existing cache.
    pub fn with_cache(six_config: SixConfig, cache: Arc<ScheduleCache>) -> Result<Self, SixError> {
        Ok(Self {
            six: SixClient::with_config(six_config, cache)?,
        })
    }
}
