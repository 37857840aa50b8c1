//! HTTP client for SIX.
//!
//! Every request replays the caller's session cookies. Two flows are built on
//! top of the single-page fetch:
//! 1. Identity: read the student ID off `/home`, then follow the `/kelas`
//!    redirect to learn the current semester
//! 2. Schedule: serve from cache, or fetch and parse the schedule table

use super::cache::ScheduleCache;
use super::error::SixError;
use super::schedule::extract_classes;
use super::session::{build_request, SessionSource, SessionTokens};
use super::types::{CourseClass, ScheduleQuery, UserIdentity};
use chrono::{DateTime, Utc};
use regex::Regex;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use scraper::{Html, Selector};
use std::sync::{Arc, LazyLock};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Base URL for SIX.
pub const SIX_BASE_URL: &str = "https://six.itb.ac.id";

static PROFILE_LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href*='mahasiswa:']").unwrap());
static STUDENT_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"mahasiswa:(\d+)").unwrap());
static SEMESTER_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\+(\d{4}-\d)").unwrap());

/// Configuration for the SIX client.
#[derive(Debug, Clone)]
pub struct SixConfig {
    /// Scheme and host of the portal, without a trailing slash
    pub base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SixConfig {
    fn default() -> Self {
        Self {
            base_url: SIX_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// A schedule along with where it came from.
#[derive(Debug, Clone)]
pub struct ScheduleResult {
    pub classes: Vec<CourseClass>,
    pub fetched_at: DateTime<Utc>,
    /// True if served from cache without contacting SIX
    pub cached: bool,
}

/// Client for scraping SIX on behalf of a logged-in student.
pub struct SixClient {
    client: Client,
    config: SixConfig,
    cache: Arc<ScheduleCache>,
}

impl SixClient {
    /// Creates a new client with default configuration.
    pub fn new(cache: Arc<ScheduleCache>) -> Result<Self, SixError> {
        Self::with_config(SixConfig::default(), cache)
    }

    /// Creates a new client with custom configuration.
    pub fn with_config(config: SixConfig, cache: Arc<ScheduleCache>) -> Result<Self, SixError> {
        // No cookie store: cookies belong to the caller, never to this process
        let client = Client::builder()
            .redirect(Policy::limited(10))
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SixError::Transport {
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            config: SixConfig {
                base_url: config.base_url.trim_end_matches('/').to_string(),
                ..config
            },
            cache,
        })
    }

    /// Returns the shared schedule cache.
    pub fn cache(&self) -> &Arc<ScheduleCache> {
        &self.cache
    }

    /// Returns the upstream URL for a schedule lookup; also its cache key.
    pub fn schedule_url(&self, query: &ScheduleQuery) -> String {
        schedule_url(&self.config.base_url, query)
    }

    /// Fetches a page with the caller's cookies and parses it.
    ///
    /// One request, one outcome: no retries and no caching here.
    pub async fn fetch_document(
        &self,
        target_url: &str,
        source: &impl SessionSource,
    ) -> Result<Html, SixError> {
        let request = build_request(&self.client, target_url, source)?;

        let start = Instant::now();
        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    url = %target_url,
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "SIX fetch failed"
                );
                return Err(e.into());
            }
        };

        let status = response.status();
        info!(
            url = %target_url,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Fetched SIX page"
        );

        if status != StatusCode::OK {
            return Err(SixError::UpstreamStatus { status });
        }

        let parse_start = Instant::now();
        let body = response.text().await.map_err(|e| SixError::Parse {
            message: e.to_string(),
        })?;
        let document = Html::parse_document(&body);
        debug!(
            url = %target_url,
            duration_ms = parse_start.elapsed().as_millis() as u64,
            "Parsed SIX page"
        );

        Ok(document)
    }

    /// Works out who the cookies belong to and which semester is current.
    pub async fn resolve_identity(
        &self,
        source: &impl SessionSource,
    ) -> Result<UserIdentity, SixError> {
        let tokens = SessionTokens::collect(source)?;

        let home_url = format!("{}/home", self.config.base_url);
        let student_id = {
            let document = self.fetch_document(&home_url, &tokens).await?;
            find_student_id(&document)
        };
        let Some(student_id) = student_id else {
            return Err(SixError::NotFound {
                message: "Could not find student ID on /home".to_string(),
            });
        };

        // SIX redirects /kelas to the current semester's page
        let kelas_url = format!("{}/app/mahasiswa:{}/kelas", self.config.base_url, student_id);
        let request = build_request(&self.client, &kelas_url, &tokens)?;
        let start = Instant::now();
        let response = self.client.execute(request).await?;
        let final_url = response.url().to_string();
        drop(response);

        info!(
            url = %kelas_url,
            final_url = %final_url,
            duration_ms = start.elapsed().as_millis() as u64,
            "Followed semester redirect"
        );

        let semester = find_semester(&final_url).ok_or_else(|| SixError::NotFound {
            message: format!("Could not infer semester from redirect URL: {}", final_url),
        })?;

        Ok(UserIdentity {
            student_id,
            semester,
        })
    }

    /// Returns a student's class schedule, from cache when possible.
    ///
    /// # Arguments
    /// * `query` - Student, semester and optional filters
    /// * `source` - Where to read the caller's session cookies from
    /// * `force_refresh` - If true, skip the cache read (the result is still cached)
    pub async fn get_schedule(
        &self,
        query: &ScheduleQuery,
        source: &impl SessionSource,
        force_refresh: bool,
    ) -> Result<ScheduleResult, SixError> {
        let tokens = SessionTokens::collect(source)?;
        let url = self.schedule_url(query);

        if !force_refresh {
            if let Some(entry) = self.cache.get(&url) {
                info!(
                    student_id = %query.student_id,
                    semester = %query.semester,
                    "Schedule cache hit"
                );
                return Ok(ScheduleResult {
                    classes: entry.data,
                    fetched_at: entry.fetched_at,
                    cached: true,
                });
            }
        }

        info!(
            student_id = %query.student_id,
            semester = %query.semester,
            refresh = force_refresh,
            "Schedule cache miss"
        );

        let classes = {
            let document = self.fetch_document(&url, &tokens).await?;
            extract_classes(&document)
        };
        let fetched_at = Utc::now();

        info!(
            classes = classes.len(),
            student_id = %query.student_id,
            semester = %query.semester,
            "Parsed schedule"
        );

        self.cache.set(url, classes.clone(), fetched_at);

        Ok(ScheduleResult {
            classes,
            fetched_at,
            cached: false,
        })
    }
}

/// Builds `<base>/app/mahasiswa:<id>+<semester>/kelas/jadwal/kuliah[?filters]`.
pub fn schedule_url(base_url: &str, query: &ScheduleQuery) -> String {
    let mut url = format!(
        "{}/app/mahasiswa:{}+{}/kelas/jadwal/kuliah",
        base_url, query.student_id, query.semester
    );

    let filters = query.filters();
    if !filters.is_empty() {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(filters)
            .finish();
        url.push('?');
        url.push_str(&encoded);
    }

    url
}

/// Finds the student ID in the first profile link of a page.
pub fn find_student_id(document: &Html) -> Option<String> {
    document
        .select(&PROFILE_LINK_SELECTOR)
        .filter_map(|link| link.value().attr("href"))
        .find_map(|href| {
            STUDENT_ID_REGEX
                .captures(href)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
}

/// Extracts the `YYYY-N` semester code from a SIX URL.
pub fn find_semester(url: &str) -> Option<String> {
    SEMESTER_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
