//! Scraping pipeline for SIX, the ITB academic portal.
//!
//! SIX has no API, so everything here works off the same HTML pages a student
//! sees in the browser, authenticated with cookies the student already holds.

mod cache;
mod client;
mod error;
mod schedule;
mod session;
mod text;
mod types;

pub use cache::{CacheEntry, ScheduleCache, SCHEDULE_CACHE_TTL};
pub use client::{
    find_semester, find_student_id, schedule_url, ScheduleResult, SixClient, SixConfig,
    SIX_BASE_URL,
};
pub use error::SixError;
pub use schedule::{extract_classes, parse_lecturers, parse_slots};
pub use session::{
    build_request, SessionSource, SessionTokens, REQUIRED_SESSION_TOKENS, SIX_USER_AGENT,
};
pub use text::normalize;
pub use types::*;
