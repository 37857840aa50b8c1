//! JSON API over the SIX academic portal's class schedules.

pub mod config;
pub mod logging;
pub mod server;
pub mod six;
pub mod types;
