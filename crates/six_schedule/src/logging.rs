use tracing_subscriber::EnvFilter;

use crate::config::AppConfig;

/// Configure and initialize logging for the application.
///
/// `RUST_LOG` takes precedence; otherwise this crate logs at the configured
/// level and dependencies at `warn`.
pub fn setup_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("warn,six_schedule={}", config.log_level))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
