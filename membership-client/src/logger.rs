//! Logging setup
//!
//! `RUST_LOG` wins over the level passed in; the default is `info`.

use tracing_subscriber::EnvFilter;

/// Initialize the logger with the default level
pub fn init_logger() {
    init_logger_with_level(None);
}

/// Initialize the logger, ignoring the call if a subscriber is already set
pub fn init_logger_with_level(log_level: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.unwrap_or("info")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init_logger_with_level(Some("debug"));
        init_logger();
        tracing::debug!("logger installed");
    }
}
