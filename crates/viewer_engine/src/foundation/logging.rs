//! Logger setup for viewer binaries

use crate::core::LoggingConfig;

/// Install `env_logger` with the configured level as default filter
pub fn init(config: &LoggingConfig) {
    init_with_level(&config.level);
}

/// Install `env_logger` with `default_filter` unless `RUST_LOG` is set
///
/// Only the first call installs a logger; later calls are ignored.
pub fn init_with_level(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("Logger already installed, ignoring '{}'", default_filter);
    }
}
