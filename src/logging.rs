//! Logger initialisation.

use crate::config::LoggingConfig;

/// Installs `env_logger` as the `log` backend.
///
/// `RUST_LOG` wins over the configured filter. Safe to call more than once;
/// later calls leave the first logger in place.
pub fn init(config: &LoggingConfig) {
    let env = env_logger::Env::default().default_filter_or(config.filter.as_str());
    if env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .try_init()
        .is_err()
    {
        log::debug!("[SHELL] logger already initialised");
    }
}
