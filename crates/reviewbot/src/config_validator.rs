//! Validation utilities.

use std::fmt::Write;

use reviewbot_config::{Config, DatabaseDriver, LockDriver};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Errors on environment variables:\n{}", errors)]
    EnvVarsError { errors: String },
}

fn validate_env_vars(config: &Config) -> Result<(), ValidationError> {
    #[inline]
    fn _missing(error: &mut String, name: &str) {
        error.push('\n');
        let _ = write!(error, "  - Missing env. var.: {}", name);
    }

    #[inline]
    fn _invalid(error: &mut String, name: &str, reason: &str) {
        error.push('\n');
        let _ = write!(error, "  - Invalid env. var.: {} ({})", name, reason);
    }

    let mut error = String::new();

    // Check server configuration
    if config.server.bind_ip.is_empty() {
        _missing(&mut error, "BOT_SERVER_BIND_IP");
    }
    if config.server.bind_port == 0 {
        _missing(&mut error, "BOT_SERVER_BIND_PORT");
    }
    if config.server.request_timeout_ms == 0 {
        _invalid(&mut error, "BOT_SERVER_REQUEST_TIMEOUT_MS", "must be positive");
    }
    if config.name.is_empty() {
        _missing(&mut error, "BOT_NAME");
    }

    // Check PG configuration
    if config.database.driver == DatabaseDriver::Postgres && config.database.pg.url.is_empty() {
        _missing(&mut error, "BOT_DATABASE_PG_URL");
    }

    // Check redis configuration
    if config.lock.driver == LockDriver::Redis && config.lock.redis.address.is_empty() {
        _missing(&mut error, "BOT_LOCK_REDIS_ADDRESS");
    }

    if config.core.update_max_attempts == 0 {
        _invalid(&mut error, "BOT_CORE_UPDATE_MAX_ATTEMPTS", "must be positive");
    }

    if error.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::EnvVarsError { errors: error })
    }
}

/// Validate configuration.
pub fn validate_configuration(config: &Config) -> Result<(), ValidationError> {
    validate_env_vars(config)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_validate_defaults() {
        let config = Config::from_env_no_version().unwrap();
        assert!(validate_configuration(&config).is_ok());
    }

    #[test]
    fn test_validate_drivers() {
        let mut config = Config::from_env_no_version().unwrap();
        config.database.driver = DatabaseDriver::Postgres;
        config.database.pg.url = String::new();
        config.lock.driver = LockDriver::Redis;
        config.lock.redis.address = String::new();
        config.core.update_max_attempts = 0;

        let ValidationError::EnvVarsError { errors } =
            validate_configuration(&config).unwrap_err();
        assert_eq!(
            errors,
            [
                "",
                "  - Missing env. var.: BOT_DATABASE_PG_URL",
                "  - Missing env. var.: BOT_LOCK_REDIS_ADDRESS",
                "  - Invalid env. var.: BOT_CORE_UPDATE_MAX_ATTEMPTS (must be positive)",
            ]
            .join("\n")
        );
    }
}
