//! Config module.

mod drivers;

use std::{
    env,
    str::FromStr,
    time::{SystemTime, UNIX_EPOCH},
};

pub use drivers::{DatabaseDriver, DriverError, LockDriver};

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database driver.
    pub driver: DatabaseDriver,
    /// Postgres options.
    pub pg: DatabasePgConfig,
}

#[derive(Debug, Clone)]
pub struct DatabasePgConfig {
    /// Database URL.
    pub url: String,
    /// Database pool size.
    pub pool_size: u32,
    /// Database connection timeout (in seconds)
    pub connection_timeout: u32,
}

#[derive(Debug, Clone)]
pub struct LockConfig {
    /// Lock driver.
    pub driver: LockDriver,
    /// Redis options.
    pub redis: LockRedisConfig,
    /// How long a team-wide deactivation waits for its lock (in milliseconds).
    pub team_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct LockRedisConfig {
    /// Redis address.
    pub address: String,
}

#[derive(Debug, Clone)]
pub struct SentryConfig {
    /// Sentry URL.
    pub url: String,
    /// Traces sample rate (between 0 and 1) for Sentry
    pub traces_sample_rate: f32,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Use bunyan logging.
    pub use_bunyan: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server bind IP.
    pub bind_ip: String,
    /// Server bind port.
    pub bind_port: u16,
    /// Server workers count.
    pub workers_count: Option<u16>,
    /// Per-request timeout (in milliseconds).
    pub request_timeout_ms: u64,
}

#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Attempts made on a pull request update before giving up on version conflicts.
    pub update_max_attempts: u32,
}

/// Bot configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot name.
    pub name: String,
    /// Database options.
    pub database: DatabaseConfig,
    /// Lock options.
    pub lock: LockConfig,
    /// Logging options.
    pub logging: LoggingConfig,
    /// Sentry options.
    pub sentry: SentryConfig,
    /// Server options.
    pub server: ServerConfig,
    /// Core options.
    pub core: CoreConfig,
    /// Test debug mode
    pub test_debug_mode: bool,
    /// Random seed
    pub random_seed: u64,
    /// App version
    pub version: String,
}

impl Config {
    /// Create configuration from environment.
    pub fn from_env(version: String) -> Result<Config, DriverError> {
        Ok(Config {
            name: env_to_str("BOT_NAME", "reviewbot"),
            database: DatabaseConfig {
                driver: DatabaseDriver::from_str(&env_to_str("BOT_DATABASE_DRIVER", "memory"))?,
                pg: DatabasePgConfig {
                    url: env_to_str("BOT_DATABASE_PG_URL", ""),
                    pool_size: env_to_u32("BOT_DATABASE_PG_POOL_SIZE", 20),
                    connection_timeout: env_to_u32("BOT_DATABASE_PG_CONNECTION_TIMEOUT", 5),
                },
            },
            lock: LockConfig {
                driver: LockDriver::from_str(&env_to_str("BOT_LOCK_DRIVER", "memory"))?,
                redis: LockRedisConfig {
                    address: env_to_str("BOT_LOCK_REDIS_ADDRESS", "redis://localhost"),
                },
                team_timeout_ms: env_to_u64("BOT_LOCK_TEAM_TIMEOUT_MS", 10_000),
            },
            logging: LoggingConfig {
                use_bunyan: env_to_bool("BOT_LOGGING_USE_BUNYAN", false),
            },
            sentry: SentryConfig {
                url: env_to_str("BOT_SENTRY_URL", ""),
                traces_sample_rate: env_to_f32("BOT_SENTRY_TRACES_SAMPLE_RATE", 0.0),
            },
            server: ServerConfig {
                bind_ip: env_to_str("BOT_SERVER_BIND_IP", "127.0.0.1"),
                bind_port: env_to_u16("BOT_SERVER_BIND_PORT", 8080),
                workers_count: env_to_optional_u16("BOT_SERVER_WORKERS_COUNT", None),
                request_timeout_ms: env_to_u64("BOT_SERVER_REQUEST_TIMEOUT_MS", 30_000),
            },
            core: CoreConfig {
                update_max_attempts: env_to_u32("BOT_CORE_UPDATE_MAX_ATTEMPTS", 5),
            },
            test_debug_mode: env_to_bool("BOT_TEST_DEBUG_MODE", false),
            random_seed: env_to_u64("BOT_RANDOM_SEED", random_seed()),
            version,
        })
    }

    pub fn from_env_no_version() -> Result<Self, DriverError> {
        Self::from_env("0.0.0".into())
    }
}

fn random_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

fn env_to_u16(name: &str, default: u16) -> u16 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_optional_u16(name: &str, default: Option<u16>) -> Option<u16> {
    env::var(name)
        .map(|e| e.parse::<u16>().map(Some).unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u64(name: &str, default: u64) -> u64 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .map(|e| e.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn env_to_bool(name: &str, default: bool) -> bool {
    env::var(name).map(|e| !e.is_empty()).unwrap_or(default)
}

fn env_to_str(name: &str, default: &str) -> String {
    env::var(name)
        .unwrap_or_else(|_e| default.to_string())
        .replace("\\n", "\n")
}
