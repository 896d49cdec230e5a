mod auth_config;
mod config;
mod error;
mod event_stream_config;
mod log_level;
mod logging_config;
mod server_config;

#[cfg(test)]
mod tests;

pub use auth_config::AuthConfig;
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult, ConfigSection};
pub use event_stream_config::EventStreamConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

// Request timeout constraints (seconds)
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const MIN_REQUEST_TIMEOUT_SECS: u64 = 60;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 3600;

const DEFAULT_AUTH_ENABLED: bool = false;
const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

const CONFIG_DIR_ENV: &str = "OPS_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".ops";
const CONFIG_FILENAME: &str = "config.toml";
