use crate::{
    AuthConfig, CONFIG_DIR_ENV, CONFIG_DIR_NAME, CONFIG_FILENAME, ConfigError, ConfigErrorResult,
    ConfigSection, EventStreamConfig, LoggingConfig, ServerConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
    pub event_stream: EventStreamConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for OPS_CONFIG_DIR env var, else use ./.ops/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply OPS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::io(&config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: OPS_CONFIG_DIR env var > ./.ops/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| {
                ConfigError::invalid(
                    ConfigSection::General,
                    "Cannot determine current working directory",
                )
            })?;
        Ok(cwd.join(CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.auth.validate(&config_dir)?;
        self.event_stream.validate()?;

        // Idle streams are only kept open by pings; a timeout at or below the
        // ping period would cut them off.
        if self.server.request_timeout_secs <= self.event_stream.heartbeat_interval_secs {
            return Err(ConfigError::invalid(ConfigSection::General, format!(
                "server.request_timeout_secs ({}) must be greater than event_stream.heartbeat_interval_secs ({})",
                self.server.request_timeout_secs, self.event_stream.heartbeat_interval_secs
            )));
        }

        Ok(())
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (request timeout {}s)",
            self.server.host, self.server.port, self.server.request_timeout_secs
        );

        let auth_type = if self.auth.jwt_secret.is_some() {
            "HS256"
        } else if self.auth.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        };

        info!(
            "  auth: {} ({})",
            if self.auth.enabled {
                "enabled"
            } else {
                "disabled"
            },
            auth_type
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );

        info!(
            "  event_stream: mailbox={}, broadcast={}, heartbeat={}s, id_prefix={}",
            self.event_stream.mailbox_capacity,
            self.event_stream.broadcast_capacity,
            self.event_stream.heartbeat_interval_secs,
            self.event_stream.id_prefix
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("OPS_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("OPS_SERVER_PORT", &mut self.server.port);
        Self::apply_env_parse(
            "OPS_SERVER_REQUEST_TIMEOUT_SECS",
            &mut self.server.request_timeout_secs,
        );

        // Auth
        Self::apply_env_bool("OPS_AUTH_ENABLED", &mut self.auth.enabled);
        Self::apply_env_option_string("OPS_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "OPS_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );

        // Logging
        Self::apply_env_parse("OPS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("OPS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("OPS_LOG_FILE", &mut self.logging.file);

        // Event stream
        Self::apply_env_parse(
            "OPS_STREAM_MAILBOX_CAPACITY",
            &mut self.event_stream.mailbox_capacity,
        );
        Self::apply_env_parse(
            "OPS_STREAM_BROADCAST_CAPACITY",
            &mut self.event_stream.broadcast_capacity,
        );
        Self::apply_env_parse(
            "OPS_STREAM_HEARTBEAT_INTERVAL_SECS",
            &mut self.event_stream.heartbeat_interval_secs,
        );
        Self::apply_env_string("OPS_STREAM_ID_PREFIX", &mut self.event_stream.id_prefix);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
