use crate::{
    ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_AUTH_ENABLED, MIN_JWT_SECRET_LENGTH,
};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When disabled, any non-empty stream token is accepted
    pub enabled: bool,
    /// HS256 shared secret
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM), relative to the config directory
    pub jwt_public_key_path: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_AUTH_ENABLED,
            jwt_secret: None,
            jwt_public_key_path: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (None, None) => Err(ConfigError::invalid(
                ConfigSection::Auth,
                "auth.enabled requires auth.jwt_secret or auth.jwt_public_key_path",
            )),
            (Some(secret), _) if secret.len() < MIN_JWT_SECRET_LENGTH => {
                Err(ConfigError::invalid(ConfigSection::Auth, format!(
                    "auth.jwt_secret must be at least {} characters",
                    MIN_JWT_SECRET_LENGTH
                )))
            }
            (Some(_), _) => Ok(()),
            (None, Some(key_path)) => {
                let path = Path::new(key_path);
                if path.is_absolute() || key_path.contains("..") {
                    return Err(ConfigError::invalid(
                        ConfigSection::Auth,
                        "auth.jwt_public_key_path must be relative and cannot contain '..'",
                    ));
                }
                let full_path = config_dir.join(path);
                if !full_path.exists() {
                    return Err(ConfigError::invalid(ConfigSection::Auth, format!(
                        "auth.jwt_public_key_path not found: {}",
                        full_path.display()
                    )));
                }
                Ok(())
            }
        }
    }
}
