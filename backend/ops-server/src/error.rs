use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] ops_config::ConfigError),

    #[error("Auth error: {0}")]
    Auth(#[from] ops_auth::AuthError),

    #[error("Failed to read JWT key file {path}: {source} {location}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },
}

pub type Result<T> = std::result::Result<T, ServerError>;
