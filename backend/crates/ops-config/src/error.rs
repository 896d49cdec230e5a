use std::fmt;
use std::panic::Location;
use std::path::PathBuf;

use error_location::ErrorLocation;
use thiserror::Error;

/// Top-level table of `config.toml` a setting belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Server,
    Auth,
    EventStream,
    /// Cross-section rules and the config directory itself
    General,
}

impl fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Server => "server",
            Self::Auth => "auth",
            Self::EventStream => "event_stream",
            Self::General => "config",
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid [{section}] setting: {message} {location}")]
    Invalid {
        section: ConfigSection,
        message: String,
        location: ErrorLocation,
    },

    #[error("cannot access {path}: {source} {location}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("malformed {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[track_caller]
    pub fn invalid(section: ConfigSection, message: impl Into<String>) -> Self {
        Self::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Section at fault; `None` for file access and parse failures
    pub fn section(&self) -> Option<ConfigSection> {
        match self {
            Self::Invalid { section, .. } => Some(*section),
            Self::Io { .. } | Self::Toml { .. } => None,
        }
    }
}

pub type ConfigErrorResult<T> = Result<T, ConfigError>;
