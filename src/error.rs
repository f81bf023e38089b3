//! Construction-time failures.
//!
//! The simulation itself cannot fail once a `Session` exists; everything that
//! can go wrong is caught while the configuration is loaded and validated.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    UnknownWeapon(String),
    UnknownAdversary(String),
    UnknownPowerUp(String),
    InvalidParameter { field: String, reason: String },
    Parse(String),
    Io { path: String, message: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownWeapon(name) => write!(f, "unknown weapon: {name:?}"),
            Self::UnknownAdversary(name) => write!(f, "unknown adversary variant: {name:?}"),
            Self::UnknownPowerUp(name) => write!(f, "unknown power-up type: {name:?}"),
            Self::InvalidParameter { field, reason } => {
                write!(f, "invalid value for {field}: {reason}")
            }
            Self::Parse(message) => write!(f, "malformed config: {message}"),
            Self::Io { path, message } => write!(f, "cannot read {path}: {message}"),
        }
    }
}

impl std::error::Error for ConfigError {}
