//! Error types for the Shipkey core library.

use std::path::PathBuf;

use thiserror::Error;

use crate::signing::SigningKey;
use crate::variant::BuildType;

/// Core error type for signing resolution.
#[derive(Error, Debug)]
pub enum ShipkeyError {
    #[error("Missing {key} in signing properties")]
    MissingKey { key: SigningKey },

    #[error("Value for {key} {reason}")]
    InvalidValue {
        key: SigningKey,
        reason: &'static str,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Build type '{build_type}' requires a signing config, but none was resolved")]
    SigningRequired { build_type: BuildType },

    #[error("Keystore not found: {}", .0.display())]
    KeystoreNotFound(PathBuf),

    #[error("File already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("Invalid build type: {0}")]
    InvalidBuildType(String),
}

impl ShipkeyError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShipkeyError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for Shipkey operations.
pub type Result<T> = std::result::Result<T, ShipkeyError>;
