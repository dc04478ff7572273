//! The resolved release signing configuration.

use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use super::SigningKey;
use crate::error::{Result, ShipkeyError};
use crate::properties::SigningProperties;

/// Credentials needed to sign a release artifact.
///
/// Passwords are wrapped in [`SecretString`] and never show up in `Debug` output.
#[derive(Debug)]
pub struct SigningConfig {
    /// Keystore path, resolved against the project root.
    pub store_file: PathBuf,
    pub store_password: SecretString,
    pub key_alias: String,
    pub key_password: SecretString,
}

impl SigningConfig {
    /// Builds a config from parsed properties.
    ///
    /// Keys are looked up in [`SigningKey::ALL`] order and the first one that is
    /// absent or empty fails the whole lookup. A relative `storeFile` is joined
    /// onto `project_root`.
    pub fn from_properties(properties: &SigningProperties, project_root: &Path) -> Result<Self> {
        let store_file = require(properties, SigningKey::StoreFile)?;
        let store_password = require(properties, SigningKey::StorePassword)?;
        let key_alias = require(properties, SigningKey::KeyAlias)?;
        let key_password = require(properties, SigningKey::KeyPassword)?;

        Ok(Self {
            store_file: project_root.join(store_file),
            store_password: SecretString::from(store_password.to_string()),
            key_alias: key_alias.to_string(),
            key_password: SecretString::from(key_password.to_string()),
        })
    }

    /// A copy of the config that is safe to print or serialize.
    pub fn summary(&self) -> SigningSummary {
        SigningSummary {
            store_file: self.store_file.clone(),
            key_alias: self.key_alias.clone(),
            store_password_set: !self.store_password.expose_secret().is_empty(),
            key_password_set: !self.key_password.expose_secret().is_empty(),
        }
    }
}

fn require(properties: &SigningProperties, key: SigningKey) -> Result<&str> {
    match properties.get(key.as_str()) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ShipkeyError::MissingKey { key }),
    }
}

/// Redacted view of a [`SigningConfig`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningSummary {
    pub store_file: PathBuf,
    pub key_alias: String,
    pub store_password_set: bool,
    pub key_password_set: bool,
}
