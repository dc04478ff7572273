//! Debug and release build types and their signing slots.
//!
//! Only the release build type consumes the resolved signing config. A release
//! build without one fails when it is asked to sign, not when the config is
//! resolved.

use crate::error::{Result, ShipkeyError};
use crate::signing::{Resolution, SigningConfig};

/// Build variant selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildType {
    Debug,
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "debug",
            BuildType::Release => "release",
        }
    }

    /// Whether artifacts of this type must carry a release signature.
    pub fn requires_signing(&self) -> bool {
        matches!(self, BuildType::Release)
    }
}

impl std::str::FromStr for BuildType {
    type Err = ShipkeyError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(BuildType::Debug),
            "release" => Ok(BuildType::Release),
            _ => Err(ShipkeyError::InvalidBuildType(s.to_string())),
        }
    }
}

impl std::fmt::Display for BuildType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settings for one build type.
#[derive(Debug)]
pub struct BuildTypeConfig {
    pub build_type: BuildType,
    /// Code minification (R8).
    pub minify_enabled: bool,
    pub shrink_resources: bool,
    /// Signing slot; always empty for debug.
    pub signing: Option<SigningConfig>,
}

impl BuildTypeConfig {
    pub fn debug() -> Self {
        Self {
            build_type: BuildType::Debug,
            minify_enabled: false,
            shrink_resources: false,
            signing: None,
        }
    }

    pub fn release(signing: Option<SigningConfig>) -> Self {
        Self {
            build_type: BuildType::Release,
            minify_enabled: true,
            shrink_resources: true,
            signing,
        }
    }

    /// Checks that this build type can be packaged with the signing it has.
    pub fn ensure_signable(&self) -> Result<()> {
        if self.build_type.requires_signing() && self.signing.is_none() {
            return Err(ShipkeyError::SigningRequired {
                build_type: self.build_type,
            });
        }
        Ok(())
    }
}

/// Both build types, with the resolved config injected into the release slot.
#[derive(Debug)]
pub struct BuildTypes {
    pub debug: BuildTypeConfig,
    pub release: BuildTypeConfig,
}

impl BuildTypes {
    pub fn from_resolution(resolution: Resolution) -> Self {
        Self {
            debug: BuildTypeConfig::debug(),
            release: BuildTypeConfig::release(resolution.into_config()),
        }
    }

    pub fn get(&self, build_type: BuildType) -> &BuildTypeConfig {
        match build_type {
            BuildType::Debug => &self.debug,
            BuildType::Release => &self.release,
        }
    }
}
