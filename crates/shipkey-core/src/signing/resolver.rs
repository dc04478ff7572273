//! Signing config resolution from an optional properties source.
//!
//! A missing properties file is not an error: debug builds never sign, so the
//! resolver only warns and reports [`Resolution::Absent`]. An incomplete file
//! is fatal and names the first missing key.

use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

use super::SigningConfig;
use crate::error::{Result, ShipkeyError};
use crate::properties::SigningProperties;

/// Default properties file name, relative to the Android project root.
pub const DEFAULT_PROPERTIES_FILE: &str = "keystore.properties";

/// Where signing properties come from.
///
/// Production code reads a [`FileSource`]; tests can hand in parsed
/// properties or raw text directly.
pub trait PropertiesSource {
    /// Human-readable location used in warnings.
    fn location(&self) -> String;

    /// Loads the properties, or `None` if the source does not exist.
    fn load(&self) -> Result<Option<SigningProperties>>;
}

/// A properties file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<project_root>/keystore.properties`.
    pub fn in_project(project_root: &Path) -> Self {
        Self::new(project_root.join(DEFAULT_PROPERTIES_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PropertiesSource for FileSource {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Option<SigningProperties>> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ShipkeyError::io(&self.path, e)),
        };

        // The handle is dropped when the reader goes out of scope, on success or error.
        let properties = SigningProperties::from_reader(BufReader::new(file))
            .map_err(|e| ShipkeyError::io(&self.path, e))?;

        tracing::debug!(
            "Read {} properties from {}",
            properties.len(),
            self.path.display()
        );

        Ok(Some(properties))
    }
}

impl PropertiesSource for SigningProperties {
    fn location(&self) -> String {
        "<in-memory properties>".to_string()
    }

    fn load(&self) -> Result<Option<SigningProperties>> {
        Ok(Some(self.clone()))
    }
}

impl PropertiesSource for str {
    fn location(&self) -> String {
        "<inline properties>".to_string()
    }

    fn load(&self) -> Result<Option<SigningProperties>> {
        Ok(Some(SigningProperties::parse(self)))
    }
}

impl<S: PropertiesSource> PropertiesSource for Option<S> {
    fn location(&self) -> String {
        match self {
            Some(source) => source.location(),
            None => DEFAULT_PROPERTIES_FILE.to_string(),
        }
    }

    fn load(&self) -> Result<Option<SigningProperties>> {
        match self {
            Some(source) => source.load(),
            None => Ok(None),
        }
    }
}

/// Outcome of a successful resolution.
#[derive(Debug)]
pub enum Resolution {
    /// All four keys were present.
    Configured(SigningConfig),
    /// The properties source does not exist; release signing is unavailable.
    Absent { location: String },
}

impl Resolution {
    pub fn is_configured(&self) -> bool {
        matches!(self, Resolution::Configured(_))
    }

    pub fn config(&self) -> Option<&SigningConfig> {
        match self {
            Resolution::Configured(config) => Some(config),
            Resolution::Absent { .. } => None,
        }
    }

    pub fn into_config(self) -> Option<SigningConfig> {
        match self {
            Resolution::Configured(config) => Some(config),
            Resolution::Absent { .. } => None,
        }
    }

    /// The warning reported for an absent source.
    pub fn warning(&self) -> Option<String> {
        match self {
            Resolution::Configured(_) => None,
            Resolution::Absent { location } => Some(format!(
                "{} not found. Release build will fail without signing config.",
                location
            )),
        }
    }
}

/// Resolves the release signing config from `source`.
///
/// Relative `storeFile` values are resolved against `project_root`.
pub fn resolve<S>(source: &S, project_root: &Path) -> Result<Resolution>
where
    S: PropertiesSource + ?Sized,
{
    let Some(properties) = source.load()? else {
        let resolution = Resolution::Absent {
            location: source.location(),
        };
        if let Some(warning) = resolution.warning() {
            tracing::warn!("{}", warning);
        }
        return Ok(resolution);
    };

    let config = SigningConfig::from_properties(&properties, project_root)?;
    tracing::debug!(
        "Resolved signing config: alias '{}', keystore {}",
        config.key_alias,
        config.store_file.display()
    );

    Ok(Resolution::Configured(config))
}

/// Resolves `<project_root>/keystore.properties`.
pub fn resolve_project(project_root: &Path) -> Result<Resolution> {
    resolve(&FileSource::in_project(project_root), project_root)
}
