//! Android keystore inspection and key.properties generation.
//!
//! The generated file is what the Gradle build script reads to fill the
//! release signing slot; [`crate::properties`] parses it back.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::SigningKey;
use crate::error::{Result, ShipkeyError};

/// Keystore container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeystoreType {
    Jks,
    Pkcs12,
}

impl KeystoreType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeystoreType::Jks => "jks",
            KeystoreType::Pkcs12 => "pkcs12",
        }
    }
}

impl std::str::FromStr for KeystoreType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jks" => Ok(KeystoreType::Jks),
            "pkcs12" | "p12" => Ok(KeystoreType::Pkcs12),
            _ => Err(format!("Unknown keystore type: {}", s)),
        }
    }
}

impl std::fmt::Display for KeystoreType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Information read from a keystore file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeystoreInfo {
    pub path: PathBuf,
    pub keystore_type: KeystoreType,
    pub size_bytes: u64,
}

const JKS_MAGIC: [u8; 4] = [0xFE, 0xED, 0xFE, 0xED];

/// Detects the keystore type from its magic bytes.
pub fn detect_keystore_type(data: &[u8]) -> KeystoreType {
    // JKS starts with 0xFEEDFEED; PKCS12 is an ASN.1 SEQUENCE (0x30).
    if data.starts_with(&JKS_MAGIC) {
        return KeystoreType::Jks;
    }

    // Default to PKCS12 for other formats
    KeystoreType::Pkcs12
}

/// Reads the header of the keystore at `path` and reports its type and size.
pub fn inspect_keystore(path: &Path) -> Result<KeystoreInfo> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(ShipkeyError::KeystoreNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(ShipkeyError::io(path, e)),
    };

    let size_bytes = file
        .metadata()
        .map_err(|e| ShipkeyError::io(path, e))?
        .len();

    let mut header = Vec::with_capacity(JKS_MAGIC.len());
    file.take(JKS_MAGIC.len() as u64)
        .read_to_end(&mut header)
        .map_err(|e| ShipkeyError::io(path, e))?;

    Ok(KeystoreInfo {
        path: path.to_path_buf(),
        keystore_type: detect_keystore_type(&header),
        size_bytes,
    })
}

/// Generates key.properties content for Flutter/Gradle.
pub fn generate_key_properties(
    store_file: &Path,
    store_password: &str,
    key_alias: &str,
    key_password: &str,
) -> String {
    format!(
        "storePassword={}\n\
         keyPassword={}\n\
         keyAlias={}\n\
         storeFile={}\n",
        store_password,
        key_password,
        key_alias,
        store_file.display()
    )
}

/// Checks that `value` survives a write and a parse unchanged.
///
/// The parser trims values, treats an empty value as missing, and splits on
/// line breaks, so none of those can be written.
pub fn validate_property_value(key: SigningKey, value: &str) -> Result<()> {
    let reason = if value.is_empty() {
        "is empty"
    } else if value.contains(['\n', '\r']) {
        "contains a line break"
    } else if value.trim() != value {
        "has leading or trailing whitespace"
    } else {
        return Ok(());
    };

    Err(ShipkeyError::InvalidValue { key, reason })
}

/// Writes a key.properties file to `path`.
///
/// Every value is checked with [`validate_property_value`] before anything is
/// written. Refuses to replace an existing file unless `overwrite` is set. The
/// parent directory must already exist.
pub fn write_key_properties(
    path: &Path,
    store_file: &Path,
    store_password: &str,
    key_alias: &str,
    key_password: &str,
    overwrite: bool,
) -> Result<()> {
    let store_file_str = store_file.to_str().ok_or(ShipkeyError::InvalidValue {
        key: SigningKey::StoreFile,
        reason: "is not valid UTF-8",
    })?;
    validate_property_value(SigningKey::StoreFile, store_file_str)?;
    validate_property_value(SigningKey::StorePassword, store_password)?;
    validate_property_value(SigningKey::KeyAlias, key_alias)?;
    validate_property_value(SigningKey::KeyPassword, key_password)?;

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        if !parent.is_dir() {
            return Err(ShipkeyError::io(
                parent,
                std::io::Error::new(ErrorKind::NotFound, "directory does not exist"),
            ));
        }
    }

    let mut options = OpenOptions::new();
    options.write(true);
    if overwrite {
        options.create(true).truncate(true);
    } else {
        options.create_new(true);
    }
    restrict_permissions(&mut options);

    let mut file = options.open(path).map_err(|e| match e.kind() {
        ErrorKind::AlreadyExists => ShipkeyError::AlreadyExists(path.to_path_buf()),
        _ => ShipkeyError::io(path, e),
    })?;

    // Creation mode is ignored when an existing file is truncated
    set_secure_permissions(path)?;

    let content = generate_key_properties(store_file, store_password, key_alias, key_password);
    file.write_all(content.as_bytes())
        .map_err(|e| ShipkeyError::io(path, e))?;

    tracing::debug!("Wrote key properties to {}", path.display());

    Ok(())
}

/// Removes a key.properties file if it exists.
pub fn remove_key_properties(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Removed key properties at {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(ShipkeyError::io(path, e)),
    }
}

#[cfg(unix)]
fn restrict_permissions(options: &mut OpenOptions) {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o600);
}

#[cfg(not(unix))]
fn restrict_permissions(_options: &mut OpenOptions) {}

/// Set file permissions to 0600 (owner read/write only)
#[cfg(unix)]
fn set_secure_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
        .map_err(|e| ShipkeyError::io(path, e))
}

#[cfg(not(unix))]
fn set_secure_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
