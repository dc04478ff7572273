//! CLI path configuration.
//!
//! Priority order: CLI flags > environment variables > defaults.

use std::path::{Path, PathBuf};

use shipkey_core::signing::DEFAULT_PROPERTIES_FILE;

/// Environment variable overriding the Android project root.
pub const PROJECT_ROOT_ENV: &str = "SHIPKEY_PROJECT_ROOT";

/// Environment variable overriding the properties file location.
pub const PROPERTIES_ENV: &str = "SHIPKEY_PROPERTIES";

/// Paths after applying priority rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Directory that relative `storeFile` values are resolved against.
    pub project_root: PathBuf,
    /// Location of the signing properties file.
    pub properties_path: PathBuf,
}

/// Resolve configuration by applying priority rules.
///
/// A relative properties path is joined onto the resolved project root.
pub fn resolve_config(root_flag: Option<&Path>, properties_flag: Option<&Path>) -> ResolvedConfig {
    let project_root = root_flag
        .map(Path::to_path_buf)
        .or_else(|| env_path(PROJECT_ROOT_ENV))
        .unwrap_or_else(|| PathBuf::from("."));

    let properties = properties_flag
        .map(Path::to_path_buf)
        .or_else(|| env_path(PROPERTIES_ENV))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROPERTIES_FILE));

    ResolvedConfig {
        properties_path: project_root.join(properties),
        project_root,
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Warn if the properties file has overly permissive permissions (on Unix).
#[cfg(unix)]
pub fn check_file_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        // Check if group or others have any permissions
        if mode & 0o077 != 0 {
            tracing::warn!(
                "{} has overly permissive permissions ({:o}). Consider running: chmod 600 {}",
                path.display(),
                mode & 0o777,
                path.display()
            );
        }
    }
}

#[cfg(not(unix))]
pub fn check_file_permissions(_path: &Path) {
    // No permission check on non-Unix systems
}
