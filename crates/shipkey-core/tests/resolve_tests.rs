//! File-backed resolution tests for shipkey-core.
//!
//! These tests exercise the on-disk properties source and keystore helpers
//! against temporary project directories.

use std::fs;
use std::path::Path;

use secrecy::ExposeSecret;
use shipkey_core::signing::{
    inspect_keystore, remove_key_properties, resolve, resolve_project, write_key_properties,
    FileSource, KeystoreType, SigningKey, DEFAULT_PROPERTIES_FILE,
};
use shipkey_core::variant::{BuildType, BuildTypes};
use shipkey_core::ShipkeyError;
use tempfile::TempDir;

/// Creates a project directory with the given keystore.properties content.
fn project_with(content: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join(DEFAULT_PROPERTIES_FILE), content)
        .expect("Failed to write properties");
    dir
}

// =============================================================================
// Resolution
// =============================================================================

mod resolution {
    use super::*;

    #[test]
    fn resolves_well_formed_file() {
        let project = project_with(
            "# Signing for Play upload\n\
             \n\
             keyAlias   = upload\n\
             storePassword=  s3cret \n\
             # key password follows\n\
             keyPassword=k3y\n\
             storeFile = keys/upload.jks\n",
        );

        let resolution = resolve_project(project.path()).unwrap();
        let config = resolution.into_config().expect("config should resolve");

        assert_eq!(config.store_file, project.path().join("keys/upload.jks"));
        assert_eq!(config.store_password.expose_secret(), "s3cret");
        assert_eq!(config.key_alias, "upload");
        assert_eq!(config.key_password.expose_secret(), "k3y");
    }

    #[test]
    fn missing_file_is_absent_not_error() {
        let project = tempfile::tempdir().unwrap();

        let resolution = resolve_project(project.path()).unwrap();

        assert!(!resolution.is_configured());
        let warning = resolution.warning().unwrap();
        assert!(warning.contains(DEFAULT_PROPERTIES_FILE));
        assert!(warning.contains("Release build will fail"));
    }

    #[test]
    fn missing_single_key_is_named() {
        let project = project_with("storeFile=a\nstorePassword=b\nkeyPassword=d\n");

        let err = resolve_project(project.path()).unwrap_err();

        assert!(matches!(
            err,
            ShipkeyError::MissingKey {
                key: SigningKey::KeyAlias
            }
        ));
        assert!(err.to_string().contains("keyAlias"));
    }

    #[test]
    fn missing_multiple_keys_names_first_in_order() {
        let project = project_with("keyAlias=c\n");

        let err = resolve_project(project.path()).unwrap_err();

        assert_eq!(err.to_string(), "Missing storeFile in signing properties");
    }

    #[test]
    fn custom_properties_path() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join("key.properties");
        fs::write(&path, "storeFile=/abs/upload.jks\nstorePassword=b\nkeyAlias=c\nkeyPassword=d").unwrap();

        let config = resolve(&FileSource::new(&path), project.path())
            .unwrap()
            .into_config()
            .unwrap();

        assert_eq!(config.store_file, Path::new("/abs/upload.jks"));
    }

    #[test]
    fn unreadable_content_is_io_error() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);
        fs::write(&path, [b's', b'=', 0xC3, 0x28, b'\n']).unwrap();

        let err = resolve_project(project.path()).unwrap_err();

        assert!(matches!(err, ShipkeyError::Io { .. }));
    }

    #[test]
    fn directory_in_place_of_file_is_io_error() {
        let project = tempfile::tempdir().unwrap();
        fs::create_dir(project.path().join(DEFAULT_PROPERTIES_FILE)).unwrap();

        let err = resolve_project(project.path()).unwrap_err();

        assert!(matches!(err, ShipkeyError::Io { .. }));
    }
}

// =============================================================================
// Build types
// =============================================================================

mod build_types {
    use super::*;

    #[test]
    fn release_is_signable_with_properties() {
        let project = project_with("storeFile=a\nstorePassword=b\nkeyAlias=c\nkeyPassword=d\n");

        let types = BuildTypes::from_resolution(resolve_project(project.path()).unwrap());

        assert!(types.get(BuildType::Release).ensure_signable().is_ok());
    }

    #[test]
    fn release_fails_without_properties_but_debug_passes() {
        let project = tempfile::tempdir().unwrap();

        let types = BuildTypes::from_resolution(resolve_project(project.path()).unwrap());

        assert!(types.get(BuildType::Debug).ensure_signable().is_ok());
        assert!(types.get(BuildType::Release).ensure_signable().is_err());
    }
}

// =============================================================================
// key.properties authoring and keystore inspection
// =============================================================================

mod authoring {
    use super::*;

    #[test]
    fn written_file_resolves_to_same_values() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);

        write_key_properties(&path, Path::new("upload.jks"), "storepass", "upload", "keypass", false)
            .unwrap();

        let config = resolve_project(project.path()).unwrap().into_config().unwrap();
        assert_eq!(config.store_file, project.path().join("upload.jks"));
        assert_eq!(config.store_password.expose_secret(), "storepass");
        assert_eq!(config.key_alias, "upload");
        assert_eq!(config.key_password.expose_secret(), "keypass");
    }

    #[test]
    fn write_refuses_to_overwrite_without_flag() {
        let project = project_with("keyAlias=old\n");
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);

        let err = write_key_properties(&path, Path::new("a.jks"), "s", "new", "k", false).unwrap_err();
        assert!(matches!(err, ShipkeyError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keyAlias=old\n");

        write_key_properties(&path, Path::new("a.jks"), "s", "new", "k", true).unwrap();
        assert!(fs::read_to_string(&path).unwrap().contains("keyAlias=new"));
    }

    #[test]
    fn write_requires_existing_parent() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join("android/key.properties");

        let err = write_key_properties(&path, Path::new("a.jks"), "s", "a", "k", false).unwrap_err();

        assert!(matches!(err, ShipkeyError::Io { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn written_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let project = tempfile::tempdir().unwrap();
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);
        write_key_properties(&path, Path::new("a.jks"), "s", "a", "k", false).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[cfg(unix)]
    #[test]
    fn overwrite_tightens_existing_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let project = project_with("keyAlias=old\n");
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        write_key_properties(&path, Path::new("a.jks"), "s", "a", "k", true).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn write_rejects_values_that_do_not_read_back() {
        let cases: [(&str, &str, &str, SigningKey); 4] = [
            (" pass ", "upload", "k", SigningKey::StorePassword),
            ("", "upload", "k", SigningKey::StorePassword),
            ("s", "up\nstoreFile=evil.jks", "k", SigningKey::KeyAlias),
            ("s", "upload", "k\r", SigningKey::KeyPassword),
        ];

        for (store_password, key_alias, key_password, expected) in cases {
            let project = tempfile::tempdir().unwrap();
            let path = project.path().join(DEFAULT_PROPERTIES_FILE);

            let err = write_key_properties(
                &path,
                Path::new("upload.jks"),
                store_password,
                key_alias,
                key_password,
                false,
            )
            .unwrap_err();

            assert!(
                matches!(err, ShipkeyError::InvalidValue { key, .. } if key == expected),
                "unexpected error for {:?}: {:?}",
                (store_password, key_alias, key_password),
                err
            );
            assert!(!path.exists());
        }
    }

    #[test]
    fn write_rejects_padded_store_file() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);

        let err = write_key_properties(&path, Path::new("upload.jks "), "s", "a", "k", false)
            .unwrap_err();

        assert!(matches!(
            err,
            ShipkeyError::InvalidValue {
                key: SigningKey::StoreFile,
                ..
            }
        ));
        assert!(err.to_string().contains("storeFile"));
    }

    #[test]
    fn remove_reports_whether_file_existed() {
        let project = project_with("keyAlias=a\n");
        let path = project.path().join(DEFAULT_PROPERTIES_FILE);

        assert!(remove_key_properties(&path).unwrap());
        assert!(!path.exists());
        assert!(!remove_key_properties(&path).unwrap());
    }

    #[test]
    fn inspect_detects_jks() {
        let project = tempfile::tempdir().unwrap();
        let path = project.path().join("upload.jks");
        fs::write(&path, [0xFE, 0xED, 0xFE, 0xED, 0x00, 0x00, 0x00, 0x02]).unwrap();

        let info = inspect_keystore(&path).unwrap();

        assert_eq!(info.keystore_type, KeystoreType::Jks);
        assert_eq!(info.size_bytes, 8);
    }

    #[test]
    fn inspect_missing_keystore() {
        let project = tempfile::tempdir().unwrap();

        let err = inspect_keystore(&project.path().join("nope.jks")).unwrap_err();

        assert!(matches!(err, ShipkeyError::KeystoreNotFound(_)));
    }
}
