// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::model::Manifest;
use crate::config::validate::validate_manifest;
use crate::errors::{BuildExecError, Result};

/// Load a manifest from a given path and return the raw [`Manifest`].
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation (reference integrity, path shape). Use [`load_and_validate`]
/// for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Manifest> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| BuildExecError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;

    let manifest: Manifest = toml::from_str(&contents)?;
    Ok(manifest)
}

/// Load a manifest from path and run semantic validation.
///
/// This is the recommended entry point for the rest of the application.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<Manifest> {
    let manifest = load_from_path(&path)?;
    validate_manifest(&manifest)?;
    Ok(manifest)
}

/// Default manifest path: `Build.toml` in the current working directory.
pub fn default_manifest_path() -> PathBuf {
    PathBuf::from("Build.toml")
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn loads_a_minimal_manifest() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
                [build]
                configuration = "Release"

                [target.lib]
                name = "CoreLib"
            "#
        )
        .unwrap();

        let manifest = load_and_validate(file.path()).unwrap();
        assert_eq!(manifest.build.configuration, "Release");
        assert_eq!(manifest.build.action, "build");
        assert_eq!(
            manifest.target["lib"].name.as_deref(),
            Some("CoreLib")
        );
    }

    #[test]
    fn missing_file_reports_the_path() {
        let err = load_from_path("/nonexistent/Build.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/Build.toml"));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not toml [").unwrap();

        assert!(matches!(
            load_from_path(file.path()),
            Err(BuildExecError::ManifestParse(_))
        ));
    }
}
