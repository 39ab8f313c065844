use serde::Deserialize;
use std::{fs, path::Path};

use felucca_error::{FeluccaError, Result};
use felucca_utils::{canonicalize_distribution_name, get_lock_file_path};

#[derive(Deserialize, Debug, Clone)]
pub struct LockedPackage {
    pub name: String,
    pub version: String,
}

/// The parts of `poetry.lock` felucca reads.
#[derive(Deserialize, Debug, Default)]
pub struct PoetryLock {
    #[serde(default)]
    pub package: Vec<LockedPackage>,
}

impl PoetryLock {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| FeluccaError::from_io(e, path))?;
        toml::from_str(&content)
            .map_err(|e| FeluccaError::Manifest(format!("invalid {}: {e}", path.display())))
    }

    pub fn load_project(project_dir: &Path) -> Result<Self> {
        Self::load(&get_lock_file_path(project_dir))
    }

    #[must_use]
    pub fn version_of(&self, name: &str) -> Option<&str> {
        let wanted = canonicalize_distribution_name(name);
        self.package
            .iter()
            .find(|p| canonicalize_distribution_name(&p.name) == wanted)
            .map(|p| p.version.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const LOCK: &str = r#"
[[package]]
name = "cairo-math-64x61"
version = "2.1.0"
description = "Fixed point math"
optional = false
python-versions = ">=3.7"

[[package]]
name = "requests"
version = "2.28.1"

[metadata]
lock-version = "1.1"
"#;

    #[test]
    fn test_version_lookup_normalizes_names() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("poetry.lock"), LOCK).unwrap();

        let lock = PoetryLock::load_project(dir.path()).unwrap();
        assert_eq!(lock.version_of("cairo_math_64x61"), Some("2.1.0"));
        assert_eq!(lock.version_of("Requests"), Some("2.28.1"));
        assert_eq!(lock.version_of("missing"), None);
    }

    #[test]
    fn test_missing_lock_is_empty() {
        let dir = tempdir().unwrap();
        let lock = PoetryLock::load_project(dir.path()).unwrap();
        assert!(lock.package.is_empty());
    }
}
