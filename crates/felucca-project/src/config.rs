//! Tool settings from `[tool.felucca]`, with environment overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::manifest::{Manifest, ManifestStore};
use felucca_constants::{
    DEFAULT_GIT, DEFAULT_INDEX_URL, DEFAULT_POETRY, DEFAULT_TIMEOUT_SECS, REPOSITORY_CONTRACTS_DIR,
};
use felucca_error::{FeluccaError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FeluccaConfig {
    pub index_url: String,
    pub poetry: String,
    pub git: String,
    /// Overrides the host install root instead of asking the interpreter.
    pub site_packages: Option<PathBuf>,
    /// HTTP timeout in seconds.
    pub timeout: u64,
    /// Folder of a cloned repository that holds its contracts.
    pub contracts_dir: String,
}

impl Default for FeluccaConfig {
    fn default() -> Self {
        Self {
            index_url: DEFAULT_INDEX_URL.to_string(),
            poetry: DEFAULT_POETRY.to_string(),
            git: DEFAULT_GIT.to_string(),
            site_packages: None,
            timeout: DEFAULT_TIMEOUT_SECS,
            contracts_dir: REPOSITORY_CONTRACTS_DIR.to_string(),
        }
    }
}

impl FeluccaConfig {
    pub fn from_manifest(manifest: &Manifest) -> Result<Self> {
        match manifest.tool_section("felucca") {
            Some(section) => section
                .clone()
                .try_into()
                .map_err(|e| FeluccaError::Manifest(format!("invalid [tool.felucca]: {e}"))),
            None => Ok(Self::default()),
        }
    }

    /// Project settings plus process environment. A project without a
    /// manifest gets the defaults.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let store = ManifestStore::new(project_dir);
        let config = if store.exists() {
            Self::from_manifest(&store.load()?)?
        } else {
            Self::default()
        };
        Ok(config.with_env(|key| std::env::var(key).ok()))
    }

    #[must_use]
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup("FELUCCA_INDEX_URL") {
            self.index_url = url;
        }
        if let Some(dir) = lookup("FELUCCA_SITE_PACKAGES") {
            self.site_packages = Some(PathBuf::from(dir));
        }
        if let Some(poetry) = lookup("FELUCCA_POETRY") {
            self.poetry = poetry;
        } else if self.poetry == DEFAULT_POETRY {
            if let Some(home) = lookup("POETRY_HOME") {
                self.poetry = Path::new(&home)
                    .join("bin")
                    .join(DEFAULT_POETRY)
                    .to_string_lossy()
                    .into_owned();
            }
        }
        self.index_url = self.index_url.trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_tool_table() {
        let manifest = Manifest::parse("[tool.poetry]\nname = \"x\"\n").unwrap();
        let config = FeluccaConfig::from_manifest(&manifest).unwrap();
        assert_eq!(config, FeluccaConfig::default());
        assert_eq!(config.contracts_dir, "src");
    }

    #[test]
    fn test_tool_table_overrides() {
        let manifest = Manifest::parse(
            "[tool.felucca]\nindex-url = \"http://localhost:8080/pypi/\"\ntimeout = 5\nsite-packages = \"/venv/lib\"\n",
        )
        .unwrap();
        let config = FeluccaConfig::from_manifest(&manifest)
            .unwrap()
            .with_env(env(&[]));
        assert_eq!(config.index_url, "http://localhost:8080/pypi");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.site_packages, Some(PathBuf::from("/venv/lib")));
    }

    #[test]
    fn test_poetry_home_is_honoured() {
        let config = FeluccaConfig::default().with_env(env(&[("POETRY_HOME", "/opt/poetry")]));
        assert_eq!(
            PathBuf::from(config.poetry),
            Path::new("/opt/poetry").join("bin").join("poetry")
        );
    }

    #[test]
    fn test_explicit_poetry_beats_poetry_home() {
        let config = FeluccaConfig::default().with_env(env(&[
            ("POETRY_HOME", "/opt/poetry"),
            ("FELUCCA_POETRY", "/usr/local/bin/poetry"),
        ]));
        assert_eq!(config.poetry, "/usr/local/bin/poetry");
    }

    #[test]
    fn test_bad_tool_table_is_an_error() {
        let manifest = Manifest::parse("[tool.felucca]\ntimeout = \"soon\"\n").unwrap();
        assert!(FeluccaConfig::from_manifest(&manifest).is_err());
    }
}
