//! The project manifest (`pyproject.toml`) and the `felucca.contracts` table
//! kept inside it.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::io::write_atomic;
use felucca_constants::{CONTRACTS_TABLE, MANIFEST_FILE, MANIFEST_TABLE};
use felucca_error::{FeluccaError, Result};
use felucca_utils::{get_manifest_path, get_namespace_path};

/// How a package's contracts reached the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactType {
    SourceWheel,
    GitRepository,
}

impl ArtifactType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SourceWheel => "source-wheel",
            Self::GitRepository => "git-repository",
        }
    }
}

impl fmt::Display for ArtifactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of `felucca.contracts`, keyed by package name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    pub version: String,
    #[serde(rename = "type")]
    pub artifact_type: ArtifactType,
    /// Paths relative to the project namespace, in install order.
    #[serde(rename = "location", default)]
    pub locations: Vec<String>,
}

/// A parsed `pyproject.toml`. Everything outside `felucca.contracts` is
/// carried through untouched.
#[derive(Debug, Clone)]
pub struct Manifest {
    document: toml::Table,
    contracts: IndexMap<String, PackageRecord>,
    setup: bool,
}

impl Manifest {
    pub fn parse(content: &str) -> Result<Self> {
        let document: toml::Table = toml::from_str(content)
            .map_err(|e| FeluccaError::Manifest(format!("invalid {MANIFEST_FILE}: {e}")))?;

        let felucca = match document.get(MANIFEST_TABLE) {
            None => None,
            Some(toml::Value::Table(table)) => Some(table),
            Some(_) => {
                return Err(FeluccaError::Manifest(format!(
                    "`{MANIFEST_TABLE}` must be a table"
                )));
            }
        };

        let contracts_value = felucca.and_then(|t| t.get(CONTRACTS_TABLE));
        let setup = contracts_value.is_some();
        let contracts = match contracts_value {
            Some(value) => value
                .clone()
                .try_into::<IndexMap<String, PackageRecord>>()
                .map_err(|e| {
                    FeluccaError::Manifest(format!(
                        "invalid `{MANIFEST_TABLE}.{CONTRACTS_TABLE}` table: {e}"
                    ))
                })?,
            None => IndexMap::new(),
        };

        Ok(Self {
            document,
            contracts,
            setup,
        })
    }

    /// A fresh Poetry project manifest with an empty contracts table.
    #[must_use]
    pub fn new_project(name: &str, version: &str, description: Option<&str>) -> Self {
        let mut poetry = toml::Table::new();
        poetry.insert("name".to_string(), name.into());
        poetry.insert("version".to_string(), version.into());
        poetry.insert(
            "description".to_string(),
            description.unwrap_or_default().into(),
        );
        poetry.insert("authors".to_string(), toml::Value::Array(Vec::new()));

        let mut dependencies = toml::Table::new();
        dependencies.insert("python".to_string(), "^3.9".into());
        poetry.insert("dependencies".to_string(), toml::Value::Table(dependencies));

        let mut tool = toml::Table::new();
        tool.insert("poetry".to_string(), toml::Value::Table(poetry));

        let mut build_system = toml::Table::new();
        build_system.insert(
            "requires".to_string(),
            toml::Value::Array(vec!["poetry-core>=1.0.0".into()]),
        );
        build_system.insert(
            "build-backend".to_string(),
            "poetry.core.masonry.api".into(),
        );

        let mut document = toml::Table::new();
        document.insert("tool".to_string(), toml::Value::Table(tool));
        document.insert(
            "build-system".to_string(),
            toml::Value::Table(build_system),
        );

        Self {
            document,
            contracts: IndexMap::new(),
            setup: true,
        }
    }

    /// Renders the document with the current contracts table spliced in.
    pub fn to_toml_string(&self) -> Result<String> {
        let mut document = self.document.clone();

        if self.setup || !self.contracts.is_empty() {
            if !document.contains_key(MANIFEST_TABLE) {
                document.insert(
                    MANIFEST_TABLE.to_string(),
                    toml::Value::Table(toml::Table::new()),
                );
            }
            let Some(toml::Value::Table(felucca)) = document.get_mut(MANIFEST_TABLE) else {
                return Err(FeluccaError::Manifest(format!(
                    "`{MANIFEST_TABLE}` must be a table"
                )));
            };
            let contracts = toml::Value::try_from(&self.contracts)
                .map_err(|e| FeluccaError::Manifest(e.to_string()))?;
            felucca.insert(CONTRACTS_TABLE.to_string(), contracts);
        }

        toml::to_string(&document).map_err(|e| FeluccaError::Manifest(e.to_string()))
    }

    /// The project's declared name, from `[tool.poetry]` or `[project]`.
    #[must_use]
    pub fn project_name(&self) -> Option<&str> {
        self.tool_section("poetry")
            .and_then(|poetry| poetry.get("name"))
            .or_else(|| self.document.get("project").and_then(|p| p.get("name")))
            .and_then(toml::Value::as_str)
    }

    #[must_use]
    pub fn tool_section(&self, tool: &str) -> Option<&toml::Value> {
        self.document.get("tool").and_then(|t| t.get(tool))
    }

    /// Whether the `felucca.contracts` table exists (or will on save).
    #[must_use]
    pub const fn is_setup(&self) -> bool {
        self.setup
    }

    pub fn ensure_setup(&mut self) {
        self.setup = true;
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PackageRecord> {
        self.contracts.get(name)
    }

    /// Full-replace insert; returns the previous record.
    pub fn insert(&mut self, name: &str, record: PackageRecord) -> Option<PackageRecord> {
        self.setup = true;
        self.contracts.insert(name.to_string(), record)
    }

    pub fn remove(&mut self, name: &str) -> Option<PackageRecord> {
        self.contracts.shift_remove(name)
    }

    #[must_use]
    pub const fn contracts(&self) -> &IndexMap<String, PackageRecord> {
        &self.contracts
    }
}

/// Reads and writes the manifest of one project directory.
#[derive(Debug, Clone)]
pub struct ManifestStore {
    project_dir: PathBuf,
}

impl ManifestStore {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> PathBuf {
        get_manifest_path(&self.project_dir)
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.path().is_file()
    }

    pub fn load(&self) -> Result<Manifest> {
        let path = self.path();
        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FeluccaError::Manifest(format!(
                "no {MANIFEST_FILE} found in {}",
                self.project_dir.display()
            )),
            _ => FeluccaError::from_io(e, &path),
        })?;
        Manifest::parse(&content)
    }

    pub fn save(&self, manifest: &Manifest) -> Result<()> {
        let content = manifest.to_toml_string()?;
        write_atomic(&self.path(), &content)
    }

    pub fn package_name(&self) -> Result<String> {
        let manifest = self.load()?;
        manifest
            .project_name()
            .map(str::to_string)
            .ok_or_else(|| FeluccaError::Manifest("project has no declared name".to_string()))
    }

    /// Directory of the Python package named `package_name` in this project.
    #[must_use]
    pub fn namespace_dir(&self, package_name: &str) -> PathBuf {
        get_namespace_path(&self.project_dir, package_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const PYPROJECT: &str = r#"[tool.poetry]
name = "my-contracts"
version = "0.1.0"
description = "demo"

[tool.poetry.dependencies]
python = "^3.9"
"#;

    fn record(version: &str, locations: &[&str]) -> PackageRecord {
        PackageRecord {
            version: version.to_string(),
            artifact_type: ArtifactType::SourceWheel,
            locations: locations.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    #[test]
    fn test_project_name_from_poetry() {
        let manifest = Manifest::parse(PYPROJECT).unwrap();
        assert_eq!(manifest.project_name(), Some("my-contracts"));
        assert!(!manifest.is_setup());
    }

    #[test]
    fn test_project_name_from_pep621() {
        let manifest = Manifest::parse("[project]\nname = \"pep\"\n").unwrap();
        assert_eq!(manifest.project_name(), Some("pep"));
    }

    #[test]
    fn test_record_round_trip_keeps_other_tables() {
        let mut manifest = Manifest::parse(PYPROJECT).unwrap();
        manifest.insert("cairo-math", record("0.2.1", &["cairo_math"]));

        let rendered = manifest.to_toml_string().unwrap();
        let reparsed = Manifest::parse(&rendered).unwrap();

        assert_eq!(reparsed.get("cairo-math"), Some(&record("0.2.1", &["cairo_math"])));
        assert_eq!(reparsed.project_name(), Some("my-contracts"));
        assert!(rendered.contains("python = \"^3.9\""));
        assert!(rendered.contains("type = \"source-wheel\""));
    }

    #[test]
    fn test_repository_keys_are_quoted() {
        let mut manifest = Manifest::parse(PYPROJECT).unwrap();
        manifest.insert(
            "OpenZeppelin/cairo-contracts",
            PackageRecord {
                version: "v0.4.0".to_string(),
                artifact_type: ArtifactType::GitRepository,
                locations: vec!["src/openzeppelin".to_string()],
            },
        );

        let reparsed = Manifest::parse(&manifest.to_toml_string().unwrap()).unwrap();
        let rec = reparsed.get("OpenZeppelin/cairo-contracts").unwrap();
        assert_eq!(rec.artifact_type, ArtifactType::GitRepository);
    }

    #[test]
    fn test_removing_last_record_keeps_empty_table() {
        let mut manifest = Manifest::parse(PYPROJECT).unwrap();
        manifest.insert("a", record("1", &["a"]));
        let mut manifest = Manifest::parse(&manifest.to_toml_string().unwrap()).unwrap();

        assert!(manifest.remove("a").is_some());
        let reparsed = Manifest::parse(&manifest.to_toml_string().unwrap()).unwrap();
        assert!(reparsed.is_setup());
        assert!(reparsed.contracts().is_empty());
    }

    #[test]
    fn test_new_project_manifest() {
        let manifest = Manifest::new_project("my-contracts", "0.1.0", Some("demo"));
        let rendered = manifest.to_toml_string().unwrap();
        let reparsed = Manifest::parse(&rendered).unwrap();

        assert_eq!(reparsed.project_name(), Some("my-contracts"));
        assert!(reparsed.is_setup());
        assert!(rendered.contains("build-backend = \"poetry.core.masonry.api\""));
    }

    #[test]
    fn test_invalid_contracts_table_is_rejected() {
        let bad = format!("{PYPROJECT}\n[felucca.contracts.foo]\nversion = 3\n");
        assert!(matches!(Manifest::parse(&bad), Err(FeluccaError::Manifest(_))));
    }

    #[test]
    fn test_store_load_and_save() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), PYPROJECT).unwrap();
        let store = ManifestStore::new(dir.path());

        let mut manifest = store.load().unwrap();
        manifest.insert("cairo-math", record("0.2.1", &["cairo_math"]));
        store.save(&manifest).unwrap();

        assert_eq!(store.package_name().unwrap(), "my-contracts");
        assert_eq!(
            store.namespace_dir("my-contracts"),
            dir.path().join("my_contracts")
        );
        assert!(store.load().unwrap().get("cairo-math").is_some());
    }

    #[test]
    fn test_missing_manifest_is_reported() {
        let dir = tempdir().unwrap();
        let err = ManifestStore::new(dir.path()).load().unwrap_err();
        assert!(err.to_string().contains(MANIFEST_FILE));
    }
}
