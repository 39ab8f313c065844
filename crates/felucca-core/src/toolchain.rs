use std::path::PathBuf;

use felucca_error::Result;
use felucca_project::ManifestStore;
use felucca_registry::CompatibilityCheck;
use felucca_runtime::{DependencyTool, RepositoryFetcher};
use felucca_utils::normalize_package_name;

/// The external collaborators a command talks to.
#[derive(Clone, Copy)]
pub struct Toolchain<'a> {
    pub tool: &'a dyn DependencyTool,
    pub fetcher: &'a dyn RepositoryFetcher,
    pub registry: &'a dyn CompatibilityCheck,
}

/// Where a project's own package lives and what it is imported as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    pub name: String,
    pub module: String,
    pub namespace_dir: PathBuf,
}

impl ProjectLayout {
    pub fn load(store: &ManifestStore) -> Result<Self> {
        let name = store.package_name()?;
        Ok(Self {
            module: normalize_package_name(&name),
            namespace_dir: store.namespace_dir(&name),
            name,
        })
    }
}
