use std::fs;
use std::path::{Path, PathBuf};

use felucca_constants::REPOSITORY_CONTRACTS_DIR;
use felucca_error::{FeluccaError, Result};
use felucca_project::{Manifest, ManifestStore};
use felucca_utils::{get_namespace_path, is_valid_index_name};

const INITIAL_VERSION: &str = "0.1.0";

pub struct InitManager;

impl InitManager {
    /// Creates `<parent_dir>/<name>` with a manifest, the namespace package
    /// and its contracts folder. Returns the new project directory.
    pub fn new_project(parent_dir: &Path, name: &str, description: Option<&str>) -> Result<PathBuf> {
        if !is_valid_index_name(name) {
            return Err(FeluccaError::InvalidPackageSpec(format!(
                "`{name}` is not a valid project name"
            )));
        }

        let project_dir = parent_dir.join(name);
        if Self::is_occupied(&project_dir)? {
            return Err(FeluccaError::ProjectExists(
                project_dir.display().to_string(),
            ));
        }

        let namespace_dir = get_namespace_path(&project_dir, name);
        let contracts_dir = namespace_dir.join(REPOSITORY_CONTRACTS_DIR);
        fs::create_dir_all(&contracts_dir).map_err(|e| FeluccaError::from_io(e, &contracts_dir))?;

        let init_file = namespace_dir.join("__init__.py");
        fs::write(&init_file, "").map_err(|e| FeluccaError::from_io(e, &init_file))?;

        let manifest = Manifest::new_project(name, INITIAL_VERSION, description);
        ManifestStore::new(&project_dir).save(&manifest)?;

        felucca_logger::info(&format!(
            "Created project '{name}' in {}",
            project_dir.display()
        ));
        Ok(project_dir)
    }

    fn is_occupied(dir: &Path) -> Result<bool> {
        if !dir.exists() {
            return Ok(false);
        }
        let mut entries = fs::read_dir(dir).map_err(|e| FeluccaError::from_io(e, dir))?;
        Ok(entries.next().is_some())
    }
}
