use std::fs;
use std::path::{Path, PathBuf};

use felucca_error::{FeluccaError, Result};
use felucca_utils::normalize_package_name;

pub struct PathResolver;

impl PathResolver {
    /// Finds the import package directory of `package_name` under the host
    /// install root (site-packages).
    pub fn resolve_installed_package(install_root: &Path, package_name: &str) -> Result<PathBuf> {
        let import_name = normalize_package_name(package_name);

        let direct = install_root.join(&import_name);
        if direct.is_dir() {
            return Ok(direct);
        }

        // Distribution names are case-insensitive, directory names may not be.
        let entries =
            fs::read_dir(install_root).map_err(|e| FeluccaError::from_io(e, install_root))?;
        for entry in entries.flatten() {
            let path = entry.path();
            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.eq_ignore_ascii_case(&import_name));
            if matches && path.is_dir() {
                return Ok(path);
            }
        }

        Err(FeluccaError::NotFound(format!(
            "{package_name} (looked for {import_name} in {})",
            install_root.display()
        )))
    }

    /// Directory inside the project namespace a package's contracts go to.
    #[must_use]
    pub fn target_dir(namespace_dir: &Path, module_name: &str) -> PathBuf {
        namespace_dir.join(module_name)
    }
}

pub fn resolve_from_index(install_root: &Path, package_name: &str) -> Result<PathBuf> {
    PathResolver::resolve_installed_package(install_root, package_name)
}
