use std::path::Path;

use felucca_constants::{BYTECODE_CACHE_DIR, BYTECODE_EXTENSIONS, CONTRACT_EXTENSION, VCS_DIRS};

/// Which files of a resolved artifact get copied into the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyFilter {
    contracts_only: bool,
}

impl CopyFilter {
    /// Only Cairo contract files; used for packages taken from the index,
    /// whose wheels also carry Python sources.
    #[must_use]
    pub const fn contracts_only() -> Self {
        Self {
            contracts_only: true,
        }
    }

    /// Everything except caches and VCS metadata.
    #[must_use]
    pub const fn all_sources() -> Self {
        Self {
            contracts_only: false,
        }
    }

    #[must_use]
    pub fn allows_dir(&self, name: &str) -> bool {
        name != BYTECODE_CACHE_DIR && !VCS_DIRS.contains(&name)
    }

    #[must_use]
    pub fn allows_file(&self, path: &Path) -> bool {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
        if BYTECODE_EXTENSIONS.contains(&ext) {
            return false;
        }
        !self.contracts_only || is_contract(path)
    }
}

#[must_use]
pub fn is_contract(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(CONTRACT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contracts_only_keeps_cairo() {
        let filter = CopyFilter::contracts_only();
        assert!(filter.allows_file(Path::new("token/erc20.cairo")));
        assert!(!filter.allows_file(Path::new("token/__init__.py")));
        assert!(!filter.allows_file(Path::new("README.md")));
    }

    #[test]
    fn test_bytecode_is_always_excluded() {
        let filter = CopyFilter::all_sources();
        assert!(!filter.allows_file(Path::new("mod.cpython-39.pyc")));
        assert!(!filter.allows_dir("__pycache__"));
        assert!(!filter.allows_dir(".git"));
        assert!(filter.allows_file(Path::new("README.md")));
        assert!(filter.allows_dir("token"));
    }
}
