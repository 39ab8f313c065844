use std::path::{Path, PathBuf};

use felucca_constants::{LOCK_FILE, MANIFEST_FILE};

/// Python import name for a distribution name.
#[must_use]
pub fn normalize_package_name(name: &str) -> String {
    name.replace('-', "_")
}

/// PEP 503 normalization, used to compare distribution names.
#[must_use]
pub fn canonicalize_distribution_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = false;
    for c in name.chars() {
        if matches!(c, '-' | '_' | '.') {
            if !last_was_sep {
                out.push('-');
            }
            last_was_sep = true;
        } else {
            out.push(c.to_ascii_lowercase());
            last_was_sep = false;
        }
    }
    out
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir_exists(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[must_use]
pub fn get_manifest_path(project_dir: &Path) -> PathBuf {
    project_dir.join(MANIFEST_FILE)
}

#[must_use]
pub fn get_lock_file_path(project_dir: &Path) -> PathBuf {
    project_dir.join(LOCK_FILE)
}

/// Root of the project's own Python package, where contracts are relocated.
#[must_use]
pub fn get_namespace_path(project_dir: &Path, project_name: &str) -> PathBuf {
    project_dir.join(normalize_package_name(project_name))
}

/// Relative path rendered with `/` separators, as stored in the manifest.
#[must_use]
pub fn to_manifest_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_replaces_hyphens() {
        assert_eq!(normalize_package_name("cairo-math-64"), "cairo_math_64");
        assert_eq!(normalize_package_name("plain"), "plain");
    }

    #[test]
    fn test_canonical_distribution_name() {
        assert_eq!(canonicalize_distribution_name("Cairo_Math"), "cairo-math");
        assert_eq!(canonicalize_distribution_name("a.-_b"), "a-b");
    }

    #[test]
    fn test_namespace_path_uses_import_name() {
        let ns = get_namespace_path(Path::new("/proj"), "my-contracts");
        assert_eq!(ns, PathBuf::from("/proj/my_contracts"));
    }

    #[test]
    fn test_manifest_path_separator() {
        let p = Path::new("src").join("token").join("erc20.cairo");
        assert_eq!(to_manifest_path(&p), "src/token/erc20.cairo");
    }
}
