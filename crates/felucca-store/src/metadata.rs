use std::fs;
use std::path::{Path, PathBuf};

use felucca_constants::INSTALL_METADATA_SUFFIX;
use felucca_error::{FeluccaError, Result};

/// Removes every `*.dist-info` directory below `root` left behind by a
/// wheel install. Returns the removed directories.
pub fn strip_installation_metadata(root: &Path) -> Result<Vec<PathBuf>> {
    let mut removed = Vec::new();
    if root.is_dir() {
        strip_dir(root, &mut removed)?;
    }
    Ok(removed)
}

fn strip_dir(dir: &Path, removed: &mut Vec<PathBuf>) -> Result<()> {
    let entries = fs::read_dir(dir).map_err(|e| FeluccaError::from_io(e, dir))?;

    for entry in entries {
        let entry = entry.map_err(|e| FeluccaError::from_io(e, dir))?;
        let file_type = entry.file_type().map_err(|e| FeluccaError::from_io(e, dir))?;
        if !file_type.is_dir() {
            continue;
        }

        let path = entry.path();
        if entry
            .file_name()
            .to_string_lossy()
            .ends_with(INSTALL_METADATA_SUFFIX)
        {
            fs_extra::dir::remove(&path)
                .map_err(|e| FeluccaError::Io(std::io::Error::other(e.to_string())))?;
            removed.push(path);
        } else {
            strip_dir(&path, removed)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_nested_metadata_is_removed() {
        let root = tempdir().unwrap();
        let top = root.path().join("foo-1.0.dist-info");
        let nested = root.path().join("pkg/inner/bar-2.0.dist-info");
        fs::create_dir_all(&top).unwrap();
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("RECORD"), "").unwrap();
        fs::write(root.path().join("pkg/keep.cairo"), "").unwrap();

        let mut removed = strip_installation_metadata(root.path()).unwrap();
        removed.sort();

        assert_eq!(removed.len(), 2);
        assert!(!top.exists());
        assert!(!nested.exists());
        assert!(root.path().join("pkg/keep.cairo").exists());
    }

    #[test]
    fn test_plain_files_with_suffix_are_kept() {
        let root = tempdir().unwrap();
        fs::write(root.path().join("notes.dist-info"), "").unwrap();
        assert!(strip_installation_metadata(root.path()).unwrap().is_empty());
        assert!(root.path().join("notes.dist-info").exists());
    }

    #[test]
    fn test_missing_root_is_a_noop() {
        let root = tempdir().unwrap();
        assert!(
            strip_installation_metadata(&root.path().join("absent"))
                .unwrap()
                .is_empty()
        );
    }
}
