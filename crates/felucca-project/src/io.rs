use std::fs;
use std::io::Write;
use std::path::Path;

use felucca_error::{FeluccaError, Result};

/// Replaces `path` with `content` by writing a sibling temporary file and
/// renaming it into place, so readers never observe a half-written file.
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| FeluccaError::from_io(e, dir))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| FeluccaError::from_io(e, tmp.path()))?;

    // Keep the original permissions on replace.
    if let Ok(meta) = fs::metadata(path) {
        let _ = fs::set_permissions(tmp.path(), meta.permissions());
    }

    tmp.persist(path)
        .map_err(|e| FeluccaError::from_io(e.error, path))?;
    Ok(())
}
