use std::io;
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeluccaError {
    #[error("Package '{0}' not found")]
    NotFound(String),
    #[error("Failed to fetch {0}: {1}")]
    Fetch(String, String),
    #[error("Permission denied: {0}")]
    Permission(String),
    #[error("Package '{0}' is not installed")]
    NotInstalled(String),
    #[error("'{0}' is not a Cairo contracts package")]
    IncompatiblePackage(String),
    #[error("`{command}` failed with exit code {}", code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    ExternalTool { command: String, code: Option<i32> },
    #[error("Invalid package specification: {0}")]
    InvalidPackageSpec(String),
    #[error("Manifest error: {0}")]
    Manifest(String),
    #[error("felucca is not set up in this project, run `felucca setup` first")]
    NotSetup,
    #[error("Project directory {0} already exists and is not empty")]
    ProjectExists(String),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl FeluccaError {
    /// Classifies an I/O failure on `path` into the error taxonomy.
    #[must_use]
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::Permission(path.display().to_string()),
            io::ErrorKind::NotFound => Self::NotFound(path.display().to_string()),
            _ => Self::Io(io::Error::new(
                err.kind(),
                format!("{}: {err}", path.display()),
            )),
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, FeluccaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_denied_is_classified() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let classified = FeluccaError::from_io(err, Path::new("/readonly/pkg"));
        assert!(matches!(classified, FeluccaError::Permission(p) if p == "/readonly/pkg"));
    }

    #[test]
    fn test_missing_path_is_not_found() {
        let err = io::Error::new(io::ErrorKind::NotFound, "gone");
        let classified = FeluccaError::from_io(err, Path::new("site-packages/foo"));
        assert!(matches!(classified, FeluccaError::NotFound(_)));
    }

    #[test]
    fn test_other_io_errors_keep_path() {
        let err = io::Error::other("disk on fire");
        let classified = FeluccaError::from_io(err, Path::new("a/b"));
        assert!(classified.to_string().contains("a/b"));
    }

    #[test]
    fn test_external_tool_message() {
        let err = FeluccaError::ExternalTool {
            command: "poetry add foo".to_string(),
            code: Some(2),
        };
        assert_eq!(
            err.to_string(),
            "`poetry add foo` failed with exit code 2"
        );

        let killed = FeluccaError::ExternalTool {
            command: "git clone".to_string(),
            code: None,
        };
        assert!(killed.to_string().ends_with("unknown"));
    }
}
