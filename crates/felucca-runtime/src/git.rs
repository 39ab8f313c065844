use std::path::Path;

use crate::command::run_command_capture;
use felucca_error::{FeluccaError, Result};

/// Fetches source repositories for `owner/repo` packages.
pub trait RepositoryFetcher {
    /// Clones `url` into the existing empty directory `dest`, checked out at
    /// `tag` or at the default branch when no tag is given.
    fn clone_repository(&self, url: &str, tag: Option<&str>, dest: &Path) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct Git {
    executable: String,
    debug: bool,
}

impl Git {
    #[must_use]
    pub fn new(executable: &str, debug: bool) -> Self {
        Self {
            executable: executable.to_string(),
            debug,
        }
    }
}

impl RepositoryFetcher for Git {
    fn clone_repository(&self, url: &str, tag: Option<&str>, dest: &Path) -> Result<()> {
        let dest_str = dest.to_string_lossy();
        let mut args = vec!["clone", "--depth", "1", "--quiet"];
        if let Some(tag) = tag {
            args.extend(["--branch", tag]);
        }
        args.extend([url, dest_str.as_ref()]);

        felucca_logger::shell(&format!("{} {}", self.executable, args.join(" ")));
        let cwd = dest.parent().unwrap_or(dest);
        let output = run_command_capture(&self.executable, &args, cwd, self.debug)?;

        if output.success() {
            Ok(())
        } else {
            let reason = if output.stderr.is_empty() {
                format!("git exited with {:?}", output.code)
            } else {
                output.stderr
            };
            Err(FeluccaError::Fetch(url.to_string(), reason))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::process::Command;
    use tempfile::tempdir;

    fn git_available() -> bool {
        Command::new("git")
            .arg("--version")
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false)
    }

    #[test]
    fn test_clone_failure_is_fetch_error() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let dest = dir.path().join("clone");
        let missing = dir.path().join("no-such-repo");

        let err = Git::new("git", false)
            .clone_repository(missing.to_str().unwrap(), Some("v1.0.0"), &dest)
            .unwrap_err();
        assert!(matches!(err, FeluccaError::Fetch(_, _)));
    }

    #[test]
    fn test_clone_local_repository_at_tag() {
        if !git_available() {
            return;
        }
        let dir = tempdir().unwrap();
        let origin = dir.path().join("origin");
        std::fs::create_dir_all(origin.join("src")).unwrap();
        std::fs::write(origin.join("src").join("token.cairo"), "%lang starknet\n").unwrap();

        let git = |args: &[&str]| {
            let ok = Command::new("git")
                .args(args)
                .current_dir(&origin)
                .env("GIT_AUTHOR_NAME", "t")
                .env("GIT_AUTHOR_EMAIL", "t@example.com")
                .env("GIT_COMMITTER_NAME", "t")
                .env("GIT_COMMITTER_EMAIL", "t@example.com")
                .output()
                .unwrap()
                .status
                .success();
            assert!(ok, "git {args:?} failed");
        };
        git(&["init", "--quiet"]);
        git(&["add", "."]);
        git(&["commit", "--quiet", "-m", "init"]);
        git(&["tag", "v1.0.0"]);

        let dest = dir.path().join("clone");
        let url = format!("file://{}", origin.display());
        Git::new("git", false)
            .clone_repository(&url, Some("v1.0.0"), &dest)
            .unwrap();

        assert!(dest.join("src").join("token.cairo").is_file());
    }
}
