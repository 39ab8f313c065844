use std::path::{Path, PathBuf};

use tempfile::TempDir;

use felucca_constants::GITHUB_URL;
use felucca_error::{FeluccaError, Result};
use felucca_runtime::RepositoryFetcher;

/// A repository checked out into a temporary directory. The checkout is
/// deleted when this value is dropped.
#[derive(Debug)]
pub struct ClonedRepository {
    dir: TempDir,
}

impl ClonedRepository {
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Sub-directory holding the repository's contracts.
    pub fn contracts_dir(&self, folder: &str) -> Result<PathBuf> {
        let dir = self.dir.path().join(folder);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(FeluccaError::NotFound(format!(
                "contracts folder `{folder}` in cloned repository"
            )))
        }
    }

    /// Deletes the checkout now, reporting failures instead of ignoring them.
    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close().map_err(|e| FeluccaError::from_io(e, &path))
    }
}

#[must_use]
pub fn repository_url(owner: &str, repo: &str) -> String {
    format!("{GITHUB_URL}/{owner}/{repo}.git")
}

/// Clones `owner/repo` at `tag` into a fresh temporary directory. On any
/// failure the directory is removed before returning.
pub fn resolve_from_repository(
    fetcher: &dyn RepositoryFetcher,
    owner: &str,
    repo: &str,
    tag: Option<&str>,
) -> Result<ClonedRepository> {
    let dir = tempfile::Builder::new()
        .prefix("felucca-")
        .tempdir()
        .map_err(|e| FeluccaError::from_io(e, &std::env::temp_dir()))?;

    let url = repository_url(owner, repo);
    felucca_logger::status(&format!("Cloning {owner}/{repo}"));
    fetcher.clone_repository(&url, tag, dir.path())?;

    Ok(ClonedRepository { dir })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    struct FakeFetcher {
        fail: bool,
        seen: RefCell<Vec<(String, Option<String>, PathBuf)>>,
    }

    impl FakeFetcher {
        fn new(fail: bool) -> Self {
            Self {
                fail,
                seen: RefCell::new(Vec::new()),
            }
        }

        fn last_dest(&self) -> PathBuf {
            self.seen.borrow().last().unwrap().2.clone()
        }
    }

    impl RepositoryFetcher for FakeFetcher {
        fn clone_repository(&self, url: &str, tag: Option<&str>, dest: &Path) -> Result<()> {
            self.seen
                .borrow_mut()
                .push((url.to_string(), tag.map(str::to_string), dest.to_path_buf()));
            fs::create_dir_all(dest.join("src")).unwrap();
            fs::write(dest.join("src").join("a.cairo"), "").unwrap();
            if self.fail {
                Err(FeluccaError::Fetch(url.to_string(), "network down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_clone_url_and_tag() {
        let fetcher = FakeFetcher::new(false);
        let repo = resolve_from_repository(&fetcher, "octocat", "hello-world", Some("v1.2.3"))
            .unwrap();

        let seen = fetcher.seen.borrow();
        assert_eq!(seen[0].0, "https://github.com/octocat/hello-world.git");
        assert_eq!(seen[0].1.as_deref(), Some("v1.2.3"));
        assert!(repo.contracts_dir("src").is_ok());
        assert!(repo.contracts_dir("contracts").is_err());
    }

    #[test]
    fn test_temp_dir_removed_after_success() {
        let fetcher = FakeFetcher::new(false);
        let repo = resolve_from_repository(&fetcher, "o", "r", None).unwrap();
        let dest = fetcher.last_dest();
        assert!(dest.exists());

        drop(repo);
        assert!(!dest.exists());
    }

    #[test]
    fn test_temp_dir_removed_after_failure() {
        let fetcher = FakeFetcher::new(true);
        let err = resolve_from_repository(&fetcher, "o", "r", Some("v0.1.0")).unwrap_err();

        assert!(matches!(err, FeluccaError::Fetch(_, _)));
        assert!(!fetcher.last_dest().exists());
    }

    #[test]
    fn test_explicit_close() {
        let fetcher = FakeFetcher::new(false);
        let repo = resolve_from_repository(&fetcher, "o", "r", None).unwrap();
        let path = repo.path().to_path_buf();
        repo.close().unwrap();
        assert!(!path.exists());
    }
}
