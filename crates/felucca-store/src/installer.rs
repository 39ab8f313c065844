use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::{CopyFilter, is_contract};
use crate::path_resolver::PathResolver;
use crate::rewrite::ImportRewriter;
use felucca_error::{FeluccaError, Result};
use felucca_utils::to_manifest_path;

#[derive(Debug, Clone)]
pub struct InstallRequest<'a> {
    /// Directory created under the namespace, also the import prefix that
    /// gets re-rooted inside the copied contracts.
    pub module_name: &'a str,
    pub source_dir: &'a Path,
    pub namespace_dir: &'a Path,
    /// Import name of the consuming project.
    pub project_module: &'a str,
    pub filter: CopyFilter,
    /// `module_name` belongs to this package alone. A shared folder such as
    /// a repository's contracts folder is never recorded as a whole.
    pub owns_target: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    pub module_name: String,
    pub target_dir: PathBuf,
    /// The install had to create `target_dir`.
    pub created_target: bool,
    pub owns_target: bool,
    /// Top-level entries of `target_dir` that did not exist before.
    pub added: BTreeSet<String>,
    /// Every file written, relative to `target_dir`.
    pub copied: Vec<PathBuf>,
    pub rewritten: usize,
}

impl InstallOutcome {
    /// Paths relative to the namespace that now belong to the package.
    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        if self.created_target && self.owns_target {
            return vec![self.module_name.clone()];
        }
        self.added
            .iter()
            .map(|entry| format!("{}/{entry}", self.module_name))
            .collect()
    }
}

pub struct ArtifactInstaller;

impl ArtifactInstaller {
    pub fn install(request: &InstallRequest<'_>) -> Result<InstallOutcome> {
        if !request.source_dir.is_dir() {
            return Err(FeluccaError::NotFound(
                request.source_dir.display().to_string(),
            ));
        }

        let target_dir = PathResolver::target_dir(request.namespace_dir, request.module_name);
        let created_target = !target_dir.exists();
        fs::create_dir_all(&target_dir).map_err(|e| FeluccaError::from_io(e, &target_dir))?;

        match Self::populate(request, &target_dir) {
            Ok((before, copied, rewritten)) => {
                let after = Self::snapshot(&target_dir)?;
                let added = after.difference(&before).cloned().collect();
                Ok(InstallOutcome {
                    module_name: request.module_name.to_string(),
                    target_dir,
                    created_target,
                    owns_target: request.owns_target,
                    added,
                    copied,
                    rewritten,
                })
            }
            Err(e) => {
                if created_target {
                    if let Err(cleanup) = fs::remove_dir_all(&target_dir) {
                        felucca_logger::warn(&format!(
                            "Could not remove {}: {cleanup}",
                            target_dir.display()
                        ));
                    }
                }
                Err(e)
            }
        }
    }

    fn populate(
        request: &InstallRequest<'_>,
        target_dir: &Path,
    ) -> Result<(BTreeSet<String>, Vec<PathBuf>, usize)> {
        let before = Self::snapshot(target_dir)?;

        let mut copied = Vec::new();
        Self::copy_tree(
            request.source_dir,
            target_dir,
            Path::new(""),
            request.filter,
            &mut copied,
        )?;

        let rewriter = ImportRewriter::new(request.module_name, request.project_module)?;
        let mut rewritten = 0;
        for rel in copied.iter().filter(|p| is_contract(p)) {
            if rewriter.rewrite_file(&target_dir.join(rel))? {
                rewritten += 1;
            }
        }

        Ok((before, copied, rewritten))
    }

    /// Names of the entries directly inside `dir`.
    pub fn snapshot(dir: &Path) -> Result<BTreeSet<String>> {
        let entries = fs::read_dir(dir).map_err(|e| FeluccaError::from_io(e, dir))?;
        let mut names = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| FeluccaError::from_io(e, dir))?;
            names.insert(entry.file_name().to_string_lossy().into_owned());
        }
        Ok(names)
    }

    fn copy_tree(
        src: &Path,
        dst: &Path,
        rel: &Path,
        filter: CopyFilter,
        copied: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let mut entries = fs::read_dir(src)
            .map_err(|e| FeluccaError::from_io(e, src))?
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| FeluccaError::from_io(e, src))?;
        entries.sort_by_key(fs::DirEntry::file_name);

        for entry in entries {
            let name = entry.file_name();
            let name_str = name.to_string_lossy();
            let src_path = entry.path();
            let rel_path = rel.join(&name);

            // Follows symlinks, so linked contract folders are copied as content.
            let meta = fs::metadata(&src_path).map_err(|e| FeluccaError::from_io(e, &src_path))?;

            if meta.is_dir() {
                if filter.allows_dir(&name_str) {
                    Self::copy_tree(&src_path, &dst.join(&name), &rel_path, filter, copied)?;
                }
            } else if meta.is_file() && filter.allows_file(&rel_path) {
                fs::create_dir_all(dst).map_err(|e| FeluccaError::from_io(e, dst))?;
                let dst_path = dst.join(&name);
                fs::copy(&src_path, &dst_path).map_err(|e| FeluccaError::from_io(e, &dst_path))?;
                copied.push(rel_path);
            }
        }

        Ok(())
    }
}

pub fn install_artifacts(request: &InstallRequest<'_>) -> Result<InstallOutcome> {
    ArtifactInstaller::install(request)
}

/// Manifest form of the files an outcome wrote, for debug output.
#[must_use]
pub fn describe_copied(outcome: &InstallOutcome) -> Vec<String> {
    outcome
        .copied
        .iter()
        .map(|p| format!("{}/{}", outcome.module_name, to_manifest_path(p)))
        .collect()
}
