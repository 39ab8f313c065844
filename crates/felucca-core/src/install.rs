use std::path::Path;

use felucca_constants::LATEST_VERSION;
use felucca_error::{FeluccaError, Result};
use felucca_project::{ArtifactType, ManifestStore, PackageRecord, PoetryLock};
use felucca_store::{
    CopyFilter, InstallOutcome, InstallRequest, describe_copied, install_artifacts,
    resolve_from_index, resolve_from_repository, strip_installation_metadata,
};
use felucca_utils::{PackageSpec, normalize_package_name, parse_pkg_spec};

use crate::toolchain::{ProjectLayout, Toolchain};

pub struct InstallManager<'a> {
    toolchain: Toolchain<'a>,
    contracts_dir: &'a str,
}

impl<'a> InstallManager<'a> {
    /// `contracts_dir` is the folder of a cloned repository whose content
    /// is installed.
    #[must_use]
    pub const fn new(toolchain: Toolchain<'a>, contracts_dir: &'a str) -> Self {
        Self {
            toolchain,
            contracts_dir,
        }
    }

    /// Installs `package` into the project at `project_dir` and records it
    /// in the manifest. Returns the record that was written.
    pub fn install(
        &self,
        project_dir: &Path,
        package: &str,
        version: Option<&str>,
        debug: bool,
    ) -> Result<PackageRecord> {
        let spec = parse_pkg_spec(package, version)?;
        let store = ManifestStore::new(project_dir);
        let layout = ProjectLayout::load(&store)?;
        let key = spec.name();
        let recorded = store.load()?.get(&key).is_some();

        felucca_logger::debug(
            &format!(
                "Installing {spec} into {}",
                layout.namespace_dir.display()
            ),
            debug,
        );

        let (version, artifact_type, outcome) = match &spec {
            PackageSpec::Index { name, version } => {
                let (resolved, outcome) = self.install_from_index(
                    project_dir,
                    &layout,
                    name,
                    version.as_deref(),
                    recorded,
                    debug,
                )?;
                (resolved, ArtifactType::SourceWheel, outcome)
            }
            PackageSpec::Repository { owner, repo, tag } => {
                let outcome = self.install_from_repository(&layout, owner, repo, tag.as_deref())?;
                let resolved = tag.clone().unwrap_or_else(|| LATEST_VERSION.to_string());
                (resolved, ArtifactType::GitRepository, outcome)
            }
        };

        for path in describe_copied(&outcome) {
            felucca_logger::debug(&format!("copied {path}"), debug);
        }

        let stripped = strip_installation_metadata(&layout.namespace_dir)?;
        for dir in &stripped {
            felucca_logger::debug(&format!("removed {}", dir.display()), debug);
        }

        let mut added = outcome.locations();
        added.retain(|location| layout.namespace_dir.join(location).exists());

        // The host tool may have rewritten the manifest, so edit a fresh copy.
        let mut manifest = store.load()?;
        let previous = manifest
            .get(&key)
            .map(|record| record.locations.clone())
            .unwrap_or_default();

        let record = PackageRecord {
            version,
            artifact_type,
            locations: merge_locations(&previous, &added),
        };
        manifest.insert(&key, record.clone());
        store.save(&manifest)?;

        felucca_logger::debug(
            &format!(
                "{} files copied, {} contracts rewritten",
                outcome.copied.len(),
                outcome.rewritten
            ),
            debug,
        );

        Ok(record)
    }

    fn install_from_index(
        &self,
        project_dir: &Path,
        layout: &ProjectLayout,
        name: &str,
        requested: Option<&str>,
        recorded: bool,
        debug: bool,
    ) -> Result<(String, InstallOutcome)> {
        if !self.toolchain.registry.is_compatible(name)? {
            return Err(FeluccaError::IncompatiblePackage(name.to_string()));
        }

        felucca_logger::status(&format!("Adding {name}"));
        self.toolchain.tool.add(project_dir, name, requested)?;

        // An unrecorded package must not be left behind as a bare dependency.
        self.copy_from_index(project_dir, layout, name, requested, debug)
            .inspect_err(|_| {
                if recorded {
                    return;
                }
                felucca_logger::warn(&format!(
                    "Install of {name} failed, removing the dependency"
                ));
                if let Err(undo) = self.toolchain.tool.remove(project_dir, name) {
                    felucca_logger::warn(&format!("Could not remove {name}: {undo}"));
                }
            })
    }

    fn copy_from_index(
        &self,
        project_dir: &Path,
        layout: &ProjectLayout,
        name: &str,
        requested: Option<&str>,
        debug: bool,
    ) -> Result<(String, InstallOutcome)> {
        let version = PoetryLock::load_project(project_dir)?
            .version_of(name)
            .map(str::to_string)
            .or_else(|| requested.map(str::to_string))
            .unwrap_or_else(|| LATEST_VERSION.to_string());

        let install_root = self.toolchain.tool.install_root(project_dir)?;
        felucca_logger::debug(
            &format!("Install root: {}", install_root.display()),
            debug,
        );
        let source_dir = resolve_from_index(&install_root, name)?;

        felucca_logger::status(&format!("Copying contracts of {name}"));
        let module = normalize_package_name(name);
        let outcome = install_artifacts(&InstallRequest {
            module_name: &module,
            source_dir: &source_dir,
            namespace_dir: &layout.namespace_dir,
            project_module: &layout.module,
            filter: CopyFilter::contracts_only(),
            owns_target: true,
        })?;

        Ok((version, outcome))
    }

    fn install_from_repository(
        &self,
        layout: &ProjectLayout,
        owner: &str,
        repo: &str,
        tag: Option<&str>,
    ) -> Result<InstallOutcome> {
        let checkout = resolve_from_repository(self.toolchain.fetcher, owner, repo, tag)?;
        let source_dir = checkout.contracts_dir(self.contracts_dir)?;

        felucca_logger::status(&format!("Copying contracts of {owner}/{repo}"));
        let outcome = install_artifacts(&InstallRequest {
            module_name: self.contracts_dir,
            source_dir: &source_dir,
            namespace_dir: &layout.namespace_dir,
            project_module: &layout.module,
            filter: CopyFilter::all_sources(),
            owns_target: false,
        })?;

        if let Err(e) = checkout.close() {
            felucca_logger::warn(&format!("Could not remove temporary checkout: {e}"));
        }

        Ok(outcome)
    }
}

/// Previous locations followed by the new ones. A location already covered
/// by a recorded directory is not repeated.
#[must_use]
pub fn merge_locations(previous: &[String], added: &[String]) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(previous.len() + added.len());

    for location in previous.iter().chain(added) {
        let covered = merged.iter().any(|existing| {
            location == existing
                || location
                    .strip_prefix(existing.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
        });
        if !covered {
            merged.push(location.clone());
        }
    }

    merged
}
