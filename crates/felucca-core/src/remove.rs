use std::path::Path;

use felucca_error::{FeluccaError, Result};
use felucca_project::{ArtifactType, ManifestStore, PackageRecord};
use felucca_runtime::DependencyTool;
use felucca_store::remove_locations;
use felucca_utils::parse_pkg_spec;

use crate::toolchain::ProjectLayout;

pub struct RemoveManager<'a> {
    tool: &'a dyn DependencyTool,
}

impl<'a> RemoveManager<'a> {
    #[must_use]
    pub const fn new(tool: &'a dyn DependencyTool) -> Self {
        Self { tool }
    }

    /// Deletes the files recorded for `package`, drops its record and, for
    /// index packages, the host dependency. Returns the removed record.
    pub fn uninstall(&self, project_dir: &Path, package: &str, debug: bool) -> Result<PackageRecord> {
        let store = ManifestStore::new(project_dir);
        let mut manifest = store.load()?;
        if !manifest.is_setup() {
            return Err(FeluccaError::NotSetup);
        }

        // `owner/repo@v1.0.0` and `name==1.0` are recorded without the version.
        let key = parse_pkg_spec(package, None)
            .map_or_else(|_| package.trim().to_string(), |spec| spec.name());

        let Some(record) = manifest.get(&key).cloned() else {
            return Err(FeluccaError::NotInstalled(key));
        };

        let layout = ProjectLayout::load(&store)?;
        felucca_logger::status(&format!("Removing {key}"));
        let report = remove_locations(&layout.namespace_dir, &record.locations);
        for location in &report.removed {
            felucca_logger::debug(&format!("removed {location}"), debug);
        }

        manifest.remove(&key);
        store.save(&manifest)?;

        if !report.is_clean() {
            felucca_logger::warn(&format!(
                "Some files of {key} could not be removed: {}",
                report.failure_summary()
            ));
        }

        if record.artifact_type == ArtifactType::SourceWheel {
            self.tool.remove(project_dir, &key)?;
        }

        Ok(record)
    }
}
