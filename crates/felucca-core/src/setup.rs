use std::path::Path;

use felucca_error::{FeluccaError, Result};
use felucca_project::ManifestStore;
use felucca_runtime::DependencyTool;
use felucca_utils::ensure_dir_exists;

use crate::toolchain::ProjectLayout;

/// Prepares an existing Poetry project for felucca.
pub struct SetupManager<'a> {
    tool: &'a dyn DependencyTool,
}

impl<'a> SetupManager<'a> {
    #[must_use]
    pub const fn new(tool: &'a dyn DependencyTool) -> Self {
        Self { tool }
    }

    pub fn setup(&self, project_dir: &Path, debug: bool) -> Result<ProjectLayout> {
        let store = ManifestStore::new(project_dir);
        let mut manifest = store.load()?;
        let layout = ProjectLayout::load(&store)?;

        if manifest.is_setup() {
            felucca_logger::debug("Contracts table already present", debug);
        } else {
            manifest.ensure_setup();
            store.save(&manifest)?;
        }

        ensure_dir_exists(&layout.namespace_dir)
            .map_err(|e| FeluccaError::from_io(e, &layout.namespace_dir))?;

        felucca_logger::status("Installing project dependencies");
        self.tool.install(project_dir)?;

        Ok(layout)
    }

    pub fn build(&self, project_dir: &Path) -> Result<()> {
        ManifestStore::new(project_dir).load()?;
        felucca_logger::status("Building distribution");
        self.tool.build(project_dir)
    }
}
