use std::path::Path;

use owo_colors::OwoColorize;

use felucca_error::Result;
use felucca_project::{ManifestStore, PackageRecord};

pub struct ListManager;

impl ListManager {
    /// Recorded packages in manifest order.
    pub fn installed(project_dir: &Path) -> Result<Vec<(String, PackageRecord)>> {
        let manifest = ManifestStore::new(project_dir).load()?;
        Ok(manifest
            .contracts()
            .iter()
            .map(|(name, record)| (name.clone(), record.clone()))
            .collect())
    }

    pub fn list_packages(project_dir: &Path) -> Result<()> {
        let packages = Self::installed(project_dir)?;

        if packages.is_empty() {
            felucca_logger::info("No contracts packages installed");
            return Ok(());
        }

        felucca_logger::info("Contracts packages:");
        for (name, record) in &packages {
            println!(
                "  {} {} {}",
                name.bold(),
                record.version.green(),
                format!("({})", record.artifact_type).dimmed()
            );
            for location in &record.locations {
                println!("    {}", location.dimmed());
            }
        }

        Ok(())
    }
}
