use anyhow::Result;

use super::print_header;

pub struct InstallHandler;

impl InstallHandler {
    pub fn handle_install(package: &str, version: Option<&str>, debug: bool) -> Result<()> {
        print_header("install", Some(package));

        let record = felucca_core::install_package(".", package, version, debug)?;

        felucca_logger::finish(&format!(
            "{package}@{} installed ({})",
            record.version, record.artifact_type
        ));
        for location in &record.locations {
            felucca_logger::debug(&format!("recorded {location}"), debug);
        }
        Ok(())
    }
}
