use anyhow::Result;

use super::print_header;

pub struct UninstallHandler;

impl UninstallHandler {
    pub fn handle_uninstall(package: &str, debug: bool) -> Result<()> {
        print_header("uninstall", Some(package));
        let record = felucca_core::uninstall_package(".", package, debug)?;
        felucca_logger::finish(&format!(
            "{package} removed ({} locations)",
            record.locations.len()
        ));
        Ok(())
    }
}
