use anyhow::Result;

use super::print_header;

pub struct SetupHandler;

impl SetupHandler {
    pub fn handle_setup(debug: bool) -> Result<()> {
        print_header("setup", None);
        let layout = felucca_core::setup_project(".", debug)?;
        felucca_logger::finish(&format!(
            "{} is ready, contracts go to {}",
            layout.name,
            layout.namespace_dir.display()
        ));
        Ok(())
    }
}

pub struct BuildHandler;

impl BuildHandler {
    pub fn handle_build(debug: bool) -> Result<()> {
        print_header("build", None);
        felucca_core::build_project(".", debug)?;
        felucca_logger::finish("Build complete");
        Ok(())
    }
}
