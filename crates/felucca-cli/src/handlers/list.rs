use anyhow::Result;

pub struct ListHandler;

impl ListHandler {
    pub fn handle_list() -> Result<()> {
        felucca_core::list_packages(".")
    }
}
