use anyhow::Result;
use inquire::Text;

use super::print_header;

pub struct NewHandler;

impl NewHandler {
    pub fn handle_new(name: &str, description: Option<String>, yes: bool) -> Result<()> {
        print_header("new", Some(name));

        let description = match description {
            Some(description) => Some(description),
            None if yes => None,
            None => Self::prompt_description()?,
        };

        let project_dir = felucca_core::new_project(".", name, description.as_deref())?;
        felucca_logger::finish(&format!("Created {}", project_dir.display()));
        felucca_logger::info(&format!(
            "Run `cd {name} && felucca setup` to install its dependencies"
        ));
        Ok(())
    }

    fn prompt_description() -> Result<Option<String>> {
        let answer = Text::new("Description:")
            .with_help_message("Press enter to leave it empty")
            .prompt()?;
        let answer = answer.trim();
        Ok((!answer.is_empty()).then(|| answer.to_string()))
    }
}
