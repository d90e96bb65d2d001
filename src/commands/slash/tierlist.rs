//! # Tierlist Command
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::commands::handlers::tierlist::{FIRST_VERSION, LATEST_VERSION};

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_tierlist_command()]
}

fn create_tierlist_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("tierlist")
        .description("Return a tierlist for a specific version")
        .create_option(|option| {
            option
                .name("version")
                .description("The version of to send the tierlist for")
                .kind(CommandOptionType::Integer)
                .min_int_value(FIRST_VERSION)
                .max_int_value(LATEST_VERSION)
                .required(true)
        });
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_bounds() {
        let commands = create_commands();
        let option = &commands[0].0.get("options").unwrap()[0];
        assert_eq!(option["min_value"], FIRST_VERSION);
        assert_eq!(option["max_value"], LATEST_VERSION);
    }
}
