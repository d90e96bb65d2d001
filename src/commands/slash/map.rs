//! # Map Command
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.4.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    let mut cmd = CreateApplicationCommand::default();
    cmd.name("map")
        .description("Get information about a map")
        .create_option(|o| {
            o.name("map")
                .description("The map to get information about")
                .kind(CommandOptionType::String)
                .required(true)
        });
    vec![cmd]
}
