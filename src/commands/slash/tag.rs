//! # Tag Command
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_tag_command()]
}

fn create_tag_command() -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("tag")
        .description("Display a tag by its name or alias")
        .create_option(|option| {
            option
                .name("query")
                .description("The name or alias of the tag")
                .kind(CommandOptionType::String)
                .required(true)
        });
    command
}
