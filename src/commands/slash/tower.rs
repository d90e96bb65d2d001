//! # Tower Command
//!
//! The `tower` option's choices come from the loaded tower table.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::features::towers::display_name;

/// Discord caps an option at this many choices
pub const MAX_CHOICES: usize = 25;

pub fn create_commands(towers: &[String]) -> Vec<CreateApplicationCommand> {
    vec![create_tower_command(towers)]
}

fn create_tower_command(towers: &[String]) -> CreateApplicationCommand {
    let mut command = CreateApplicationCommand::default();
    command
        .name("tower")
        .description("Display information for a tower")
        .create_option(|option| {
            option
                .name("tower")
                .description("The tower to display information for")
                .kind(CommandOptionType::String)
                .required(true);
            for tower in towers.iter().take(MAX_CHOICES) {
                option.add_string_choice(display_name(tower), tower);
            }
            option
        })
        .create_option(|option| {
            option
                .name("path")
                .description("The path of the tower to display information for")
                .kind(CommandOptionType::String)
                .min_length(3)
                .max_length(3)
        });
    command
}
