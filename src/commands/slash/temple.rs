//! # Temple Command
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::features::temple::Category;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![create_temple_command()]
}

fn create_temple_command() -> CreateApplicationCommand {
    let mut cmd = CreateApplicationCommand::default();

    cmd.name("temple").description("Display temple stats");

    cmd.create_option(|sub| {
        sub.name("from-sacrifice")
            .description("Get temple stats from the amount of money sacrificed to each category")
            .kind(CommandOptionType::SubCommand);

        for category in Category::ALL {
            sub.create_sub_option(|o| {
                o.name(category.key())
                    .description(format!(
                        "Amount of money sacrificed to the {} category",
                        category.key()
                    ))
                    .kind(CommandOptionType::Integer)
                    .min_int_value(0)
            });
        }

        sub
    });

    cmd.create_option(|sub| {
        sub.name("max")
            .description("Get max temple stats based on category configuration")
            .kind(CommandOptionType::SubCommand)
            .create_sub_option(|o| {
                o.name("configuration")
                    .description("The configuration of temple sacrifices (eg. 1011)")
                    .kind(CommandOptionType::String)
                    .min_length(4)
                    .max_length(4)
                    .required(true)
            })
    });

    cmd
}
