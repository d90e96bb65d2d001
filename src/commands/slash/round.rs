//! # Round Commands
//!
//! /round, /income and /rbe
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.4.0

use serenity::builder::{CreateApplicationCommand, CreateApplicationCommandOption};
use serenity::model::application::command::CommandOptionType;

use crate::features::rounds::{Gamemode, LAST_ROUND, MAX_ROUND};

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_round_command(),
        create_range_command("income", "Calculate the income of a round", &Gamemode::ALL),
        create_range_command(
            "rbe",
            "Calculate the RBE of a round",
            &[Gamemode::Normal, Gamemode::Abr],
        ),
    ]
}

fn mode_option<'a>(
    option: &'a mut CreateApplicationCommandOption,
    modes: &[Gamemode],
) -> &'a mut CreateApplicationCommandOption {
    option
        .name("mode")
        .description("The game-mode to display information for")
        .kind(CommandOptionType::Integer);
    for mode in modes {
        option.add_int_choice(mode.label(), mode.value());
    }
    option
}

fn create_round_command() -> CreateApplicationCommand {
    let mut cmd = CreateApplicationCommand::default();
    cmd.name("round")
        .description("Display information for a round")
        .create_option(|o| {
            o.name("round")
                .description("The round to display information for")
                .kind(CommandOptionType::Integer)
                .min_int_value(1)
                .max_int_value(MAX_ROUND)
                .required(true)
        })
        .create_option(|o| mode_option(o, &[Gamemode::Normal, Gamemode::Abr]));
    cmd
}

fn create_range_command(
    name: &str,
    description: &str,
    modes: &[Gamemode],
) -> CreateApplicationCommand {
    let mut cmd = CreateApplicationCommand::default();
    cmd.name(name)
        .description(description)
        .create_option(|o| {
            o.name("start-round")
                .description("The round to start from (can be the only one)")
                .kind(CommandOptionType::Integer)
                .min_int_value(1)
                .max_int_value(LAST_ROUND)
                .required(true)
        })
        .create_option(|o| {
            o.name("end-round")
                .description("The round to end at")
                .kind(CommandOptionType::Integer)
                .min_int_value(1)
                .max_int_value(LAST_ROUND)
        })
        .create_option(|o| mode_option(o, modes));
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn options(command: &CreateApplicationCommand) -> Vec<Value> {
        command.0.get("options").unwrap().as_array().unwrap().clone()
    }

    #[test]
    fn test_round_commands() {
        let commands = create_commands();
        let names: Vec<&str> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["round", "income", "rbe"]);

        let round = options(&commands[0]);
        assert_eq!(round[0]["max_value"], 1_288_555);
        assert_eq!(round[1]["choices"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_range_bounds_and_modes() {
        let commands = create_commands();

        let income = options(&commands[1]);
        assert_eq!(income[0]["name"], "start-round");
        assert_eq!(income[0]["min_value"], 1);
        assert_eq!(income[0]["max_value"], 140);
        assert_eq!(income[0]["required"], true);
        assert_eq!(income[1]["name"], "end-round");
        assert_eq!(income[1]["max_value"], 140);
        assert_eq!(income[2]["choices"][2]["name"], "Half Cash");
        assert_eq!(income[2]["choices"][2]["value"], 2);

        let rbe = options(&commands[2]);
        assert_eq!(rbe[2]["choices"].as_array().unwrap().len(), 2);
    }
}
