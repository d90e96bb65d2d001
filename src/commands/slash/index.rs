//! # Index Commands
//!
//! /2tc, /2mpc, /lcc and /lcd, each with `search` and `view` subcommands.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Per-index filter length cap
//! - 1.1.0: Cap filter length so page buttons stay within the custom-id limit
//! - 1.0.0: Initial implementation

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

use crate::features::index::IndexKind;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    IndexKind::ALL.into_iter().map(create_index_command).collect()
}

fn create_index_command(kind: IndexKind) -> CreateApplicationCommand {
    let mut cmd = CreateApplicationCommand::default();

    cmd.name(kind.command())
        .description(format!("Browse completed {} Index entries", kind.label()));

    let max_length = u16::try_from(kind.max_filter_length()).unwrap_or(u16::MAX);
    cmd.create_option(|search| {
        search
            .name("search")
            .description("Search for an entry matching specific criteria")
            .kind(CommandOptionType::SubCommand);

        for filter in kind.filters() {
            search.create_sub_option(|o| {
                o.name(filter.option)
                    .description(filter.description)
                    .kind(CommandOptionType::String)
                    .max_length(max_length)
            });
        }

        search
    });

    cmd.create_option(|view| {
        view.name("view")
            .description(format!("View a specific {} entry", kind.label()))
            .kind(CommandOptionType::SubCommand);

        if kind.views_by_number() {
            view.create_sub_option(|o| {
                o.name("number")
                    .description("The number of the entry to view")
                    .kind(CommandOptionType::Integer)
                    .min_int_value(1)
                    .required(true)
            });
        } else {
            view.create_sub_option(|o| {
                o.name("map")
                    .description("The map the entry was on")
                    .kind(CommandOptionType::String)
                    .required(true)
            });
        }

        view
    });

    cmd
}
