//! # Slash Commands (/)
//!
//! Declarations for every slash command, plus helpers for reading the
//! options Discord sends back.
//!
//! - **Version**: 3.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Declarations owned by handlers; options read from webhook payloads
//! - 2.0.0: Index commands with search and view subcommands
//! - 1.0.0: Reorganized from monolithic slash_commands.rs

pub mod index;
pub mod map;
pub mod quiz;
pub mod round;
pub mod tag;
pub mod temple;
pub mod tierlist;
pub mod tower;
pub mod utility;

use crate::interactions::model::{
    CommandData, CommandDataOption, OPTION_SUB_COMMAND, OPTION_SUB_COMMAND_GROUP,
};

/// Options of the invoked (sub)command, skipping subcommand and group wrappers
pub fn leaf_options(command: &CommandData) -> &[CommandDataOption] {
    let mut options = command.options.as_slice();
    while let Some(first) = options.first() {
        if first.kind == OPTION_SUB_COMMAND || first.kind == OPTION_SUB_COMMAND_GROUP {
            options = first.options.as_slice();
        } else {
            break;
        }
    }
    options
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Utility function to get integer option from slash command
pub fn get_integer_option(options: &[CommandDataOption], name: &str) -> Option<i64> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_i64())
}
