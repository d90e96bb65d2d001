//! # Quiz Command
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![CreateApplicationCommand::default()
        .name("quiz")
        .description("Test your knowledge of the Bloonsverse")
        .to_owned()]
}
