//! # Command System
//!
//! Slash command (/) handling for Discord interactions.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Webhook interactions; recoverable command errors; component routes
//! - 2.1.0: Add modular handler infrastructure (handler trait, context, registry)
//! - 2.0.0: Remove bang commands, slash-only command system
//! - 1.0.0: Initial reorganization with modular command structure

pub mod context;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

#[cfg(test)]
pub mod testing;

// Re-export handler infrastructure
pub use context::CommandContext;
pub use error::CommandError;
pub use handler::{Access, ComponentRoute, SlashCommandHandler};
pub use handlers::create_all_handlers;
pub use registry::CommandRegistry;

pub use slash::{get_integer_option, get_string_option, leaf_options};
