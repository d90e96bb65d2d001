// Core layer - configuration, Discord limits and embed helpers
pub mod core;

// Features layer - game data and the logic behind each command
pub mod features;

// Webhook layer - authentication, dispatch and response encoding
pub mod interactions;

// Application layer
pub mod commands;

pub use core::Config;

pub use commands::{create_all_handlers, CommandContext, CommandRegistry, SlashCommandHandler};
pub use features::{GameData, HttpSource, WebhookFollowups};
pub use interactions::{AppState, Dispatcher, InteractionResponse, ReplyData, SignatureVerifier};
