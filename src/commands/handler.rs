//! Slash command handler trait and infrastructure
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Handlers return an interaction response instead of calling the
//!   gateway; component routes and modal handling
//! - 1.0.0: Initial implementation for modular command handling

use anyhow::{bail, Result};
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use super::context::CommandContext;
use crate::interactions::custom_id::CustomId;
use crate::interactions::model::{CommandData, ComponentData, Interaction, ModalData};
use crate::interactions::InteractionResponse;

/// Who may use a component on a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    /// Only the user who ran the command that created the message
    Invoker,
}

/// A component custom-id key a handler accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentRoute {
    pub key: &'static str,
    pub access: Access,
}

impl ComponentRoute {
    pub const fn invoker(key: &'static str) -> Self {
        Self {
            key,
            access: Access::Invoker,
        }
    }

    pub const fn anyone(key: &'static str) -> Self {
        Self {
            key,
            access: Access::Anyone,
        }
    }
}

/// Trait for slash command handlers
///
/// Each command handler implements this trait to process one or more slash commands.
/// Handlers are registered with a CommandRegistry and dispatched based on command name.
/// Clicks on components of a message are routed back to the handler of the command
/// that produced the message, keyed by the custom-id key.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl SlashCommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     fn declarations(&self) -> Vec<CreateApplicationCommand> {
///         slash::utility::create_commands()
///     }
///
///     async fn handle(
///         &self,
///         ctx: Arc<CommandContext>,
///         interaction: &Interaction,
///         command: &CommandData,
///     ) -> Result<InteractionResponse> {
///         Ok(InteractionResponse::message(ReplyData::new().content("pong")))
///     }
/// }
/// ```
#[async_trait]
pub trait SlashCommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    ///
    /// A handler can process multiple commands if they share logic.
    fn command_names(&self) -> &'static [&'static str];

    /// Slash command declarations for every name in `command_names`
    fn declarations(&self) -> Vec<CreateApplicationCommand>;

    /// Component keys this handler answers
    fn component_routes(&self) -> &'static [ComponentRoute] {
        &[]
    }

    /// Whether modal submissions whose custom id starts with this
    /// handler's command name are accepted
    fn handles_modals(&self) -> bool {
        false
    }

    /// Handle the slash command
    ///
    /// Recoverable failures should come back as an ephemeral reply; an `Err`
    /// is answered with a bare server error.
    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse>;

    /// Handle a click on one of `component_routes`
    async fn handle_component(
        &self,
        _ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        _component: &ComponentData,
        id: &CustomId,
    ) -> Result<InteractionResponse> {
        bail!("no component handler for '{}'", id.key)
    }

    async fn handle_modal(
        &self,
        _ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        modal: &ModalData,
    ) -> Result<InteractionResponse> {
        bail!("no modal handler for '{}'", modal.custom_id)
    }
}
