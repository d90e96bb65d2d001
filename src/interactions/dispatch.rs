//! Interaction dispatcher
//!
//! Classifies a verified interaction and hands it to the right handler:
//!
//! - **Ping**: pong, registry untouched
//! - **Command**: handler registered under the command name
//! - **Component**: handler of the command that created the clicked message,
//!   then the route matching the custom-id key
//! - **Modal**: handler named by the modal custom id's key
//! - **Autocomplete**: empty choice list
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use log::{debug, info};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::custom_id::CustomId;
use super::model::{ComponentData, Interaction, InteractionData, ModalData};
use super::InteractionResponse;
use crate::commands::context::CommandContext;
use crate::commands::handler::Access;
use crate::commands::registry::CommandRegistry;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("no handler registered for command '{0}'")]
    UnknownCommand(String),
    #[error("component interaction has no originating command")]
    MissingOrigin,
    #[error("command '{command}' has no component route '{key}'")]
    UnknownComponent { command: String, key: String },
    #[error("no modal handler for custom id '{0}'")]
    NoModalHandler(String),
    #[error("handler failed: {0:#}")]
    Handler(anyhow::Error),
}

impl From<anyhow::Error> for DispatchError {
    fn from(e: anyhow::Error) -> Self {
        DispatchError::Handler(e)
    }
}

/// Routes interactions to handlers; immutable once built
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    ctx: Arc<CommandContext>,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry, ctx: CommandContext) -> Self {
        Self {
            registry: Arc::new(registry),
            ctx: Arc::new(ctx),
        }
    }

    pub async fn dispatch(
        &self,
        interaction: &Interaction,
        request_id: Uuid,
    ) -> Result<InteractionResponse, DispatchError> {
        match &interaction.data {
            InteractionData::Ping => {
                debug!("[{request_id}] 🏓 Ping");
                Ok(InteractionResponse::pong())
            }
            InteractionData::Autocomplete => Ok(InteractionResponse::autocomplete(Vec::new())),
            InteractionData::Command(command) => {
                let handler = self
                    .registry
                    .lookup(&command.name)
                    .ok_or_else(|| DispatchError::UnknownCommand(command.name.clone()))?;
                info!(
                    "[{request_id}] 🎯 /{} from {}",
                    command.name,
                    interaction.invoker_id().unwrap_or("unknown")
                );
                Ok(handler
                    .handle(Arc::clone(&self.ctx), interaction, command)
                    .await?)
            }
            InteractionData::Component(component) => {
                self.dispatch_component(interaction, component, request_id)
                    .await
            }
            InteractionData::Modal(modal) => self.dispatch_modal(interaction, modal, request_id).await,
        }
    }

    async fn dispatch_component(
        &self,
        interaction: &Interaction,
        component: &ComponentData,
        request_id: Uuid,
    ) -> Result<InteractionResponse, DispatchError> {
        let message = interaction.message.as_ref().ok_or(DispatchError::MissingOrigin)?;
        let origin = message.origin_command().ok_or(DispatchError::MissingOrigin)?;
        let handler = self
            .registry
            .lookup(origin)
            .ok_or_else(|| DispatchError::UnknownCommand(origin.to_string()))?;

        let id = CustomId::decode(&component.custom_id);
        let route = handler
            .component_routes()
            .iter()
            .find(|route| route.key == id.key)
            .ok_or_else(|| DispatchError::UnknownComponent {
                command: origin.to_string(),
                key: id.key.clone(),
            })?;

        if route.access == Access::Invoker {
            let clicker = interaction.invoker_id();
            let invoker = message.origin_user_id();
            if clicker.is_none() || clicker != invoker {
                debug!(
                    "[{request_id}] 🚫 {} clicked '{}' on a /{origin} message owned by {}",
                    clicker.unwrap_or("unknown"),
                    id.key,
                    invoker.unwrap_or("unknown")
                );
                return Ok(InteractionResponse::deferred_update());
            }
        }

        debug!("[{request_id}] 🖱️ /{origin} component '{}'", id.key);
        Ok(handler
            .handle_component(Arc::clone(&self.ctx), interaction, component, &id)
            .await?)
    }

    async fn dispatch_modal(
        &self,
        interaction: &Interaction,
        modal: &ModalData,
        request_id: Uuid,
    ) -> Result<InteractionResponse, DispatchError> {
        let id = CustomId::decode(&modal.custom_id);
        let handler = self
            .registry
            .lookup(&id.key)
            .filter(|handler| handler.handles_modals())
            .ok_or_else(|| DispatchError::NoModalHandler(modal.custom_id.clone()))?;

        debug!("[{request_id}] 📝 Modal '{}'", modal.custom_id);
        Ok(handler
            .handle_modal(Arc::clone(&self.ctx), interaction, modal)
            .await?)
    }
}
