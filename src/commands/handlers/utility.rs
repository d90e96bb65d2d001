//! Utility command handlers
//!
//! Handles: ping, invite, github
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Webhook replies; invite and github links
//! - 1.0.0: Extracted from command_handler.rs

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash;
use crate::interactions::model::{CommandData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub const OAUTH_AUTHORIZE_URL: &str = "https://discord.com/oauth2/authorize";

pub const GITHUB_TEXT: &str = "https://github.com/hemisemidemipresent/cyberquincy - CyberQuincy's GitHub repo. This clone is maintained by Toast#6601, running on http interactions.";

/// Handler for utility commands: ping, invite, github
pub struct UtilityHandler;

#[async_trait]
impl SlashCommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ping", "invite", "github"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::utility::create_commands()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let content = match command.name.as_str() {
            "ping" => {
                let user_id = interaction.invoker_id().unwrap_or_default();
                info!("Ping command completed for user {user_id}");
                format!("<@{user_id}>, pong!")
            }
            "invite" => format!(
                "Invite to Sober Quinze: [Click me]({OAUTH_AUTHORIZE_URL}?client_id={}&scope=bot)",
                ctx.config.client_id
            ),
            _ => GITHUB_TEXT.to_string(),
        };

        Ok(InteractionResponse::message(
            ReplyData::new().content(content).ephemeral(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{command_data, command_interaction, context, INVOKER};
    use serde_json::json;

    async fn run(name: &str) -> serde_json::Value {
        let interaction = command_interaction(name, json!([]));
        UtilityHandler
            .handle(context(), &interaction, command_data(&interaction))
            .await
            .unwrap()
            .to_json()
    }

    #[test]
    fn test_utility_handler_commands() {
        let handler = UtilityHandler;
        let names = handler.command_names();

        assert!(names.contains(&"ping"));
        assert!(names.contains(&"invite"));
        assert!(names.contains(&"github"));
        assert_eq!(names.len(), 3);
        assert_eq!(handler.declarations().len(), 3);
    }

    #[tokio::test]
    async fn test_ping_mentions_invoker() {
        let json = run("ping").await;
        assert_eq!(json["data"]["content"], format!("<@{INVOKER}>, pong!"));
        assert_eq!(json["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn test_invite_uses_client_id() {
        let json = run("invite").await;
        assert_eq!(
            json["data"]["content"],
            "Invite to Sober Quinze: [Click me](https://discord.com/oauth2/authorize?client_id=1234&scope=bot)"
        );
    }

    #[tokio::test]
    async fn test_github() {
        let json = run("github").await;
        assert_eq!(json["data"]["content"], GITHUB_TEXT);
    }
}
