//! Temple command handler
//!
//! Handles: temple (from-sacrifice, max)
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::{CreateApplicationCommand, CreateEmbed};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, CommandError};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{self, get_integer_option, get_string_option, leaf_options};
use crate::core::embeds::YELLOW;
use crate::features::temple::{
    cash_to_level, parse_configuration, Category, TempleStats, INVALID_CONFIGURATION, MAX_LEVEL,
};
use crate::interactions::model::{CommandData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub struct TempleHandler;

fn stats(ctx: &CommandContext) -> Result<&TempleStats, CommandError> {
    ctx.data
        .temple
        .as_ref()
        .ok_or_else(|| CommandError::Unavailable("Temple stats are not available right now.".into()))
}

/// Stats for the cash sacrificed to each category; absent amounts count as 0
pub fn from_sacrifice(temple: &TempleStats, cash: [u64; 4]) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.title("Temple Stats").colour(YELLOW);
    for (category, cash) in Category::ALL.into_iter().zip(cash) {
        embed.field(
            format!("{} (${cash})", category.title()),
            temple.category(category).describe(cash_to_level(cash)),
            false,
        );
    }
    embed
}

/// Stats of a fully sacrificed temple; tier 2 adds the True Sun God bonus
pub fn max_stats(temple: &TempleStats, configuration: &str) -> Result<CreateEmbed, CommandError> {
    let tiers = parse_configuration(configuration)?;
    if tiers.iter().all(|&tier| tier == 0) {
        return Err(CommandError::InvalidInput(INVALID_CONFIGURATION.to_string()));
    }

    let mut embed = CreateEmbed::default();
    embed
        .title(format!("Max temple stats for {configuration}"))
        .colour(YELLOW);
    for (category, tier) in Category::ALL.into_iter().zip(tiers) {
        if tier == 0 {
            continue;
        }
        let stats = temple.category(category);
        let mut value = stats.describe(MAX_LEVEL);
        if tier == 2 {
            value.push_str(&format!("\n**TSG**:\n{}", stats.tsg));
        }
        embed.field(
            format!("{} (tier {tier})", category.title()),
            value.trim(),
            false,
        );
    }
    Ok(embed)
}

#[async_trait]
impl SlashCommandHandler for TempleHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["temple"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::temple::create_commands()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let options = leaf_options(command);

        let embed = stats(&ctx).and_then(|temple| {
            if command.subcommand() == Some("max") {
                let configuration = get_string_option(options, "configuration").unwrap_or_default();
                max_stats(temple, &configuration)
            } else {
                let cash = Category::ALL.map(|category| {
                    get_integer_option(options, category.key())
                        .and_then(|cash| u64::try_from(cash).ok())
                        .unwrap_or(0)
                });
                Ok(from_sacrifice(temple, cash))
            }
        });

        Ok(into_message(embed.map(|embed| ReplyData::new().embed(embed))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{
        command_data, command_interaction, context, context_with, subcommand, FakeRemote,
    };
    use crate::core::embeds::embed_json;
    use serde_json::{json, Value};

    async fn run(options: Value) -> Value {
        let interaction = command_interaction("temple", options);
        TempleHandler
            .handle(context(), &interaction, command_data(&interaction))
            .await
            .unwrap()
            .to_json()
    }

    #[tokio::test]
    async fn test_from_sacrifice() {
        let json = run(subcommand(
            "from-sacrifice",
            json!([
                { "name": "primary", "type": 4, "value": 7500 },
                { "name": "magic", "type": 4, "value": 60000 }
            ]),
        ))
        .await;

        let embed = &json["data"]["embeds"][0];
        assert_eq!(embed["title"], "Temple Stats");
        assert_eq!(embed["color"], 0xFFD700);

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 4);
        assert_eq!(fields[0]["name"], "Primary sacrifice ($7500)");
        assert_eq!(fields[0]["value"], "primary header\nprimary level 5");
        assert_eq!(fields[1]["name"], "Military sacrifice ($0)");
        assert_eq!(fields[1]["value"], "military header\n\u{200b}");
        assert_eq!(fields[2]["value"], "magic header\nmagic level 9");
    }

    #[tokio::test]
    async fn test_max_configuration() {
        let json = run(subcommand(
            "max",
            json!([{ "name": "configuration", "type": 3, "value": "2010" }]),
        ))
        .await;

        let embed = &json["data"]["embeds"][0];
        assert_eq!(embed["title"], "Max temple stats for 2010");

        let fields = embed["fields"].as_array().unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0]["name"], "Primary sacrifice (tier 2)");
        assert_eq!(
            fields[0]["value"],
            "primary header\nprimary level 9\n**TSG**:\nprimary tsg"
        );
        assert_eq!(fields[1]["name"], "Magic sacrifice (tier 1)");
        assert_eq!(fields[1]["value"], "magic header\nmagic level 9");
    }

    #[tokio::test]
    async fn test_invalid_configuration() {
        for config in ["3000", "0000"] {
            let json = run(subcommand(
                "max",
                json!([{ "name": "configuration", "type": 3, "value": config }]),
            ))
            .await;
            assert_eq!(json["data"]["content"], INVALID_CONFIGURATION);
            assert_eq!(json["data"]["flags"], 64);
        }
    }

    #[tokio::test]
    async fn test_missing_temple_data() {
        let (ctx, _) = context_with(FakeRemote::default());
        let mut data = (*ctx.data).clone();
        data.temple = None;
        let ctx = Arc::new(CommandContext {
            data: Arc::new(data),
            ..(*ctx).clone()
        });

        let interaction = command_interaction("temple", subcommand("max", json!([])));
        let json = TempleHandler
            .handle(ctx, &interaction, command_data(&interaction))
            .await
            .unwrap()
            .to_json();
        assert_eq!(json["data"]["content"], "Temple stats are not available right now.");
    }

    #[test]
    fn test_embed_helpers_directly() {
        let ctx = context();
        let temple = ctx.data.temple.as_ref().unwrap();
        let embed = embed_json(&from_sacrifice(temple, [0, 0, 0, 300]));
        assert_eq!(embed["fields"][3]["value"], "support header\nsupport level 1");
    }
}
