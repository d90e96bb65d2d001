//! Round command handlers
//!
//! Handles: round, income, rbe
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.4.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::{CreateApplicationCommand, CreateEmbed};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, CommandError};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{self, get_integer_option, leaf_options};
use crate::core::embeds::CYBER;
use crate::core::{format_number, truncate_for_embed};
use crate::features::rounds::{
    is_freeplay, xp, Gamemode, RoundRange, Rounds, LAST_UNRAMPED_ROUND, MAX_ROUND,
    ROUNDS_UNAVAILABLE,
};
use crate::interactions::model::{CommandData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

const MAP_XP_NOTE: &str = "• Map XP multipliers: { intermediate 1.1, advanced 1.2, expert 1.3 }";

pub struct RoundHandler;

fn rounds(ctx: &CommandContext) -> Result<&Rounds, CommandError> {
    ctx.data
        .rounds
        .as_ref()
        .ok_or_else(|| CommandError::Unavailable(ROUNDS_UNAVAILABLE.into()))
}

fn title(round: u32, mode: Gamemode) -> String {
    if mode.is_abr() {
        format!("Round {round} ABR")
    } else {
        format!("Round {round}")
    }
}

fn ramping(rounds: &Rounds, round: u32) -> String {
    format!(
        "Health: {}x\nSpeed: {}x",
        format_number(rounds.ramping.health(round)),
        format_number(rounds.ramping.speed(round))
    )
}

/// Embed for `round`, switching to possible bloon sets once rounds are random
pub fn round_embed(rounds: &Rounds, round: i64, mode: Gamemode) -> Result<CreateEmbed, CommandError> {
    let round = u32::try_from(round)
        .ok()
        .filter(|round| (1..=MAX_ROUND).contains(round))
        .ok_or_else(|| {
            CommandError::InvalidInput(format!("Round must be between 1 and {MAX_ROUND}."))
        })?;
    let (round_xp, total_xp) = xp(round);

    let mut embed = CreateEmbed::default();
    embed.colour(CYBER).title(title(round, mode));

    if is_freeplay(round, mode) {
        let sets = rounds.freeplay_sets(round).join("\n");
        embed
            .description(truncate_for_embed(&format!(
                "All **possible** bloon sets\n\n{sets}"
            )))
            .field("Ramping", ramping(rounds, round), false)
            .field("XP earned", format_number(round_xp as f64 * 0.1), true)
            .field("Total XP from R1", format_number(total_xp as f64 * 0.1), true)
            .field("Note", MAP_XP_NOTE, false);
        return Ok(embed);
    }

    let row = rounds
        .table(mode)
        .get(round)
        .ok_or_else(|| CommandError::NotFound(format!("No data recorded for round {round}.")))?;
    let cash = match row.cash {
        Some(cash) => format!("${}", format_number(cash)),
        None if mode.is_abr() => "ABR cash data not available for round 1-2".to_string(),
        None => "Not available".to_string(),
    };

    embed
        .description(truncate_for_embed(&row.contents.join("\n")))
        .field("Round length (seconds)", format_number(row.length), true)
        .field("RBE", format_number(row.rbe as f64), true)
        .field("Cash earned", cash, true);
    if round > LAST_UNRAMPED_ROUND {
        embed.field("Ramping", ramping(rounds, round), false);
    }
    embed
        .field("XP earned", format_number(round_xp as f64), true)
        .field("Total XP from R1", format_number(total_xp as f64), false)
        .field(
            "Notes",
            format!(
                "• Freeplay (e.g. round 41 on easy mode): XP is 0.3 of displayed\n{MAP_XP_NOTE}"
            ),
            false,
        );
    Ok(embed)
}

/// Cash earned over `range`, halved in half cash mode
pub fn income(rounds: &Rounds, range: RoundRange, mode: Gamemode) -> Result<String, CommandError> {
    let mut cash = rounds
        .table(mode)
        .cash_between(range)
        .ok_or_else(|| CommandError::Unavailable(ROUNDS_UNAVAILABLE.into()))?;
    if mode == Gamemode::HalfCash {
        cash /= 2.0;
    }
    Ok(format!(
        "**{}** is made in {} from round(s) {} to {}.",
        format_number(cash),
        mode.income_label(),
        range.start,
        range.end
    ))
}

pub fn rbe(rounds: &Rounds, range: RoundRange, mode: Gamemode) -> Result<String, CommandError> {
    let total = rounds
        .table(mode)
        .rbe_between(range)
        .ok_or_else(|| CommandError::Unavailable(ROUNDS_UNAVAILABLE.into()))?;
    Ok(format!(
        "The total RBE is **{}** from round(s) {} to {}.\nNote: some towers may count pops differently due to bugs",
        format_number(total as f64),
        range.start,
        range.end
    ))
}

#[async_trait]
impl SlashCommandHandler for RoundHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["round", "income", "rbe"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::round::create_commands()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let options = leaf_options(command);
        let mode = Gamemode::from_option(get_integer_option(options, "mode"));

        let reply = rounds(&ctx).and_then(|rounds| match command.name.as_str() {
            "round" => {
                let round = get_integer_option(options, "round").unwrap_or_default();
                round_embed(rounds, round, mode).map(|embed| ReplyData::new().embed(embed))
            }
            name => {
                let range = RoundRange::new(
                    get_integer_option(options, "start-round").unwrap_or_default(),
                    get_integer_option(options, "end-round"),
                    mode,
                )?;
                let content = if name == "income" {
                    income(rounds, range, mode)?
                } else {
                    rbe(rounds, range, mode)?
                };
                Ok(ReplyData::new().content(content))
            }
        });

        Ok(into_message(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{command_data, command_interaction, context, context_with, FakeRemote};
    use crate::core::embeds::embed_json;
    use crate::features::rounds::tests::fixture_rounds;
    use serde_json::{json, Value};

    async fn run(name: &str, options: Value) -> Value {
        let interaction = command_interaction(name, options);
        RoundHandler
            .handle(context(), &interaction, command_data(&interaction))
            .await
            .unwrap()
            .to_json()
    }

    fn field_names(embed: &Value) -> Vec<String> {
        embed["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|field| field["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_regular_round() {
        let json = run("round", json!([{ "name": "round", "type": 4, "value": 40 }])).await;
        let embed = &json["data"]["embeds"][0];

        assert_eq!(embed["title"], "Round 40");
        assert_eq!(embed["description"], "40 Red");
        assert_eq!(
            field_names(embed),
            vec!["Round length (seconds)", "RBE", "Cash earned", "XP earned", "Total XP from R1", "Notes"]
        );
        assert_eq!(embed["fields"][0]["value"], "40.5");
        assert_eq!(embed["fields"][2]["value"], "$4,000");
        assert!(json["data"].get("flags").is_none());
    }

    #[tokio::test]
    async fn test_late_round_shows_ramping() {
        let json = run("round", json!([{ "name": "round", "type": 4, "value": 100 }])).await;
        let embed = &json["data"]["embeds"][0];

        assert_eq!(field_names(embed)[3], "Ramping");
        assert_eq!(embed["fields"][3]["value"], "Health: 1.4x\nSpeed: 1.4x");
    }

    #[tokio::test]
    async fn test_freeplay_round() {
        let json = run("round", json!([{ "name": "round", "type": 4, "value": 190 }])).await;
        let embed = &json["data"]["embeds"][0];

        assert_eq!(
            embed["description"],
            "All **possible** bloon sets\n\n20 Ceramic\n1 BAD"
        );
        assert_eq!(field_names(embed), vec!["Ramping", "XP earned", "Total XP from R1", "Note"]);
        // (190 - 50) * 90 + 1620 = 14220 XP, shown at a tenth
        assert_eq!(embed["fields"][1]["value"], "1,422");
    }

    #[tokio::test]
    async fn test_abr_switches_to_freeplay_after_100() {
        let json = run(
            "round",
            json!([
                { "name": "round", "type": 4, "value": 101 },
                { "name": "mode", "type": 4, "value": 1 }
            ]),
        )
        .await;
        let embed = &json["data"]["embeds"][0];
        assert_eq!(embed["title"], "Round 101 ABR");
        assert_eq!(field_names(embed)[0], "Ramping");
    }

    #[test]
    fn test_abr_early_round_has_no_cash() {
        let embed = embed_json(&round_embed(&fixture_rounds(), 2, Gamemode::Abr).unwrap());
        assert_eq!(embed["fields"][2]["value"], "ABR cash data not available for round 1-2");
    }

    #[test]
    fn test_round_out_of_range() {
        let rounds = fixture_rounds();
        for round in [0, 1_288_556] {
            assert!(matches!(
                round_embed(&rounds, round, Gamemode::Normal),
                Err(CommandError::InvalidInput(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_income_range() {
        let json = run(
            "income",
            json!([
                { "name": "start-round", "type": 4, "value": 3 },
                { "name": "end-round", "type": 4, "value": 1 }
            ]),
        )
        .await;
        assert_eq!(
            json["data"]["content"],
            "**600** is made in CHIMPS from round(s) 1 to 3."
        );
    }

    #[tokio::test]
    async fn test_half_cash_income() {
        let json = run(
            "income",
            json!([
                { "name": "start-round", "type": 4, "value": 1 },
                { "name": "mode", "type": 4, "value": 2 }
            ]),
        )
        .await;
        assert_eq!(
            json["data"]["content"],
            "**50** is made in Half Cash from round(s) 1 to 1."
        );
    }

    #[tokio::test]
    async fn test_abr_income_rejects_first_rounds() {
        let json = run(
            "income",
            json!([
                { "name": "start-round", "type": 4, "value": 1 },
                { "name": "end-round", "type": 4, "value": 10 },
                { "name": "mode", "type": 4, "value": 1 }
            ]),
        )
        .await;
        assert_eq!(
            json["data"]["content"],
            "There is no support for rounds 1-2 ABR calculation"
        );
        assert_eq!(json["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn test_abr_rbe_past_100_rejected() {
        let json = run(
            "rbe",
            json!([
                { "name": "start-round", "type": 4, "value": 50 },
                { "name": "end-round", "type": 4, "value": 120 },
                { "name": "mode", "type": 4, "value": 1 }
            ]),
        )
        .await;
        assert_eq!(
            json["data"]["content"],
            "Round 120 isn't predetermined in ABR; the calculation won't be consistent"
        );
        assert_eq!(json["data"]["flags"], 64);
    }

    #[tokio::test]
    async fn test_rbe_range() {
        let json = run(
            "rbe",
            json!([
                { "name": "start-round", "type": 4, "value": 1 },
                { "name": "end-round", "type": 4, "value": 140 }
            ]),
        )
        .await;
        assert_eq!(
            json["data"]["content"],
            "The total RBE is **9,870** from round(s) 1 to 140.\nNote: some towers may count pops differently due to bugs"
        );
    }

    #[tokio::test]
    async fn test_missing_round_data() {
        let (ctx, _) = context_with(FakeRemote::default());
        let mut data = (*ctx.data).clone();
        data.rounds = None;
        let ctx = Arc::new(CommandContext {
            data: Arc::new(data),
            ..(*ctx).clone()
        });

        let interaction =
            command_interaction("rbe", json!([{ "name": "start-round", "type": 4, "value": 1 }]));
        let json = RoundHandler
            .handle(ctx, &interaction, command_data(&interaction))
            .await
            .unwrap()
            .to_json();
        assert_eq!(json["data"]["content"], ROUNDS_UNAVAILABLE);
        assert_eq!(json["data"]["flags"], 64);
    }
}
