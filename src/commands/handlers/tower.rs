//! Tower command handler
//!
//! Handles: tower
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Full upgrade summary button
//! - 1.0.0: Path description and costs

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::warn;
use serde_json::Value;
use serenity::builder::{CreateApplicationCommand, CreateComponents, CreateEmbed};
use serenity::model::application::component::ButtonStyle;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, into_update, CommandError};
use crate::commands::handler::{ComponentRoute, SlashCommandHandler};
use crate::commands::slash::{self, get_string_option, leaf_options};
use crate::core::embeds::{add_report_bug_button, add_report_bug_row, component_rows, CYBER};
use crate::features::towers::{
    display_name, single_path_upgrades, with_separators, Difficulty, StatSheet, Tower,
    UpgradePath,
};
use crate::interactions::custom_id::{ComponentState, CustomId, CustomIdError};
use crate::interactions::model::{CommandData, ComponentData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub const SUMMARY_KEY: &str = "summary";

const ROUTES: [ComponentRoute; 1] = [ComponentRoute::invoker(SUMMARY_KEY)];

const FETCH_FAILED: &str = "Something went wrong while fetching the tower data.";
const PARSE_FAILED: &str = "Something went wrong while parsing the tower info.";

/// `summary:<tower>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TowerAction {
    pub tower: String,
}

impl ComponentState for TowerAction {
    fn to_custom_id(&self) -> CustomId {
        CustomId::new(SUMMARY_KEY).arg(&self.tower)
    }

    fn from_custom_id(id: &CustomId) -> Result<Self, CustomIdError> {
        if id.key != SUMMARY_KEY {
            return Err(CustomIdError::UnknownKey(id.key.clone()));
        }
        Ok(Self {
            tower: id.get(0)?.to_string(),
        })
    }
}

/// Handler for /tower; its choices are the towers loaded at startup
pub struct TowerHandler {
    towers: Vec<String>,
}

impl TowerHandler {
    pub fn new(towers: Vec<String>) -> Self {
        Self { towers }
    }
}

fn find_tower<'a>(ctx: &'a CommandContext, slug: &str) -> Result<&'a Tower, CommandError> {
    ctx.data
        .towers
        .get(slug)
        .ok_or_else(|| CommandError::NotFound(format!("Unknown tower **{slug}**.")))
}

async fn fetch_sheet(ctx: &CommandContext, slug: &str, tower: &Tower) -> Result<StatSheet, CommandError> {
    let url = tower
        .stats_url
        .as_deref()
        .ok_or_else(|| CommandError::Unavailable(FETCH_FAILED.into()))?;
    let body = ctx.remote.get_text(url).await.map_err(|e| {
        warn!("Stats for {slug} could not be fetched: {e:#}");
        CommandError::Unavailable(FETCH_FAILED.into())
    })?;
    Ok(StatSheet::parse(&body))
}

fn cost_lines(tower: &Tower, path: &UpgradePath) -> (String, String) {
    let upgrade = tower.upgrade_cost(path);
    let cost = [
        format!("Easy: {}", with_separators(Difficulty::Easy.price(upgrade))),
        format!("Normal: {}", with_separators(upgrade)),
        format!("Hard: {}", with_separators(Difficulty::Hard.price(upgrade))),
        format!(
            "Impoppable: {}",
            with_separators(Difficulty::Impoppable.price(upgrade))
        ),
    ];
    let total: Vec<String> = Difficulty::ALL
        .iter()
        .map(|&difficulty| {
            format!(
                "{}: {}",
                difficulty.label(),
                with_separators(tower.total_cost(path, difficulty))
            )
        })
        .collect();
    (cost.join("\n"), total.join("\n"))
}

async fn describe_path(
    ctx: &CommandContext,
    slug: &str,
    code: &str,
) -> Result<ReplyData, CommandError> {
    let path = UpgradePath::parse(code)?;
    let tower = find_tower(ctx, slug)?;
    let sheet = fetch_sheet(ctx, slug, tower).await?;
    let description = sheet
        .describe(&path)
        .ok_or_else(|| CommandError::Unavailable(PARSE_FAILED.into()))?;

    let name = display_name(slug);
    let (main, tier) = path.main();
    let title = match tower.upgrade_name(main, tier) {
        Some(upgrade) if tier > 0 => format!("{upgrade} ({} {name})", path.dashed()),
        _ => format!("{name} ({})", path.dashed()),
    };
    let (cost, total) = cost_lines(tower, &path);

    let mut embed = CreateEmbed::default();
    embed
        .colour(CYBER)
        .title(title)
        .description(description)
        .field("Cost ($)", cost, true)
        .field("Total cost ($)", total, true);

    let summary_id = TowerAction {
        tower: slug.to_string(),
    }
    .encode()
    .map_err(|_| CommandError::InvalidInput(format!("Unknown tower **{slug}**.")))?;

    let mut components = CreateComponents::default();
    components.create_action_row(|row| {
        row.create_button(|button| {
            button
                .style(ButtonStyle::Primary)
                .label("Full upgrade summary")
                .custom_id(&summary_id)
        });
        add_report_bug_button(row)
    });

    Ok(ReplyData::new()
        .embed(embed)
        .components(component_rows(components)))
}

async fn upgrade_summary(ctx: &CommandContext, slug: &str) -> Result<CreateEmbed, CommandError> {
    let tower = find_tower(ctx, slug)?;
    let sheet = fetch_sheet(ctx, slug, tower).await?;

    let mut embed = CreateEmbed::default();
    embed
        .colour(CYBER)
        .title(format!("{} (full upgrade summary)", display_name(slug)))
        .description(sheet.base_description());
    for path in single_path_upgrades() {
        let (main, tier) = path.main();
        let upgrade = tower.upgrade_name(main, tier).unwrap_or_default();
        embed.field(
            format!("{upgrade} ({})", path.code()),
            sheet.benefits(&path),
            true,
        );
    }
    Ok(embed)
}

/// The clicked message's rows with the summary button disabled
fn disable_summary_button(mut rows: Vec<Value>) -> Vec<Value> {
    match rows
        .first_mut()
        .and_then(|row| row.get_mut("components"))
        .and_then(|buttons| buttons.get_mut(0))
    {
        Some(button) => {
            button["disabled"] = Value::Bool(true);
            rows
        }
        None => {
            let mut components = CreateComponents::default();
            add_report_bug_row(&mut components);
            component_rows(components)
        }
    }
}

#[async_trait]
impl SlashCommandHandler for TowerHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["tower"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::tower::create_commands(&self.towers)
    }

    fn component_routes(&self) -> &'static [ComponentRoute] {
        &ROUTES
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let options = leaf_options(command);
        let slug = get_string_option(options, "tower").unwrap_or_default();
        let path = get_string_option(options, "path").unwrap_or_else(|| UpgradePath::BASE.code());

        Ok(into_message(describe_path(&ctx, &slug, &path).await))
    }

    async fn handle_component(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &Interaction,
        _component: &ComponentData,
        id: &CustomId,
    ) -> Result<InteractionResponse> {
        let action = TowerAction::from_custom_id(id).context("malformed tower summary id")?;
        let rows = interaction
            .message
            .as_ref()
            .map(|message| message.components.clone())
            .unwrap_or_default();

        let result = upgrade_summary(&ctx, &action.tower).await.map(|embed| {
            ReplyData::new()
                .embed(embed)
                .components(disable_summary_button(rows))
        });
        Ok(into_update(result))
    }
}
