//! Map command handler
//!
//! Handles: map
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.4.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::builder::{CreateApplicationCommand, CreateComponents, CreateEmbed};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, CommandError};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{self, get_string_option, leaf_options};
use crate::core::embeds::{add_report_bug_row, component_rows, CYBER};
use crate::features::maps::{closest, MapInfo};
use crate::features::towers::display_name;
use crate::interactions::model::{CommandData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub const MAPS_UNAVAILABLE: &str = "Map data is not available right now.";

pub struct MapHandler;

pub fn map_embed(name: &str, map: &MapInfo) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed
        .colour(CYBER)
        .title(display_name(name))
        .field("Map length (RBS)", &map.length, true)
        .field("Object count", map.objects, true)
        .field("Complete removal cost", map.clear_out_cost, true)
        .field("Water composition", &map.water_composition, true)
        .field("Entrances and exits", &map.ends, true)
        .field("Version added", &map.version, true);
    embed
}

#[async_trait]
impl SlashCommandHandler for MapHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["map"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::map::create_commands()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let query = get_string_option(leaf_options(command), "map").unwrap_or_default();

        let reply = closest(&ctx.data.maps, &query)
            .ok_or_else(|| CommandError::Unavailable(MAPS_UNAVAILABLE.into()))
            .map(|(name, map)| {
                debug!("Map query {query:?} matched {name}");
                let mut components = CreateComponents::default();
                add_report_bug_row(&mut components);
                ReplyData::new()
                    .embed(map_embed(name, map))
                    .components(component_rows(components))
            });

        Ok(into_message(reply))
    }
}
