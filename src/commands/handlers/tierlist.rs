//! Tierlist command handler
//!
//! Links the community CHIMPS tier list thread for a game major version.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, CommandError};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{self, get_integer_option, leaf_options};
use crate::interactions::model::{CommandData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub const FIRST_VERSION: u32 = 9;
pub const LATEST_VERSION: u32 = 32;

const THREAD_BASE: &str = "https://www.reddit.com/r/btd6/comments";
const THREAD_SLUG: &str = "comprehensive_tier_list_for_chimps_by_path";

/// Thread id per version, starting at [`FIRST_VERSION`]
const THREADS: [Option<&str>; 24] = [
    Some("bn7wtu"),
    None,
    Some("cv5mdi"),
    Some("d9wdk9"),
    Some("dq0xee"),
    Some("eefaum"),
    Some("f1ly0m"),
    Some("ffrkze"),
    Some("g3kiy2"),
    Some("h7iht0"),
    Some("huibn2"),
    Some("irahad"),
    Some("jp0ezq"),
    Some("knnwg9"),
    Some("lyy5v5"),
    None,
    Some("nkn8ct"),
    None,
    Some("q6f3vs"),
    Some("rc4rkm"),
    Some("sig6c0"),
    Some("ttdrdg"),
    Some("uqjt6l"),
    Some("xbyxm9"),
];

/// Tier list thread for a major version, if one was posted
pub fn tierlist_url(version: i64) -> Option<String> {
    let index = usize::try_from(version.checked_sub(i64::from(FIRST_VERSION))?).ok()?;
    let id = THREADS.get(index).copied().flatten()?;
    Some(format!("{THREAD_BASE}/{id}/{THREAD_SLUG}/"))
}

pub struct TierlistHandler;

#[async_trait]
impl SlashCommandHandler for TierlistHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["tierlist"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::tierlist::create_commands()
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let version = get_integer_option(leaf_options(command), "version").unwrap_or_default();
        let result = tierlist_url(version)
            .map(|url| ReplyData::new().content(url))
            .ok_or_else(|| CommandError::NotFound("No tierlist found for this version.".into()));
        Ok(into_message(result))
    }
}
