//! Tag command handler
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, CommandError};
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::{self, get_string_option, leaf_options};
use crate::features::tags::TagIndex;
use crate::interactions::model::{CommandData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

pub struct TagHandler;

#[async_trait]
impl SlashCommandHandler for TagHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["tag"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::tag::create_commands()
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        _interaction: &Interaction,
        command: &CommandData,
    ) -> Result<InteractionResponse> {
        let query = get_string_option(leaf_options(command), "query").unwrap_or_default();
        Ok(into_message(render_tag(&ctx.data.tags, &query)))
    }
}

fn render_tag(tags: &TagIndex, query: &str) -> Result<ReplyData, CommandError> {
    let (name, tag) = tags.lookup(query).ok_or_else(|| {
        CommandError::NotFound(format!("Couldn't find a tag with the name **{query}**."))
    })?;
    debug!("Tag query '{query}' resolved to '{name}'");

    let mut reply = ReplyData::new();
    if let Some(content) = &tag.content {
        reply = reply.content(content.trim_end());
    }
    for embed in &tag.embeds {
        reply = reply.embed(embed.to_embed());
    }
    Ok(reply)
}
