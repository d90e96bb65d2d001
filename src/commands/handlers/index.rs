//! Challenge index command handlers
//!
//! Handles: 2tc, 2mpc, lcc, lcd
//!
//! Searches hit the index API with the filters the user gave and show ten
//! entries per page. The page buttons carry the filters forward in their
//! custom ids, so every click refetches and re-renders without any state
//! kept on our side.
//!
//! - **Version**: 1.2.1
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.1: Page buttons follow the bumped custom id
//! - 1.2.0: LCD index
//! - 1.1.0: Entry select menu
//! - 1.0.0: 2TC search, view and paging

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, warn};
use serenity::builder::CreateApplicationCommand;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::error::{into_message, into_update, CommandError};
use crate::commands::handler::{ComponentRoute, SlashCommandHandler};
use crate::commands::slash::{self, get_integer_option, get_string_option, leaf_options};
use crate::features::index::{
    check_filters, entry_by_number, entry_for_map, filter_query, render_entry, render_search,
    IndexAction, IndexEntry, IndexKind, LeastCashEntry, TwoMpcEntry, TwoTcEntry,
};
use crate::interactions::custom_id::{ComponentState, CustomId};
use crate::interactions::model::{CommandData, ComponentData, Interaction};
use crate::interactions::{InteractionResponse, ReplyData};

const ROUTES: [ComponentRoute; 5] = [
    ComponentRoute::invoker("prev5"),
    ComponentRoute::invoker("prev"),
    ComponentRoute::invoker("next"),
    ComponentRoute::invoker("next5"),
    ComponentRoute::invoker("entry"),
];

/// How a single entry is picked out
enum EntryKey {
    Number(i64),
    Map(String),
}

/// Handler for the four challenge index commands
pub struct IndexHandler;

#[async_trait]
impl SlashCommandHandler for IndexHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["2tc", "2mpc", "lcc", "lcd"]
    }

    fn declarations(&self) -> Vec<CreateApplicationCommand> {
        slash::index::create_commands()
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
        let kind = IndexKind::from_command(&command.name)
            .with_context(|| format!("'{}' is not an index command", command.name))?;
        let options = leaf_options(command);

        let result = if command.subcommand() == Some("view") {
            let key = if kind.views_by_number() {
                EntryKey::Number(get_integer_option(options, "number").unwrap_or_default())
            } else {
                EntryKey::Map(get_string_option(options, "map").unwrap_or_default())
            };
            view(&ctx, kind, key).await
        } else {
            let filters: Vec<String> = kind
                .filters()
                .iter()
                .map(|filter| get_string_option(options, filter.option).unwrap_or_default())
                .collect();
            match check_filters(&filters) {
                Ok(()) => search(&ctx, kind, &filters, 1).await,
                Err(e) => Err(e),
            }
        };

        Ok(into_message(result))
    }

    async fn handle_component(
        &self,
        ctx: Arc<CommandContext>,
        interaction: &Interaction,
        component: &ComponentData,
        id: &CustomId,
    ) -> Result<InteractionResponse> {
        let origin = interaction
            .message
            .as_ref()
            .and_then(|message| message.origin_command())
            .unwrap_or_default();
        let kind = IndexKind::from_command(origin)
            .with_context(|| format!("'{origin}' is not an index command"))?;
        let action = IndexAction::from_custom_id(id)
            .with_context(|| format!("malformed {} custom id", kind.label()))?;

        let result = match &action {
            IndexAction::Entry => {
                if !component.is_select() {
                    return Ok(InteractionResponse::deferred_update());
                }
                let Some(value) = component.values.first() else {
                    return Ok(InteractionResponse::deferred_update());
                };
                let key = if kind.views_by_number() {
                    EntryKey::Number(value.parse().unwrap_or_default())
                } else {
                    EntryKey::Map(value.clone())
                };
                view(&ctx, kind, key).await
            }
            IndexAction::Page { .. } => {
                let followed = action
                    .followed()
                    .transpose()
                    .with_context(|| format!("unpageable {} custom id", kind.label()))?;
                let Some(IndexAction::Page { filters, page, .. }) = followed else {
                    return Ok(InteractionResponse::deferred_update());
                };
                debug!("{} search moving to page {page}", kind.label());
                search(&ctx, kind, &filters, page).await
            }
        };

        Ok(into_update(result))
    }
}

async fn search(
    ctx: &CommandContext,
    kind: IndexKind,
    filters: &[String],
    page: i64,
) -> Result<ReplyData, CommandError> {
    match kind {
        IndexKind::TwoTc => search_as::<TwoTcEntry>(ctx, kind, filters, page).await,
        IndexKind::TwoMpc => search_as::<TwoMpcEntry>(ctx, kind, filters, page).await,
        IndexKind::Lcc | IndexKind::Lcd => {
            search_as::<LeastCashEntry>(ctx, kind, filters, page).await
        }
    }
}

async fn view(ctx: &CommandContext, kind: IndexKind, key: EntryKey) -> Result<ReplyData, CommandError> {
    match kind {
        IndexKind::TwoTc => view_as::<TwoTcEntry>(ctx, kind, key).await,
        IndexKind::TwoMpc => view_as::<TwoMpcEntry>(ctx, kind, key).await,
        IndexKind::Lcc | IndexKind::Lcd => view_as::<LeastCashEntry>(ctx, kind, key).await,
    }
}

async fn search_as<E: IndexEntry>(
    ctx: &CommandContext,
    kind: IndexKind,
    filters: &[String],
    page: i64,
) -> Result<ReplyData, CommandError> {
    let entries: Vec<E> = fetch(ctx, kind, &filter_query(kind, filters)).await?;
    render_search(kind, filters, &entries, page)
}

async fn view_as<E: IndexEntry>(
    ctx: &CommandContext,
    kind: IndexKind,
    key: EntryKey,
) -> Result<ReplyData, CommandError> {
    let entry: E = match key {
        EntryKey::Number(number) => entry_by_number(kind, fetch(ctx, kind, &[]).await?, number)?,
        EntryKey::Map(map) => {
            let entries = fetch(ctx, kind, &[("map", map.clone())]).await?;
            entry_for_map(kind, entries, &map)?
        }
    };
    Ok(render_entry(kind, &entry))
}

async fn fetch<E: IndexEntry>(
    ctx: &CommandContext,
    kind: IndexKind,
    query: &[(&str, String)],
) -> Result<Vec<E>, CommandError> {
    let url = kind.endpoint(&ctx.config);
    let body = ctx.remote.get_json(&url, query).await.map_err(|e| {
        warn!("{} index request failed: {e:#}", kind.label());
        kind.fetch_failed()
    })?;
    serde_json::from_value(body).map_err(|e| {
        warn!("{} index returned unexpected data: {e}", kind.label());
        kind.fetch_failed()
    })
}
