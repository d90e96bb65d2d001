//! # Challenge Index
//!
//! Completed-challenge records served by the community index APIs: two-tower
//! CHIMPS (2TC), two megapops CHIMPS (2MPC), least cash CHIMPS (LCC) and least
//! cost deflation (LCD). This module owns the entry models, the search filters
//! each index accepts and the embeds/components shown for them. Fetching
//! happens in the command handler.
//!
//! Paging state lives in the page buttons' custom ids as
//! `<jump>:<filter>...:<page>`; the entry select is just `entry`.
//!
//! - **Version**: 1.4.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.4.0: Filter length derived from the custom-id budget; paging through `bump_page`
//! - 1.3.0: LCD index on its own API
//! - 1.2.0: Entry select menu on every index
//! - 1.1.0: Typed custom-id state
//! - 1.0.0: 2TC search and view

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use serenity::builder::{CreateComponents, CreateEmbed};
use serenity::model::application::component::ButtonStyle;

use crate::commands::error::CommandError;
use crate::core::embeds::{component_rows, markdown_link, short_date, CYBER};
use crate::core::truncate_for_select;
use crate::core::Config;
use crate::features::pagination::Page;
use crate::interactions::custom_id::{
    bump_page, ComponentState, CustomId, CustomIdError, DELIMITER, MAX_LEN,
};
use crate::interactions::ReplyData;

pub const ENTRY_SELECT: &str = "entry";

/// Page numbers up to this many digits always fit in a page button's id
pub const MAX_PAGE_DIGITS: usize = 4;

/// A search filter: slash-command option, query parameter and embed label
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub option: &'static str,
    pub param: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const MAP: Filter = Filter {
    option: "map",
    param: "map",
    label: "Map",
    description: "The map the entry was on",
};
const PLAYER: Filter = Filter {
    option: "player",
    param: "player",
    label: "Player",
    description: "The player who completed the entry",
};
const VERSION: Filter = Filter {
    option: "version",
    param: "version",
    label: "Version",
    description: "The version of the game the entry was completed in",
};

const TWO_TC_FILTERS: [Filter; 5] = [
    Filter {
        option: "tower-1",
        param: "tower_1",
        label: "Tower 1",
        description: "The first tower in the combo",
    },
    Filter {
        option: "tower-2",
        param: "tower_2",
        label: "Tower 2",
        description: "The second tower in the combo",
    },
    MAP,
    PLAYER,
    VERSION,
];

const TWO_MPC_FILTERS: [Filter; 4] = [
    Filter {
        option: "tower",
        param: "tower",
        label: "Tower",
        description: "The tower in the challenge",
    },
    MAP,
    PLAYER,
    VERSION,
];

const LEAST_CASH_FILTERS: [Filter; 2] = [PLAYER, VERSION];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    TwoTc,
    TwoMpc,
    Lcc,
    Lcd,
}

impl IndexKind {
    pub const ALL: [IndexKind; 4] = [
        IndexKind::TwoTc,
        IndexKind::TwoMpc,
        IndexKind::Lcc,
        IndexKind::Lcd,
    ];

    pub fn command(self) -> &'static str {
        match self {
            IndexKind::TwoTc => "2tc",
            IndexKind::TwoMpc => "2mpc",
            IndexKind::Lcc => "lcc",
            IndexKind::Lcd => "lcd",
        }
    }

    pub fn from_command(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.command() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            IndexKind::TwoTc => "2TC",
            IndexKind::TwoMpc => "2MPC",
            IndexKind::Lcc => "LCC",
            IndexKind::Lcd => "LCD",
        }
    }

    pub fn filters(self) -> &'static [Filter] {
        match self {
            IndexKind::TwoTc => &TWO_TC_FILTERS,
            IndexKind::TwoMpc => &TWO_MPC_FILTERS,
            IndexKind::Lcc | IndexKind::Lcd => &LEAST_CASH_FILTERS,
        }
    }

    /// 2TC and 2MPC entries are viewed by number, LCC and LCD by map
    pub fn views_by_number(self) -> bool {
        matches!(self, IndexKind::TwoTc | IndexKind::TwoMpc)
    }

    pub fn endpoint(self, config: &Config) -> String {
        let base = match self {
            IndexKind::Lcd => &config.lcd_api_url,
            _ => &config.index_api_url,
        };
        format!("{base}/index/{}", self.command())
    }

    /// Longest free-text filter that keeps every page button's custom id
    /// within [`MAX_LEN`], with every filter at this length
    pub fn max_filter_length(self) -> usize {
        let filters = self.filters().len();
        let key = PageJump::ALL
            .iter()
            .map(|jump| jump.key().len())
            .max()
            .unwrap_or_default();
        // one delimiter before each filter and one before the page
        let fixed = key + filters + 1 + MAX_PAGE_DIGITS;
        MAX_LEN.saturating_sub(fixed) / filters
    }

    pub fn fetch_failed(self) -> CommandError {
        CommandError::Unavailable(format!("Failed to fetch {} Index entries.", self.label()))
    }
}

/// Query parameters for the non-empty filters, in declaration order
pub fn filter_query(kind: IndexKind, values: &[String]) -> Vec<(&'static str, String)> {
    kind.filters()
        .iter()
        .zip(values)
        .filter(|(_, value)| !value.is_empty())
        .map(|(filter, value)| (filter.param, value.clone()))
        .collect()
}

/// Reject free-text filters that would corrupt the page buttons' custom ids
pub fn check_filters(values: &[String]) -> Result<(), CommandError> {
    if values.iter().any(|value| value.contains(DELIMITER)) {
        return Err(CommandError::InvalidInput(format!(
            "Search filters cannot contain `{DELIMITER}`."
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub text: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TowerPick {
    pub name: String,
    #[serde(default)]
    pub upgrade: String,
}

impl TowerPick {
    fn describe(&self) -> String {
        if self.upgrade.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.upgrade)
        }
    }
}

/// Whether the strategy still works on the current version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Value")]
pub enum EntryState {
    Alive,
    Dead,
    #[default]
    Unknown,
}

impl From<Value> for EntryState {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) if n.as_i64() == Some(0) => EntryState::Alive,
            Value::Number(n) if n.as_i64() == Some(1) => EntryState::Dead,
            Value::String(s) if s.eq_ignore_ascii_case("alive") => EntryState::Alive,
            Value::String(s) if s.eq_ignore_ascii_case("dead") => EntryState::Dead,
            _ => EntryState::Unknown,
        }
    }
}

impl EntryState {
    pub fn label(self) -> &'static str {
        match self {
            EntryState::Alive => "✅",
            EntryState::Dead => "❌",
            EntryState::Unknown => "Unknown",
        }
    }
}

/// Accept a JSON string or number as text
fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Millisecond timestamps arrive as integers or floats
fn millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f as i64))
        .unwrap_or_default())
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwoTcEntry {
    pub number: u32,
    pub towers: Vec<TowerPick>,
    pub map: String,
    #[serde(deserialize_with = "text")]
    pub version: String,
    #[serde(deserialize_with = "millis")]
    pub date: i64,
    pub player: String,
    pub link: Link,
    #[serde(default)]
    pub state: EntryState,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl TwoTcEntry {
    fn tower(&self, index: usize) -> Option<&TowerPick> {
        self.towers.get(index)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TwoMpcEntry {
    pub number: u32,
    pub tower: TowerPick,
    pub map: String,
    #[serde(deserialize_with = "text")]
    pub version: String,
    #[serde(deserialize_with = "millis")]
    pub date: i64,
    pub player: String,
    pub link: Link,
    #[serde(default)]
    pub notes: Vec<String>,
}

/// LCC and LCD share one record shape
#[derive(Debug, Clone, Deserialize)]
pub struct LeastCashEntry {
    pub map: String,
    #[serde(deserialize_with = "text")]
    pub cost: String,
    #[serde(deserialize_with = "text")]
    pub version: String,
    #[serde(deserialize_with = "millis")]
    pub date: i64,
    pub player: String,
    pub link: Link,
    #[serde(default)]
    pub state: EntryState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub label: String,
    pub description: String,
    pub value: String,
}

/// Alternate maps are the part of each note before its first ':'
fn alternate_maps(notes: &[String]) -> String {
    let maps: Vec<&str> = notes
        .iter()
        .filter_map(|note| note.split(':').next())
        .map(str::trim)
        .filter(|map| !map.is_empty())
        .collect();
    if maps.is_empty() {
        "None".to_string()
    } else {
        maps.join(", ")
    }
}

pub trait IndexEntry: DeserializeOwned + Send {
    /// The two kind-specific columns of the search table, heading then cell
    fn columns(&self) -> [(&'static str, String); 2];

    fn link(&self) -> &Link;

    fn player(&self) -> &str;

    fn select_option(&self) -> SelectOption;

    /// Full embed for a single entry
    fn view(&self, kind: IndexKind) -> CreateEmbed;
}

fn view_base(title: String) -> CreateEmbed {
    let mut embed = CreateEmbed::default();
    embed.colour(CYBER).title(title);
    embed
}

impl IndexEntry for TwoTcEntry {
    fn columns(&self) -> [(&'static str, String); 2] {
        let describe = |index| self.tower(index).map(TowerPick::describe).unwrap_or_default();
        [("Tower 1", describe(0)), ("Tower 2", describe(1))]
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn select_option(&self) -> SelectOption {
        let name = |index| self.tower(index).map(|t| t.name.as_str()).unwrap_or("?");
        SelectOption {
            label: format!("{} + {}", name(0), name(1)),
            description: format!("Entry #{} | {}", self.number, self.player),
            value: self.number.to_string(),
        }
    }

    fn view(&self, kind: IndexKind) -> CreateEmbed {
        let name = |index| self.tower(index).map(|t| t.name.clone()).unwrap_or_default();
        let mut embed = view_base(format!("{} Index Entry #{}", kind.label(), self.number));
        embed
            .field("Tower 1", name(0), true)
            .field("Tower 2", name(1), true)
            .field("Map", &self.map, true)
            .field("Version", &self.version, true)
            .field("Date", short_date(self.date), true)
            .field("Player", &self.player, true)
            .field("Link", markdown_link(self.link.text.as_deref(), &self.link.url), true)
            .field("Current state", self.state.label(), true)
            .field("Alternate maps", alternate_maps(&self.notes), false);
        embed
    }
}

impl IndexEntry for TwoMpcEntry {
    fn columns(&self) -> [(&'static str, String); 2] {
        [("Tower", self.tower.describe()), ("Map", self.map.clone())]
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn select_option(&self) -> SelectOption {
        SelectOption {
            label: self.tower.name.clone(),
            description: format!("Entry #{} | {}", self.number, self.player),
            value: self.number.to_string(),
        }
    }

    fn view(&self, kind: IndexKind) -> CreateEmbed {
        let mut embed = view_base(format!("{} Index Entry #{}", kind.label(), self.number));
        embed
            .field("Tower", &self.tower.name, true)
            .field("Map", &self.map, true)
            .field("Version", &self.version, true)
            .field("Date", short_date(self.date), true)
            .field("Player", &self.player, true)
            .field("Link", markdown_link(self.link.text.as_deref(), &self.link.url), true)
            .field("Alternate maps", alternate_maps(&self.notes), false);
        embed
    }
}

impl IndexEntry for LeastCashEntry {
    fn columns(&self) -> [(&'static str, String); 2] {
        [("Map", self.map.clone()), ("Cost", self.cost.clone())]
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn player(&self) -> &str {
        &self.player
    }

    fn select_option(&self) -> SelectOption {
        SelectOption {
            label: format!("{}: {}", self.map, self.cost),
            description: self.player.clone(),
            value: self.map.clone(),
        }
    }

    fn view(&self, kind: IndexKind) -> CreateEmbed {
        let mut embed = view_base(format!("{} Index Entry for {}", kind.label(), self.map));
        embed
            .field("Map", &self.map, true)
            .field("Cost", &self.cost, true)
            .field("Version", &self.version, true)
            .field("Date", short_date(self.date), true)
            .field("Player", &self.player, true)
            .field("Link", markdown_link(self.link.text.as_deref(), &self.link.url), true)
            .field("Current state", self.state.label(), false);
        embed
    }
}

/// Page navigation buttons, left to right
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageJump {
    Back5,
    Back,
    Forward,
    Forward5,
}

impl PageJump {
    pub const ALL: [PageJump; 4] = [
        PageJump::Back5,
        PageJump::Back,
        PageJump::Forward,
        PageJump::Forward5,
    ];

    pub fn key(self) -> &'static str {
        match self {
            PageJump::Back5 => "prev5",
            PageJump::Back => "prev",
            PageJump::Forward => "next",
            PageJump::Forward5 => "next5",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|jump| jump.key() == key)
    }

    pub fn delta(self) -> i64 {
        match self {
            PageJump::Back5 => -5,
            PageJump::Back => -1,
            PageJump::Forward => 1,
            PageJump::Forward5 => 5,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PageJump::Back5 => "⏪",
            PageJump::Back => "◀️",
            PageJump::Forward => "▶️",
            PageJump::Forward5 => "⏩",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexAction {
    /// A page button; `page` is the page the message was showing
    Page {
        jump: PageJump,
        filters: Vec<String>,
        page: i64,
    },
    /// The entry select menu
    Entry,
}

impl IndexAction {
    /// The state after following a page button: same filters, page moved by
    /// the jump and not yet clamped. `None` for the entry select.
    pub fn followed(&self) -> Option<Result<Self, CustomIdError>> {
        let IndexAction::Page { jump, .. } = self else {
            return None;
        };
        let id = self.to_custom_id();
        let page_index = id.args.len().saturating_sub(1);
        Some(
            bump_page(&id.args, page_index, jump.delta()).and_then(|args| {
                Self::from_custom_id(&CustomId {
                    key: id.key.clone(),
                    args,
                })
            }),
        )
    }
}

impl ComponentState for IndexAction {
    fn to_custom_id(&self) -> CustomId {
        match self {
            IndexAction::Page {
                jump,
                filters,
                page,
            } => CustomId::new(jump.key()).args(filters).arg(page),
            IndexAction::Entry => CustomId::new(ENTRY_SELECT),
        }
    }

    fn from_custom_id(id: &CustomId) -> Result<Self, CustomIdError> {
        if id.key == ENTRY_SELECT {
            return Ok(IndexAction::Entry);
        }
        let jump =
            PageJump::from_key(&id.key).ok_or_else(|| CustomIdError::UnknownKey(id.key.clone()))?;
        let (page, filters) = id.args.split_last().ok_or(CustomIdError::MissingField(0))?;
        let page = page
            .parse()
            .map_err(|_| CustomIdError::InvalidNumber(page.clone()))?;
        Ok(IndexAction::Page {
            jump,
            filters: filters.to_vec(),
            page,
        })
    }
}

/// Render one page of search results
///
/// `filters` holds one value per filter of `kind`, empty when unused.
pub fn render_search<E: IndexEntry>(
    kind: IndexKind,
    filters: &[String],
    entries: &[E],
    requested_page: i64,
) -> Result<ReplyData, CommandError> {
    let page = Page::clamp(requested_page, entries.len()).ok_or_else(|| {
        CommandError::NotFound(format!(
            "No {} Index entries match those filters.",
            kind.label()
        ))
    })?;
    let shown = page.slice(entries);

    let description: Vec<String> = kind
        .filters()
        .iter()
        .zip(filters)
        .filter(|(_, value)| !value.is_empty())
        .map(|(filter, value)| format!("{}: {value}", filter.label))
        .collect();

    let rows: Vec<[(&'static str, String); 2]> = shown.iter().map(IndexEntry::columns).collect();
    let column = |index: usize| -> (&'static str, String) {
        let heading = rows.first().map(|row| row[index].0).unwrap_or_default();
        let cells: Vec<&str> = rows.iter().map(|row| row[index].1.as_str()).collect();
        (heading, cells.join("\n"))
    };
    let links: Vec<String> = shown
        .iter()
        .map(|entry| {
            let link = entry.link();
            match &link.text {
                Some(text) if !text.is_empty() => {
                    format!("[{text}]({} \"{}\")", link.url, entry.player())
                }
                _ => link.url.clone(),
            }
        })
        .collect();

    let mut embed = CreateEmbed::default();
    let (first_heading, first_cells) = column(0);
    let (second_heading, second_cells) = column(1);
    embed
        .colour(CYBER)
        .title(format!("{} Index Entries", kind.label()))
        .field("Number of entries", page.range_label(), false)
        .field(first_heading, first_cells, true)
        .field(second_heading, second_cells, true)
        .field("Link", links.join("\n"), true);
    if !description.is_empty() {
        embed.description(description.join("\n"));
    }

    let mut button_ids = Vec::with_capacity(PageJump::ALL.len());
    for jump in PageJump::ALL {
        let action = IndexAction::Page {
            jump,
            filters: filters.to_vec(),
            page: page.number as i64,
        };
        let id = action.encode().map_err(|_| {
            CommandError::InvalidInput(
                "Those search filters are too long to page through. Try shorter ones.".to_string(),
            )
        })?;
        button_ids.push((jump, id));
    }

    let options: Vec<SelectOption> = shown.iter().map(IndexEntry::select_option).collect();

    let mut components = CreateComponents::default();
    components
        .create_action_row(|row| {
            row.create_select_menu(|menu| {
                menu.custom_id(ENTRY_SELECT)
                    .placeholder("View an entry")
                    .options(|list| {
                        for option in &options {
                            list.create_option(|o| {
                                o.label(truncate_for_select(&option.label))
                                    .value(&option.value)
                                    .description(truncate_for_select(&option.description))
                            });
                        }
                        list
                    })
            })
        })
        .create_action_row(|row| {
            for (jump, id) in &button_ids {
                let disabled = match jump {
                    PageJump::Back5 | PageJump::Back => page.is_first(),
                    PageJump::Forward | PageJump::Forward5 => page.is_last(),
                };
                row.create_button(|button| {
                    button
                        .style(ButtonStyle::Primary)
                        .label(jump.label())
                        .custom_id(id)
                        .disabled(disabled)
                });
            }
            row
        });

    Ok(ReplyData::new()
        .embed(embed)
        .components(component_rows(components)))
}

/// Render a single entry, clearing the search components
pub fn render_entry<E: IndexEntry>(kind: IndexKind, entry: &E) -> ReplyData {
    ReplyData::new().embed(entry.view(kind)).components(Vec::new())
}

/// Entry `number` (1-based) of the full 2TC/2MPC list
pub fn entry_by_number<E>(kind: IndexKind, entries: Vec<E>, number: i64) -> Result<E, CommandError> {
    usize::try_from(number)
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| entries.into_iter().nth(index))
        .ok_or_else(|| {
            CommandError::NotFound(format!(
                "No {} Index entry found for number {number}.",
                kind.label()
            ))
        })
}

/// First LCC/LCD entry returned for a map query
pub fn entry_for_map<E>(kind: IndexKind, entries: Vec<E>, map: &str) -> Result<E, CommandError> {
    entries.into_iter().next().ok_or_else(|| {
        CommandError::NotFound(format!("No {} Index entry found on map {map}.", kind.label()))
    })
}
