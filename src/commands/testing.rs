//! Test doubles and fixtures shared by handler and dispatcher tests

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use super::context::CommandContext;
use crate::core::Config;
use crate::features::game_data::GameData;
use crate::features::maps::MapInfo;
use crate::features::rounds::tests::fixture_rounds;
use crate::features::tags::Tag;
use crate::features::temple::{CategoryStats, TempleStats};
use crate::features::towers::Tower;
use crate::features::trivia::Trivia;
use crate::features::{FollowupSender, RemoteSource};
use crate::interactions::model::{CommandData, ComponentData, Interaction, InteractionData};
use crate::interactions::ReplyData;

pub const INDEX_URL: &str = "https://index.test";
pub const LCD_URL: &str = "https://lcd.test";
pub const DART_STATS_URL: &str = "https://stats.test/dart-monkey";
pub const INVOKER: &str = "100";
pub const STRANGER: &str = "200";

/// Canned responses keyed by URL; unknown URLs fail like a 404
#[derive(Default)]
pub struct FakeRemote {
    json: HashMap<String, Value>,
    text: HashMap<String, String>,
    pub calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeRemote {
    pub fn with_json(mut self, url: &str, body: Value) -> Self {
        self.json.insert(url.to_string(), body);
        self
    }

    pub fn with_text(mut self, url: &str, body: &str) -> Self {
        self.text.insert(url.to_string(), body.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, url: &str, query: &[(&str, String)]) {
        let query = query
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();
        self.calls.lock().unwrap().push((url.to_string(), query));
    }
}

#[async_trait]
impl RemoteSource for FakeRemote {
    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<Value> {
        self.record(url, query);
        self.json
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("{url} returned HTTP 404 Not Found"))
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        self.record(url, &[]);
        self.text
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow!("{url} returned HTTP 404 Not Found"))
    }
}

/// Keeps followups in memory instead of posting them
#[derive(Default)]
pub struct RecordingFollowups {
    pub sent: Mutex<Vec<(String, Value)>>,
}

impl RecordingFollowups {
    pub fn sent(&self) -> Vec<(String, Value)> {
        self.sent.lock().unwrap().clone()
    }
}

impl FollowupSender for RecordingFollowups {
    fn send(&self, token: &str, data: ReplyData) {
        self.sent
            .lock()
            .unwrap()
            .push((token.to_string(), data.to_json()));
    }
}

pub fn test_config() -> Config {
    Config::from_lookup(|key| {
        let value = match key {
            "CLIENT_ID" => "1234",
            "CLIENT_SECRET" => "secret",
            "PUBLIC_KEY" => "00",
            "INDEX_API_URL" => INDEX_URL,
            "LCD_API_URL" => LCD_URL,
            _ => return None,
        };
        Some(value.to_string())
    })
    .unwrap()
}

fn category(name: &str) -> CategoryStats {
    CategoryStats {
        header: format!("{name} header"),
        levels: (1..=9).map(|level| format!("{name} level {level}")).collect(),
        tsg: format!("{name} tsg"),
    }
}

pub fn fixture_data() -> GameData {
    let tags: BTreeMap<String, Tag> =
        serde_yaml::from_str(include_str!("../../data/tags.yaml")).unwrap();

    let trivia = vec![Trivia {
        question: "Which tower pops lead?".into(),
        choices: vec![
            "Bomb Shooter".into(),
            "Dart Monkey".into(),
            "Boomerang Monkey".into(),
            "Tack Shooter".into(),
        ],
        answer: 0,
    }];

    let mut towers: BTreeMap<String, Tower> =
        serde_yaml::from_str(include_str!("../../data/towers.yaml")).unwrap();
    if let Some(dart) = towers.get_mut("dart-monkey") {
        dart.stats_url = Some(DART_STATS_URL.to_string());
    }

    let temple = TempleStats {
        primary: category("primary"),
        military: category("military"),
        magic: category("magic"),
        support: category("support"),
    };

    let mut data = GameData::from_tables(tags, trivia, towers, Some(temple)).unwrap();
    data.rounds = Some(fixture_rounds());
    data.maps = BTreeMap::from([(
        "monkey-meadow".to_string(),
        MapInfo {
            length: "1,000".into(),
            objects: 14,
            clear_out_cost: 2450,
            water_composition: "None".into(),
            ends: "1 entrance, 1 exit".into(),
            version: "1.0".into(),
        },
    )]);
    data
}

pub fn context_with(remote: FakeRemote) -> (Arc<CommandContext>, Arc<RecordingFollowups>) {
    context_sharing(Arc::new(remote))
}

/// Like [`context_with`], keeping a handle on the remote to inspect its calls
pub fn context_sharing(remote: Arc<FakeRemote>) -> (Arc<CommandContext>, Arc<RecordingFollowups>) {
    let followups = Arc::new(RecordingFollowups::default());
    let ctx = CommandContext::new(
        test_config(),
        fixture_data(),
        remote as Arc<dyn RemoteSource>,
        Arc::clone(&followups) as Arc<dyn FollowupSender>,
    );
    (Arc::new(ctx), followups)
}

pub fn context() -> Arc<CommandContext> {
    context_with(FakeRemote::default()).0
}

/// A slash command invocation by [`INVOKER`]
pub fn command_interaction(name: &str, options: Value) -> Interaction {
    serde_json::from_value(json!({
        "type": 2,
        "id": "1",
        "application_id": "1234",
        "token": "command-token",
        "member": { "user": { "id": INVOKER, "username": "quincy" } },
        "data": { "id": "9", "name": name, "options": options }
    }))
    .unwrap()
}

/// A click by `clicker` on a message created by [`INVOKER`] running `origin`
pub fn component_interaction(
    origin: &str,
    clicker: &str,
    custom_id: &str,
    values: &[&str],
    components: Value,
) -> Interaction {
    let component_type = if values.is_empty() { 2 } else { 3 };
    serde_json::from_value(json!({
        "type": 3,
        "id": "2",
        "application_id": "1234",
        "token": "component-token",
        "member": { "user": { "id": clicker, "username": "someone" } },
        "message": {
            "id": "m1",
            "content": "",
            "components": components,
            "interaction": { "name": origin, "user": { "id": INVOKER, "username": "quincy" } }
        },
        "data": { "custom_id": custom_id, "component_type": component_type, "values": values }
    }))
    .unwrap()
}

/// Subcommand wrapper for option lists
pub fn subcommand(name: &str, options: Value) -> Value {
    json!([{ "name": name, "type": 1, "options": options }])
}

pub fn command_data(interaction: &Interaction) -> &CommandData {
    match &interaction.data {
        InteractionData::Command(data) => data,
        other => panic!("expected a command interaction, got {other:?}"),
    }
}

pub fn component_data(interaction: &Interaction) -> &ComponentData {
    match &interaction.data {
        InteractionData::Component(data) => data,
        other => panic!("expected a component interaction, got {other:?}"),
    }
}
