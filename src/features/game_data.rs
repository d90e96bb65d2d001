//! # Game Data
//!
//! Static tables loaded once at boot from `DATA_DIR` and shared read-only
//! with every handler.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Optional rounds and maps tables
//! - 1.1.0: Optional towers and temple tables
//! - 1.0.0: Tags and trivia

use anyhow::{Context, Result};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

use super::maps::MapInfo;
use super::rounds::Rounds;
use super::tags::{Tag, TagIndex};
use super::temple::TempleStats;
use super::towers::Tower;
use super::trivia::Trivia;

#[derive(Clone, Default)]
pub struct GameData {
    pub tags: TagIndex,
    pub trivia: Vec<Trivia>,
    /// Keyed by tower slug, e.g. `dart-monkey`
    pub towers: BTreeMap<String, Tower>,
    pub temple: Option<TempleStats>,
    pub rounds: Option<Rounds>,
    /// Keyed by map slug, e.g. `monkey-meadow`
    pub maps: BTreeMap<String, MapInfo>,
}

impl GameData {
    /// Load every table under `dir`
    ///
    /// A missing file leaves its table empty; a file that fails to parse or
    /// validate is an error.
    pub fn load(dir: &Path) -> Result<Self> {
        let tags: BTreeMap<String, Tag> = read_yaml(dir, "tags.yaml")?.unwrap_or_default();
        let trivia: Vec<Trivia> = read_yaml(dir, "trivia.yaml")?.unwrap_or_default();
        let towers: BTreeMap<String, Tower> = read_yaml(dir, "towers.yaml")?.unwrap_or_default();
        let temple: Option<TempleStats> = read_yaml(dir, "temple.yaml")?;

        let mut data = Self::from_tables(tags, trivia, towers, temple)?;
        data.rounds = read_yaml(dir, "rounds.yaml")?;
        data.maps = read_yaml(dir, "maps.yaml")?.unwrap_or_default();
        info!(
            "Loaded game data: {} tags, {} trivia questions, {} towers, {} maps, temple {}, rounds {}",
            data.tags.len(),
            data.trivia.len(),
            data.towers.len(),
            data.maps.len(),
            presence(data.temple.is_some()),
            presence(data.rounds.is_some())
        );
        Ok(data)
    }

    pub fn from_tables(
        tags: BTreeMap<String, Tag>,
        trivia: Vec<Trivia>,
        towers: BTreeMap<String, Tower>,
        temple: Option<TempleStats>,
    ) -> Result<Self> {
        for question in &trivia {
            question.validate()?;
        }
        if let Some(temple) = &temple {
            temple.validate()?;
        }
        Ok(Self {
            tags: TagIndex::build(tags)?,
            trivia,
            towers,
            temple,
            rounds: None,
            maps: BTreeMap::new(),
        })
    }
}

fn presence(loaded: bool) -> &'static str {
    if loaded {
        "present"
    } else {
        "missing"
    }
}

fn read_yaml<T: DeserializeOwned>(dir: &Path, file: &str) -> Result<Option<T>> {
    let path = dir.join(file);
    if !path.exists() {
        warn!("{} not found, continuing without it", path.display());
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn shipped() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    #[test]
    fn test_load_shipped_data() {
        let data = GameData::load(&shipped()).unwrap();
        assert!(!data.tags.is_empty());
        assert!(!data.trivia.is_empty());
        assert!(data.towers.contains_key("dart-monkey"));
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let dir = std::env::temp_dir().join(format!("quinze-missing-{}", uuid::Uuid::new_v4()));
        let data = GameData::load(&dir).unwrap();
        assert!(data.tags.is_empty());
        assert!(data.trivia.is_empty());
        assert!(data.towers.is_empty());
        assert!(data.temple.is_none());
        assert!(data.rounds.is_none());
        assert!(data.maps.is_empty());
    }

    #[test]
    fn test_rounds_and_maps_loaded() {
        let dir = std::env::temp_dir().join(format!("quinze-rounds-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("rounds.yaml"),
            "normal:\n  - { round: 1, contents: [\"20 Red\"], length: 10.5, rbe: 20, cash: 121 }\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("maps.yaml"),
            "logs: { length: \"1,118\", objects: 10, clear_out_cost: 2400, water_composition: None, ends: \"1 entrance, 1 exit\", version: \"1.0\" }\n",
        )
        .unwrap();

        let data = GameData::load(&dir).unwrap();
        assert_eq!(data.rounds.unwrap().normal.len(), 1);
        assert!(data.maps.contains_key("logs"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_rounds_with_gap_rejected() {
        let dir = std::env::temp_dir().join(format!("quinze-gap-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("rounds.yaml"),
            "normal:\n  - { round: 2, contents: [], length: 1.0, rbe: 1, cash: 1 }\n",
        )
        .unwrap();

        let err = GameData::load(&dir).err().unwrap();
        assert!(err.to_string().contains("rounds.yaml"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = std::env::temp_dir().join(format!("quinze-bad-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("trivia.yaml"), "- question: [unterminated").unwrap();

        let err = GameData::load(&dir).err().unwrap();
        assert!(err.to_string().contains("trivia.yaml"));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_invalid_trivia_rejected() {
        let trivia = vec![Trivia {
            question: "?".into(),
            choices: vec!["a".into()],
            answer: 0,
        }];
        assert!(GameData::from_tables(BTreeMap::new(), trivia, BTreeMap::new(), None).is_err());
    }
}
