//! # Towers
//!
//! Upgrade-path math, difficulty pricing and parsing of the per-tower stat
//! dumps shown by /tower.
//!
//! Paths are written as three digits, one tier (0-5) per upgrade path, e.g.
//! `205`. The dumps are plain text split into blocks by blank CRLF lines; each
//! block starts with the three-digit path it describes.
//!
//! - **Version**: 1.2.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.2.0: Full upgrade summary parsing
//! - 1.1.0: Crosspath-aware total cost
//! - 1.0.0: Path validation and difficulty multipliers

use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::commands::error::CommandError;
use crate::core::response::group_digits;

/// Emoji prefixed to each line of the upgrade summary
pub const BULLET: &str = "<:_:875985515357282316>";

const BLOCK_SEPARATOR: &str = "\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Impoppable,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Impoppable,
    ];

    pub fn multiplier(self) -> f64 {
        match self {
            Difficulty::Easy => 0.85,
            Difficulty::Medium => 1.0,
            Difficulty::Hard => 1.08,
            Difficulty::Impoppable => 1.2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
            Difficulty::Impoppable => "Impoppable",
        }
    }

    /// Scale a base price and round to the nearest 5
    pub fn price(self, base: u64) -> u64 {
        ((base as f64 * self.multiplier()) / 5.0).round() as u64 * 5
    }
}

/// Static data for one tower
#[derive(Debug, Clone, Deserialize)]
pub struct Tower {
    /// Plain-text stat dump for every upgrade combination
    pub stats_url: Option<String>,
    pub cost: u64,
    /// Upgrade prices, one row per path, tiers 1-5
    pub upgrades: [[u64; 5]; 3],
    /// Upgrade names, one row per path, tiers 1-5
    pub names: [[String; 5]; 3],
}

impl Tower {
    pub fn upgrade_name(&self, path: usize, tier: u8) -> Option<&str> {
        let tier = usize::from(tier).checked_sub(1)?;
        self.names
            .get(path.checked_sub(1)?)
            .and_then(|row| row.get(tier))
            .map(String::as_str)
    }

    /// Price of the last upgrade bought on the main path, or the base cost for 000
    pub fn upgrade_cost(&self, path: &UpgradePath) -> u64 {
        let (main, tier) = path.main();
        if tier == 0 {
            return self.cost;
        }
        self.upgrades[main - 1][usize::from(tier) - 1]
    }

    /// Base cost plus every upgrade up to this path, priced per difficulty
    ///
    /// Each purchase is rounded individually, as the game does.
    pub fn total_cost(&self, path: &UpgradePath, difficulty: Difficulty) -> u64 {
        let (main, tier) = path.main();
        let (cross, cross_tier) = path.cross();

        let main_row = &self.upgrades[main - 1][..usize::from(tier)];
        let cross_row = &self.upgrades[cross - 1][..usize::from(cross_tier)];

        difficulty.price(self.cost)
            + main_row
                .iter()
                .chain(cross_row)
                .map(|&price| difficulty.price(price))
                .sum::<u64>()
    }
}

/// A validated three-digit upgrade path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpgradePath([u8; 3]);

impl UpgradePath {
    pub const BASE: UpgradePath = UpgradePath([0, 0, 0]);

    /// Parse and validate a path code
    ///
    /// Tiers must be 0-5, at most two paths may be upgraded and at most one of
    /// them past tier 2.
    pub fn parse(code: &str) -> Result<Self, CommandError> {
        let invalid = || CommandError::InvalidInput(format!("The path **{code}** is invalid."));

        let digits: Vec<u8> = code
            .chars()
            .map(|c| c.to_digit(10).map(|d| d as u8))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        let tiers: [u8; 3] = digits.try_into().map_err(|_| invalid())?;

        if tiers.iter().any(|&tier| tier > 5) {
            return Err(invalid());
        }
        if tiers.iter().filter(|&&tier| tier > 0).count() > 2 {
            return Err(invalid());
        }
        if tiers.iter().filter(|&&tier| tier > 2).count() > 1 {
            return Err(invalid());
        }
        Ok(Self(tiers))
    }

    pub fn from_single(path: usize, tier: u8) -> Self {
        let mut tiers = [0; 3];
        if let Some(slot) = path.checked_sub(1).and_then(|index| tiers.get_mut(index)) {
            *slot = tier;
        }
        Self(tiers)
    }

    pub fn code(&self) -> String {
        self.0.iter().map(|tier| tier.to_string()).collect()
    }

    /// Dashed form, e.g. `2-0-5`
    pub fn dashed(&self) -> String {
        self.0
            .iter()
            .map(|tier| tier.to_string())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Highest-tier path (1-based) and its tier; ties go to the leftmost path
    pub fn main(&self) -> (usize, u8) {
        let tier = self.0.iter().copied().max().unwrap_or(0);
        let path = self.0.iter().position(|&t| t == tier).unwrap_or(0) + 1;
        (path, tier)
    }

    /// The crosspath (1-based) and its tier
    pub fn cross(&self) -> (usize, u8) {
        let mut sorted = self.0;
        sorted.sort_unstable();
        let cross_tier = sorted[1];

        let (main, _) = self.main();
        let path = self
            .0
            .iter()
            .enumerate()
            .position(|(index, &t)| t == cross_tier && index + 1 != main)
            .unwrap_or(0)
            + 1;
        (path, cross_tier)
    }
}

/// `dart-monkey` -> `Dart Monkey`
pub fn display_name(key: &str) -> String {
    key.split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Thousands separators for values above four digits
pub fn with_separators(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 4 {
        return digits;
    }
    group_digits(&digits)
}

/// Normalise the dump's whitespace into Discord markdown line breaks
pub fn clean_desc(desc: &str) -> String {
    desc.replace('\n', "")
        .replace("\r \t", "\n")
        .replace(" \t-", "-    ")
        .replace('\r', "\n")
}

/// Parsed stat dump
#[derive(Debug, Clone)]
pub struct StatSheet {
    blocks: Vec<String>,
}

impl StatSheet {
    pub fn parse(body: &str) -> Self {
        Self {
            blocks: body.split(BLOCK_SEPARATOR).map(str::to_string).collect(),
        }
    }

    fn block(&self, code: &str) -> Option<&str> {
        self.blocks
            .iter()
            .find(|block| block.get(..3) == Some(code))
            .map(String::as_str)
    }

    /// Cleaned description of one upgrade path, without its code prefix
    pub fn describe(&self, path: &UpgradePath) -> Option<String> {
        let block = self.block(&path.code())?;
        let desc = clean_desc(block.get(3..).unwrap_or_default());
        let desc = desc.trim();
        (!desc.is_empty()).then(|| desc.to_string())
    }

    /// Description of the base tower, taken from the first block
    pub fn base_description(&self) -> String {
        let first = self.blocks.first().map(String::as_str).unwrap_or_default();
        clean_desc(first).get(3..).unwrap_or_default().trim().to_string()
    }

    /// Benefit lines for one single-path upgrade, bulleted
    pub fn benefits(&self, path: &UpgradePath) -> String {
        let desc = self.block(&path.code()).map(clean_desc).unwrap_or_default();
        let group = benefits_splitter()
            .and_then(|splitter| splitter.split(&desc).nth(1))
            .map(str::trim)
            .filter(|group| !group.is_empty());

        match group {
            Some(group) => group
                .lines()
                .map(|line| format!("{BULLET} {line}"))
                .collect::<Vec<_>>()
                .join("\n"),
            None => "No benefits".to_string(),
        }
    }
}

fn benefits_splitter() -> Option<&'static Regex> {
    static SPLITTER: OnceLock<Option<Regex>> = OnceLock::new();
    SPLITTER
        .get_or_init(|| {
            let headings = [
                "__Changes from 0-0-0__",
                "Changes from 000:",
                "__Changes from Previous Tier__",
                "Changes from previous tier:",
                "__Crosspath Benefits__",
                "Crosspath Benefits:",
            ];
            let alternatives: Vec<String> = headings.iter().map(|h| regex::escape(h)).collect();
            Regex::new(&format!("(?i){}", alternatives.join("|"))).ok()
        })
        .as_ref()
}

/// Every single-path upgrade, tier-major: 100, 010, 001, 200, ...
pub fn single_path_upgrades() -> Vec<UpgradePath> {
    (1..=5u8)
        .flat_map(|tier| (1..=3).map(move |path| UpgradePath::from_single(path, tier)))
        .collect()
}
