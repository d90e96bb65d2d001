//! # Temple
//!
//! Sun temple sacrifice levels. Each tower category's sacrificed cash maps to a
//! level 0-9; a four-digit configuration describes a fully sacrificed temple.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{bail, Result};
use serde::Deserialize;

use crate::commands::error::CommandError;

/// Cash needed to reach each level; reaching the last one is level 9
pub const SACRIFICE_LEVELS: [u64; 9] = [300, 1000, 2000, 4000, 7500, 10000, 15000, 25000, 50000];

pub const MAX_LEVEL: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Primary,
    Military,
    Magic,
    Support,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Primary,
        Category::Military,
        Category::Magic,
        Category::Support,
    ];

    /// Option name, also the key in the data file
    pub fn key(self) -> &'static str {
        match self {
            Category::Primary => "primary",
            Category::Military => "military",
            Category::Magic => "magic",
            Category::Support => "support",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Category::Primary => "Primary sacrifice",
            Category::Military => "Military sacrifice",
            Category::Magic => "Magic sacrifice",
            Category::Support => "Support sacrifice",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryStats {
    /// Line shown above every level description
    pub header: String,
    /// Level 1-9 descriptions
    pub levels: Vec<String>,
    /// Extra stats when the True Sun God takes a second sacrifice
    pub tsg: String,
}

impl CategoryStats {
    /// Header plus the description of `level`; level 0 only shows the header
    pub fn describe(&self, level: u8) -> String {
        let body = match level {
            0 => "\u{200b}",
            level => self
                .levels
                .get(usize::from(level) - 1)
                .map(String::as_str)
                .unwrap_or("\u{200b}"),
        };
        format!("{}\n{body}", self.header)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TempleStats {
    pub primary: CategoryStats,
    pub military: CategoryStats,
    pub magic: CategoryStats,
    pub support: CategoryStats,
}

impl TempleStats {
    pub fn category(&self, category: Category) -> &CategoryStats {
        match category {
            Category::Primary => &self.primary,
            Category::Military => &self.military,
            Category::Magic => &self.magic,
            Category::Support => &self.support,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for category in Category::ALL {
            let levels = self.category(category).levels.len();
            if levels != usize::from(MAX_LEVEL) {
                bail!(
                    "temple category '{}' has {levels} levels, expected {MAX_LEVEL}",
                    category.key()
                );
            }
        }
        Ok(())
    }
}

/// Level reached by sacrificing `cash` to one category
pub fn cash_to_level(cash: u64) -> u8 {
    SACRIFICE_LEVELS
        .iter()
        .position(|&threshold| cash < threshold)
        .map(|index| index as u8)
        .unwrap_or(MAX_LEVEL)
}

pub const INVALID_CONFIGURATION: &str = "Please enter a valid temple set!

This command is for the statistics of a **maxed temple sacrifice**, i.e. the sacrifices **exceed** $50000.
The **temple configuration** follows a format of `<primary><military><magic><support>`. Eg. Primary and magic = `1010`

Although this command accepts the temple config `1111`, when sacrificing towers to a Sun Temple, only three categories count. If four categories are sacrificed then the cheapest is ignored.

The True Sun God, however, can accept sacrifices from all four categories.
For example if you had a `1101` temple that you've max-sacrificed on all 4 categories, you would get `1101` + `1111` = `2212`";

/// Parse a max-sacrifice configuration such as `2212`
///
/// Four digits, none above 2, summing to at most 7.
pub fn parse_configuration(config: &str) -> Result<[u8; 4], CommandError> {
    let invalid = || CommandError::InvalidInput(INVALID_CONFIGURATION.to_string());

    let digits: Vec<u8> = config
        .chars()
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;
    let tiers: [u8; 4] = digits.try_into().map_err(|_| invalid())?;

    if tiers.iter().any(|&tier| tier > 2) || tiers.iter().sum::<u8>() > 7 {
        return Err(invalid());
    }
    Ok(tiers)
}
