//! # Tags
//!
//! Short community write-ups looked up by name or keyword. The keyword index is
//! built once when the data loads and is read-only afterwards.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Case-insensitive lookup
//! - 1.0.0: Initial tag index

use anyhow::{bail, Result};
use serde::Deserialize;
use serenity::builder::CreateEmbed;
use std::collections::{BTreeMap, HashMap};

use crate::core::embeds::CYBER;

#[derive(Debug, Clone, Deserialize)]
pub struct TagEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub color: Option<u32>,
    pub footer: Option<String>,
}

impl TagEmbed {
    /// Build the embed, defaulting to the bot colour
    pub fn to_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        embed.colour(self.color.unwrap_or(CYBER));
        if let Some(title) = &self.title {
            embed.title(title);
        }
        if let Some(description) = &self.description {
            embed.description(description);
        }
        if let Some(footer) = &self.footer {
            embed.footer(|f| f.text(footer));
        }
        embed
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub keywords: Vec<String>,
    pub content: Option<String>,
    #[serde(default)]
    pub embeds: Vec<TagEmbed>,
}

#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    tags: BTreeMap<String, Tag>,
    aliases: HashMap<String, String>,
}

impl TagIndex {
    /// Explode every tag's name and keywords into one flat lookup map
    ///
    /// A keyword claimed by two different tags is an error.
    pub fn build(tags: BTreeMap<String, Tag>) -> Result<Self> {
        let mut aliases: HashMap<String, String> = HashMap::new();

        for (name, tag) in &tags {
            if tag.content.is_none() && tag.embeds.is_empty() {
                bail!("tag '{name}' has neither content nor embeds");
            }
            let keys = std::iter::once(name).chain(tag.keywords.iter());
            for key in keys {
                let key = normalize(key);
                match aliases.get(&key) {
                    Some(owner) if owner != name => {
                        bail!("tag keyword '{key}' is used by both '{owner}' and '{name}'")
                    }
                    _ => {
                        aliases.insert(key, name.clone());
                    }
                }
            }
        }

        Ok(Self { tags, aliases })
    }

    /// Find a tag by name or keyword, returning its canonical name
    pub fn lookup(&self, query: &str) -> Option<(&str, &Tag)> {
        let name = self.aliases.get(&normalize(query))?;
        self.tags
            .get_key_value(name)
            .map(|(name, tag)| (name.as_str(), tag))
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}
