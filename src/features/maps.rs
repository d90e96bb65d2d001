//! # Maps
//!
//! Map facts keyed by kebab-case map name, looked up by the closest name to
//! whatever the user typed.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.4.0

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Deserialize)]
pub struct MapInfo {
    /// Track length in red bloon seconds, as displayed
    pub length: String,
    pub objects: u32,
    /// Cost of removing every removable object
    pub clear_out_cost: u64,
    pub water_composition: String,
    pub ends: String,
    pub version: String,
}

/// The map whose name is most similar to `query`
///
/// Ties go to the first name in key order. `None` only when there are no maps.
pub fn closest<'a>(maps: &'a BTreeMap<String, MapInfo>, query: &str) -> Option<(&'a str, &'a MapInfo)> {
    let query = normalize(query);
    let mut best: Option<(f64, &'a str, &'a MapInfo)> = None;
    for (name, info) in maps {
        let score = similarity(&query, &normalize(name));
        if best.map_or(true, |(top, _, _)| score > top) {
            best = Some((score, name.as_str(), info));
        }
    }
    best.map(|(_, name, info)| (name, info))
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Sørensen–Dice coefficient over character bigrams
fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.len() < 2 || b.len() < 2 {
        return 0.0;
    }

    let mut bigrams: HashMap<(char, char), usize> = HashMap::new();
    for pair in a.windows(2) {
        *bigrams.entry((pair[0], pair[1])).or_default() += 1;
    }
    let mut shared = 0;
    for pair in b.windows(2) {
        if let Some(count) = bigrams.get_mut(&(pair[0], pair[1])) {
            if *count > 0 {
                *count -= 1;
                shared += 1;
            }
        }
    }

    (2 * shared) as f64 / (a.len() + b.len() - 2) as f64
}
