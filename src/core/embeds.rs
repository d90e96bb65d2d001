//! Shared embed and component builders
//!
//! Colours, the bug-report link row and the conversion from serenity's map-backed
//! builders into the JSON the interaction response carries.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.4.0

use serde_json::{Map, Value};
use serenity::builder::{CreateActionRow, CreateComponents, CreateEmbed};
use serenity::model::application::component::ButtonStyle;

/// Accent colour for index, tower and round embeds
pub const CYBER: u32 = 0x00D9FF;
/// Accent colour for temple embeds
pub const YELLOW: u32 = 0xFFD700;

pub const REPORT_BUG_URL: &str = "https://discord.gg/AtCA2ZMNng";

/// Serialize a built embed into its wire JSON
pub fn embed_json(embed: &CreateEmbed) -> Value {
    let map: Map<String, Value> = embed
        .0
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect();
    Value::Object(map)
}

/// Action rows held by a components builder, ready for a reply payload
pub fn component_rows(components: CreateComponents) -> Vec<Value> {
    components.0
}

/// Append the "Report a bug" link button to a row
pub fn add_report_bug_button(row: &mut CreateActionRow) -> &mut CreateActionRow {
    row.create_button(|button| {
        button
            .style(ButtonStyle::Link)
            .label("Report a bug")
            .url(REPORT_BUG_URL)
    })
}

/// Add the "Report a bug" link button as its own row
pub fn add_report_bug_row(components: &mut CreateComponents) -> &mut CreateComponents {
    components.create_action_row(add_report_bug_button)
}

/// Markdown link, falling back to the bare URL when there is no link text
pub fn markdown_link(text: Option<&str>, url: &str) -> String {
    match text {
        Some(text) if !text.is_empty() => format!("[{text}]({url})"),
        _ => url.to_string(),
    }
}

/// Discord short-date timestamp markup for a millisecond epoch
pub fn short_date(epoch_millis: i64) -> String {
    // ceil(ms / 1000)
    let secs = epoch_millis.div_euclid(1000) + i64::from(epoch_millis.rem_euclid(1000) != 0);
    format!("<t:{secs}:d>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_json_contains_fields() {
        let mut embed = CreateEmbed::default();
        embed.title("Title").field("Name", "Value", true).colour(CYBER);
        let json = embed_json(&embed);

        assert_eq!(json["title"], "Title");
        assert_eq!(json["fields"][0]["name"], "Name");
        assert_eq!(json["fields"][0]["value"], "Value");
        assert_eq!(json["fields"][0]["inline"], true);
    }

    #[test]
    fn test_report_bug_row() {
        let mut components = CreateComponents::default();
        add_report_bug_row(&mut components);
        let rows = component_rows(components);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["components"][0]["url"], REPORT_BUG_URL);
    }

    #[test]
    fn test_markdown_link() {
        assert_eq!(markdown_link(Some("vid"), "https://x.y"), "[vid](https://x.y)");
        assert_eq!(markdown_link(Some(""), "https://x.y"), "https://x.y");
        assert_eq!(markdown_link(None, "https://x.y"), "https://x.y");
    }

    #[test]
    fn test_short_date_rounds_up() {
        assert_eq!(short_date(1_650_000_000_000), "<t:1650000000:d>");
        assert_eq!(short_date(1_650_000_000_001), "<t:1650000001:d>");
    }
}
