//! Discord length limits and UTF-8 safe truncation
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.3.0
//!
//! ## Changelog
//! - 1.2.0: Thousands grouping and locale-style number formatting
//! - 1.1.0: Add embed field limit, generic `truncate`
//! - 1.0.0: Message and embed description truncation

/// Discord embed description limit
pub const EMBED_LIMIT: usize = 4096;
/// Discord embed field value limit
pub const FIELD_LIMIT: usize = 1024;
/// Discord message content limit
pub const MESSAGE_LIMIT: usize = 2000;
/// Discord select menu option label/description limit
pub const SELECT_LABEL_LIMIT: usize = 100;

/// Truncate text to at most `limit` bytes, adding an ellipsis if anything was cut
///
/// Never splits a multi-byte character.
pub fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit.saturating_sub(3);
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

pub fn truncate_for_embed(text: &str) -> String {
    truncate(text, EMBED_LIMIT)
}

pub fn truncate_for_field(text: &str) -> String {
    truncate(text, FIELD_LIMIT)
}

pub fn truncate_for_message(text: &str) -> String {
    truncate(text, MESSAGE_LIMIT)
}

pub fn truncate_for_select(text: &str) -> String {
    truncate(text, SELECT_LABEL_LIMIT)
}

/// Insert a ',' between every group of three digits
pub fn group_digits(digits: &str) -> String {
    let len = digits.chars().count();
    let mut out = String::with_capacity(len + len / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    out
}

/// Grouped integer part and at most three decimals, trailing zeros dropped
///
/// `1234567.5` renders as `1,234,567.5`.
pub fn format_number(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac.trim_end_matches('0');
    let sign = if value < 0.0 && (int != "0" || !frac.is_empty()) {
        "-"
    } else {
        ""
    };
    if frac.is_empty() {
        format!("{sign}{}", group_digits(int))
    } else {
        format!("{sign}{}.{frac}", group_digits(int))
    }
}
