//! # Core Module
//!
//! Configuration, Discord limits and shared embed builders.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Add embeds module (colours, JSON conversion, bug-report row)
//! - 1.1.0: Add response module with Discord truncation utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod embeds;
pub mod response;

pub use config::Config;
pub use response::{
    format_number, group_digits, truncate, truncate_for_embed, truncate_for_field, truncate_for_message, truncate_for_select,
    EMBED_LIMIT, FIELD_LIMIT, MESSAGE_LIMIT,
};
