//! # Features
//!
//! Game data and the pure logic behind each command, plus the outbound
//! collaborators (remote index APIs, followup webhooks) handlers call.
//!
//! - **Version**: 1.3.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.3.0: Rounds and maps
//! - 1.2.0: Towers and temple
//! - 1.1.0: Challenge index with paging
//! - 1.0.0: Tags and trivia

pub mod followup;
pub mod game_data;
pub mod index;
pub mod maps;
pub mod pagination;
pub mod remote;
pub mod rounds;
pub mod tags;
pub mod temple;
pub mod towers;
pub mod trivia;

pub use followup::{FollowupSender, WebhookFollowups};
pub use game_data::GameData;
pub use remote::{HttpSource, RemoteSource};
pub use tags::TagIndex;
