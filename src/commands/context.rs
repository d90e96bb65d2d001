//! Shared context for command handlers
//!
//! - **Version**: 2.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 2.0.0: Game data and remote collaborators replace gateway services
//! - 1.0.0: Initial implementation with core shared state

use std::sync::Arc;

use crate::core::Config;
use crate::features::{FollowupSender, GameData, RemoteSource};

/// Shared context for all command handlers
///
/// Contains the services most handlers need:
/// - Config for API base URLs and the client id
/// - GameData, the static tables loaded at boot
/// - RemoteSource for the index APIs and tower stat dumps
/// - FollowupSender for messages posted after the initial response
#[derive(Clone)]
pub struct CommandContext {
    pub config: Config,
    pub data: Arc<GameData>,
    pub remote: Arc<dyn RemoteSource>,
    pub followups: Arc<dyn FollowupSender>,
}

impl CommandContext {
    /// Create a new CommandContext with the given services
    pub fn new(
        config: Config,
        data: GameData,
        remote: Arc<dyn RemoteSource>,
        followups: Arc<dyn FollowupSender>,
    ) -> Self {
        Self {
            config,
            data: Arc::new(data),
            remote,
            followups,
        }
    }
}
