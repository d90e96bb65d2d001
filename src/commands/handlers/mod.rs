//! Per-command handler implementations
//!
//! - **Version**: 3.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 3.1.0: Round, income, rbe and map
//! - 3.0.0: BTD6 commands (index, quiz, tag, temple, tierlist, tower)
//! - 1.0.0: Initial extraction from monolithic command_handler.rs

pub mod index;
pub mod map;
pub mod quiz;
pub mod round;
pub mod tag;
pub mod temple;
pub mod tierlist;
pub mod tower;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;
use crate::features::GameData;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
/// The tower handler offers the towers present in `data` as choices.
pub fn create_all_handlers(data: &GameData) -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(tag::TagHandler),
        Arc::new(tierlist::TierlistHandler),
        Arc::new(index::IndexHandler),
        Arc::new(quiz::QuizHandler),
        Arc::new(tower::TowerHandler::new(data.towers.keys().cloned().collect())),
        Arc::new(temple::TempleHandler),
        Arc::new(round::RoundHandler),
        Arc::new(map::MapHandler),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::registry::CommandRegistry;
    use crate::commands::testing::fixture_data;

    #[test]
    fn test_all_handlers_register_without_clashes() {
        let mut registry = CommandRegistry::new();
        for handler in create_all_handlers(&fixture_data()) {
            registry.register(handler).unwrap();
        }

        for name in [
            "ping", "invite", "github", "tag", "tierlist", "2tc", "2mpc", "lcc", "lcd", "quiz",
            "tower", "temple", "round", "income", "rbe", "map",
        ] {
            assert!(registry.contains(name), "{name} missing");
        }
        assert_eq!(registry.len(), 16);
        assert_eq!(registry.declarations().len(), 16);
    }
}
