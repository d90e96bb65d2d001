//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.1.0: Reject duplicate command names; collect declarations
//! - 1.0.0: Initial implementation for handler dispatch

use anyhow::{bail, Result};
use serde_json::Value;
use serenity::builder::CreateApplicationCommand;
use std::collections::HashMap;
use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Registry mapping command names to handlers
///
/// Built once at startup and read-only afterwards. Multiple command names can
/// map to the same handler if they share logic.
///
/// # Example
///
/// ```ignore
/// let mut registry = CommandRegistry::new();
/// registry.register(Arc::new(UtilityHandler))?;
/// registry.register(Arc::new(IndexHandler))?;
///
/// if let Some(handler) = registry.lookup("2tc") {
///     handler.handle(ctx, &interaction, command).await?;
/// }
/// ```
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn SlashCommandHandler>>,
    /// Registration order, one entry per handler
    ordered: Vec<Arc<dyn SlashCommandHandler>>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            ordered: Vec::new(),
        }
    }

    /// Register a handler for its declared command names
    ///
    /// A name already taken by another registration is a configuration error
    /// and nothing from this handler is registered.
    pub fn register(&mut self, handler: Arc<dyn SlashCommandHandler>) -> Result<()> {
        let names = handler.command_names();
        for (index, name) in names.iter().enumerate() {
            if self.handlers.contains_key(name) || names[..index].contains(name) {
                bail!("command '{name}' is registered twice");
            }
        }
        for name in names {
            self.handlers.insert(*name, Arc::clone(&handler));
        }
        self.ordered.push(handler);
        Ok(())
    }

    /// Get handler for a command name
    ///
    /// Returns None if no handler is registered for the given name.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn SlashCommandHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Check if a command is registered
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names
    ///
    /// Note: This counts command names, not unique handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Get all registered command names
    pub fn command_names(&self) -> impl Iterator<Item = &&'static str> {
        self.handlers.keys()
    }

    /// Slash command declarations of every handler, in registration order
    pub fn declarations(&self) -> Vec<CreateApplicationCommand> {
        self.ordered
            .iter()
            .flat_map(|handler| handler.declarations())
            .collect()
    }

    /// Declarations as the JSON array Discord's bulk command overwrite accepts
    pub fn declarations_json(&self) -> Value {
        let commands = self
            .declarations()
            .into_iter()
            .map(|command| {
                Value::Object(
                    command
                        .0
                        .into_iter()
                        .map(|(key, value)| (key.to_string(), value))
                        .collect(),
                )
            })
            .collect();
        Value::Array(commands)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
