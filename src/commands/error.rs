//! Recoverable command errors
//!
//! Business-logic failures a user can act on. Handlers convert them into an
//! ephemeral reply at their boundary; they never reach the dispatcher.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use thiserror::Error;

use crate::interactions::{InteractionResponse, ReplyData};

/// The `Display` text is exactly what the user sees
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    /// A remote collaborator failed or returned nothing usable
    #[error("{0}")]
    Unavailable(String),
}

impl CommandError {
    pub fn reply(&self) -> ReplyData {
        ReplyData::new().content(self.to_string()).ephemeral()
    }
}

/// Send a new message, or the error ephemerally
pub fn into_message(result: Result<ReplyData, CommandError>) -> InteractionResponse {
    match result {
        Ok(data) => InteractionResponse::message(data),
        Err(e) => InteractionResponse::message(e.reply()),
    }
}

/// Update the clicked message in place, or answer the error ephemerally
/// without touching it
pub fn into_update(result: Result<ReplyData, CommandError>) -> InteractionResponse {
    match result {
        Ok(data) => InteractionResponse::update(data),
        Err(e) => InteractionResponse::message(e.reply()),
    }
}
