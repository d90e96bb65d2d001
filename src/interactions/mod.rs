//! # Interactions
//!
//! The webhook side of the bot: request authentication, the inbound
//! interaction model, custom-id state, response encoding and dispatch.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod custom_id;
pub mod dispatch;
pub mod model;
pub mod reply;
pub mod server;
pub mod verify;

pub use dispatch::{DispatchError, Dispatcher};
pub use reply::{Attachment, InteractionResponse, ReplyData, ResponseKind};
pub use server::{router, serve, AppState};
pub use verify::SignatureVerifier;
