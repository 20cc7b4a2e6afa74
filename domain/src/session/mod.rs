//! Conversation session domain.
//!
//! - [`entities::Message`] - a single immutable turn
//! - [`store::MessageStore`] - append-only ordered log of turns
//! - [`attachment::AttachmentBuffer`] - files and images pending submission

pub mod attachment;
pub mod entities;
pub mod store;
