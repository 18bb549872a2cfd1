//! Conversation context sent to the Reasoning Service

pub mod entities;

pub use entities::{Conversation, Message, Role};
