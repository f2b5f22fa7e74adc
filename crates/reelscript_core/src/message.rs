//! Conversation messages sent to the chat provider.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Conversation participant.
///
/// Serialises to the lowercase role names used by OpenAI-compatible APIs.
///
/// # Examples
///
/// ```
/// use reelscript_core::Role;
///
/// assert_eq!(format!("{}", Role::User), "user");
/// assert_eq!(serde_json::to_string(&Role::Assistant).unwrap(), "\"assistant\"");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System instructions
    #[display("system")]
    System,
    /// Human turn
    #[display("user")]
    User,
    /// Model turn
    #[display("assistant")]
    Assistant,
}

/// A single text message in a conversation.
///
/// # Examples
///
/// ```
/// use reelscript_core::{Message, Role};
///
/// let message = Message::user("Hello!");
/// assert_eq!(*message.role(), Role::User);
/// assert_eq!(message.content(), "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Message {
    /// The role of the message sender
    role: Role,
    /// The message text
    content: String,
}

impl Message {
    /// A human turn carrying `content`.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
