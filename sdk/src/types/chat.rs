//! Chat transcript types.

use serde::{Deserialize, Serialize};

use super::primitives::UserId;

/// Owner id used for messages generated locally by the client.
pub const SYSTEM_OWNER_ID: UserId = UserId::new(-1);

/// Owner name used for messages generated locally by the client.
pub const SYSTEM_OWNER_NAME: &str = "Vimeet";

/// A chat message in the room transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Author name.
    pub owner_name: String,

    /// Author id.
    pub owner_id: UserId,

    /// Message body.
    pub text: String,

    /// Whether the author was elevated when sending.
    pub elevated: bool,
}

impl ChatMessage {
    /// Creates a new chat message.
    #[must_use]
    pub fn new(
        owner_id: UserId,
        owner_name: impl Into<String>,
        text: impl Into<String>,
        elevated: bool,
    ) -> Self {
        Self {
            owner_name: owner_name.into(),
            owner_id,
            text: text.into(),
            elevated,
        }
    }

    /// Creates the welcome message that seeds every transcript.
    #[must_use]
    pub fn welcome(text: impl Into<String>) -> Self {
        Self::new(SYSTEM_OWNER_ID, SYSTEM_OWNER_NAME, text, true)
    }

    /// Returns true if the message was generated by the client itself.
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.owner_id == SYSTEM_OWNER_ID
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_is_system() {
        let msg = ChatMessage::welcome("hi");
        assert!(msg.is_system());
        assert_eq!(msg.owner_name, SYSTEM_OWNER_NAME);
        assert_eq!(msg.text, "hi");
    }

    #[test]
    fn test_regular_message_is_not_system() {
        let msg = ChatMessage::new(UserId::new(2), "Ann", "hello", false);
        assert!(!msg.is_system());
    }
}
