//! Ephemeral notifications that are delivered to subscribers but never
//! stored.

use chrono::{DateTime, Utc};

use super::primitives::UserId;

/// An instant icon reaction sent by a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstantEvent {
    /// Icon kind, e.g. `thumbs-up`.
    pub object: String,

    /// Sender id, when the frame carries one.
    pub owner_id: Option<UserId>,

    /// Sender name, when the frame carries one.
    pub owner_name: Option<String>,

    /// When the frame was applied locally.
    pub received_at: DateTime<Utc>,
}

impl InstantEvent {
    /// Creates an instant event stamped with the current time.
    #[must_use]
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            owner_id: None,
            owner_name: None,
            received_at: Utc::now(),
        }
    }

    /// Attaches the sender.
    #[must_use]
    pub fn with_owner(mut self, owner_id: Option<UserId>, owner_name: Option<String>) -> Self {
        self.owner_id = owner_id;
        self.owner_name = owner_name;
        self
    }
}

/// An error reported by the room server, surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerError {
    /// Human-readable description.
    pub message: String,
}

impl ServerError {
    /// Creates a new server error.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ServerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}
