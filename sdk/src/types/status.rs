//! Session status types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::primitives::UserId;

/// The local participant's identity and permissions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfStatus {
    /// Own id, unset until the server sends `selfstatus`.
    pub id: Option<UserId>,

    /// Whether the local participant is elevated.
    pub elevated: bool,
}

impl SelfStatus {
    /// Returns true if the given id is the local participant.
    #[must_use]
    pub fn is_self(&self, id: UserId) -> bool {
        self.id == Some(id)
    }
}

/// Connection state of the room session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    /// No open connection.
    #[default]
    Disconnected,
    /// Handshake in progress or waiting for the first frame.
    Connecting,
    /// At least one frame received on the current connection.
    Connected,
}

impl ConnectionState {
    /// Returns true if connected.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disconnected => write!(f, "disconnected"),
            Self::Connecting => write!(f, "connecting"),
            Self::Connected => write!(f, "connected"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_status_default_unset() {
        let status = SelfStatus::default();
        assert!(status.id.is_none());
        assert!(!status.elevated);
        assert!(!status.is_self(UserId::new(1)));
    }

    #[test]
    fn test_connection_state() {
        assert_eq!(ConnectionState::default(), ConnectionState::Disconnected);
        assert!(ConnectionState::Connected.is_connected());
        assert!(!ConnectionState::Connecting.is_connected());
        assert_eq!(ConnectionState::Connecting.to_string(), "connecting");
    }
}
