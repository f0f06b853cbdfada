//! Outbound commands.
//!
//! Each command validates its arguments against the local store, then queues
//! one frame. Guards that turn a command into a no-op run before the
//! connection check, so a skipped command returns `Ok` even while
//! disconnected. No command changes local state; every effect arrives back
//! from the server as a broadcast.

use crate::engine::RoomEngine;
use crate::types::UserId;
use crate::ws::error::WsError;
use crate::ws::messages::{ClientMessage, InstantPayload};

impl RoomEngine {
    /// Sends an icon reaction such as `thumbs-up`.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn send_instant(&self, icon: &str) -> Result<(), WsError> {
        self.send(&ClientMessage::Instant {
            object: InstantPayload::Icon(icon.to_string()),
        })
    }

    /// Sends a chat message. Empty text is not sent.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn send_chat_message(&self, text: &str) -> Result<(), WsError> {
        if text.is_empty() {
            return self.skip("chat message", "empty text");
        }
        self.send(&ClientMessage::Instant {
            object: InstantPayload::Chat(text.to_string()),
        })
    }

    /// Raises an object for the local participant.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn raise_object(&self, kind: &str) -> Result<(), WsError> {
        self.send(&ClientMessage::Raise {
            object: kind.to_string(),
        })
    }

    /// Lowers an object of the local participant.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn lower_object(&self, kind: &str) -> Result<(), WsError> {
        self.send(&ClientMessage::Lower {
            object: kind.to_string(),
        })
    }

    /// Creates a poll. An empty title is not sent.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn create_poll(&self, title: &str) -> Result<(), WsError> {
        if title.is_empty() {
            return self.skip("poll", "empty title");
        }
        self.send(&ClientMessage::Poll {
            object: title.to_string(),
        })
    }

    /// Votes for an option. Not sent if the poll is known to be closed.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn vote(&self, poll: &str, option: &str) -> Result<(), WsError> {
        if self.is_poll_closed(poll) {
            return self.skip("vote", "poll is closed");
        }
        self.send(&ClientMessage::Vote {
            pollobject: poll.to_string(),
            polloptionobject: option.to_string(),
        })
    }

    /// Withdraws a vote. Not sent if the poll is known to be closed.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn delete_vote(&self, poll: &str, option: &str) -> Result<(), WsError> {
        if self.is_poll_closed(poll) {
            return self.skip("vote withdrawal", "poll is closed");
        }
        self.send(&ClientMessage::VoteDelete {
            pollobject: poll.to_string(),
            polloptionobject: option.to_string(),
        })
    }

    /// Proposes a new option for a poll.
    ///
    /// Not sent if the title is empty or the poll is known to be closed.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn add_option(&self, poll: &str, title: &str) -> Result<(), WsError> {
        if title.is_empty() {
            return self.skip("poll option", "empty title");
        }
        if self.is_poll_closed(poll) {
            return self.skip("poll option", "poll is closed");
        }
        self.send(&ClientMessage::PollOption {
            pollobject: poll.to_string(),
            polloptionobject: title.to_string(),
        })
    }

    /// Closes a poll.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn close_poll(&self, poll: &str) -> Result<(), WsError> {
        self.send(&ClientMessage::PollClose {
            object: poll.to_string(),
        })
    }

    /// Grants (`elevate = true`) or revokes moderator permissions.
    ///
    /// # Errors
    ///
    /// Returns `WsError::NotConnected` if no connection is open.
    pub fn change_permission(&self, user: UserId, elevate: bool) -> Result<(), WsError> {
        let message = if elevate {
            ClientMessage::Elevate { object: user }
        } else {
            ClientMessage::Recede { object: user }
        };
        self.send(&message)
    }

    fn is_poll_closed(&self, poll: &str) -> bool {
        self.store()
            .polls
            .get()
            .iter()
            .find(|p| p.object == poll)
            .is_some_and(|p| p.closed)
    }
}
