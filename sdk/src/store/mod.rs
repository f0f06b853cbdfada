//! Room state store.
//!
//! Holds one [`Slice`] per entity family and one [`EventStream`] per kind of
//! ephemeral notification. External collaborators read snapshots and
//! subscribe; only the engine publishes.

pub mod slice;

use std::fmt;

pub use slice::{EventStream, Slice, SubscriptionId};

use crate::types::{
    ChatMessage, ConnectionState, InstantEvent, Participant, Poll, RaisedObject, SelfStatus,
    ServerError, UserId,
};

/// Identifies a slice of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SliceKind {
    /// Participant list.
    Participants,
    /// Raised objects.
    Raised,
    /// Polls.
    Polls,
    /// Chat transcript.
    Chat,
    /// Local participant status.
    SelfStatus,
}

impl fmt::Display for SliceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Participants => write!(f, "participants"),
            Self::Raised => write!(f, "raised"),
            Self::Polls => write!(f, "polls"),
            Self::Chat => write!(f, "chat"),
            Self::SelfStatus => write!(f, "self_status"),
        }
    }
}

/// All client-side room state.
#[derive(Debug)]
pub struct RoomStore {
    /// Connection state.
    pub connection: Slice<ConnectionState>,

    /// Participants, sorted by name.
    pub participants: Slice<Vec<Participant>>,

    /// Raised objects in arrival order.
    pub raised: Slice<Vec<RaisedObject>>,

    /// Polls in creation order.
    pub polls: Slice<Vec<Poll>>,

    /// Chat transcript, starting with the welcome message.
    pub chat: Slice<Vec<ChatMessage>>,

    /// Local participant status.
    pub self_status: Slice<SelfStatus>,

    /// Instant icon reactions.
    pub instants: EventStream<InstantEvent>,

    /// Errors reported by the server.
    pub errors: EventStream<ServerError>,
}

impl RoomStore {
    /// Creates a store with empty collections and a transcript holding only
    /// `welcome`.
    #[must_use]
    pub fn new(welcome: ChatMessage) -> Self {
        Self {
            connection: Slice::new(ConnectionState::Disconnected),
            participants: Slice::new(Vec::new()),
            raised: Slice::new(Vec::new()),
            polls: Slice::new(Vec::new()),
            chat: Slice::new(vec![welcome]),
            self_status: Slice::new(SelfStatus::default()),
            instants: EventStream::new(),
            errors: EventStream::new(),
        }
    }

    /// Returns the poll with the given id, if any.
    #[must_use]
    pub fn find_poll(&self, poll: &str) -> Option<Poll> {
        self.polls.get().iter().find(|p| p.object == poll).cloned()
    }

    /// Returns the participant with the given id, if any.
    #[must_use]
    pub fn find_participant(&self, id: UserId) -> Option<Participant> {
        self.participants.get().iter().find(|p| p.id == id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_seeded_state() {
        let store = RoomStore::new(ChatMessage::welcome("hello"));
        assert_eq!(*store.connection.get(), ConnectionState::Disconnected);
        assert!(store.participants.get().is_empty());
        assert!(store.raised.get().is_empty());
        assert!(store.polls.get().is_empty());
        assert_eq!(store.chat.get().len(), 1);
        assert!(store.chat.get()[0].is_system());
        assert!(store.self_status.get().id.is_none());
    }

    #[test]
    fn test_find_helpers() {
        let store = RoomStore::new(ChatMessage::welcome("hello"));
        store.polls.publish(vec![Poll::new("lunch")]);
        store
            .participants
            .publish(vec![Participant::new(UserId::new(1), "Ann", false)]);

        assert!(store.find_poll("lunch").is_some());
        assert!(store.find_poll("dinner").is_none());
        assert_eq!(
            store.find_participant(UserId::new(1)).map(|p| p.name),
            Some("Ann".to_string())
        );
    }

    #[test]
    fn test_slice_kind_display() {
        let names: Vec<String> = [
            SliceKind::Participants,
            SliceKind::Raised,
            SliceKind::Polls,
            SliceKind::Chat,
            SliceKind::SelfStatus,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();
        assert_eq!(names, ["participants", "raised", "polls", "chat", "self_status"]);
    }
}
