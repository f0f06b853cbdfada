//! Core types for the Vimeet SDK.
//!
//! This module provides the room entities that the engine keeps in sync:
//! participants, raised objects, polls, chat and session status.

pub mod chat;
pub mod notice;
pub mod participant;
pub mod poll;
pub mod primitives;
pub mod raised;
pub mod status;

pub use chat::ChatMessage;
pub use notice::{InstantEvent, ServerError};
pub use participant::{Participant, ParticipantEntry};
pub use poll::{Poll, PollOption, Vote};
pub use primitives::{icons, objects, UserId};
pub use raised::RaisedObject;
pub use status::{ConnectionState, SelfStatus};
