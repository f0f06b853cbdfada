//! WebSocket message types.
//!
//! Defines the frames exchanged with the room server. Every frame is a JSON
//! object tagged by a `type` field; the remaining fields depend on the tag.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::WsError;
use crate::error::FrameError;
use crate::types::{ParticipantEntry, RaisedObject, UserId};

/// Payload of an `instant` frame, in both directions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum InstantPayload {
    /// An ephemeral icon reaction.
    Icon(String),
    /// A chat message.
    Chat(String),
}

/// Client-to-server messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClientMessage {
    /// Send an icon reaction or a chat message.
    Instant {
        /// Icon or chat payload.
        object: InstantPayload,
    },
    /// Raise an object for the local participant.
    Raise {
        /// Object kind.
        object: String,
    },
    /// Lower an object of the local participant.
    Lower {
        /// Object kind.
        object: String,
    },
    /// Create a poll.
    Poll {
        /// Poll title.
        object: String,
    },
    /// Add an option to a poll.
    PollOption {
        /// Poll id.
        pollobject: String,
        /// Option title.
        polloptionobject: String,
    },
    /// Vote for an option.
    Vote {
        /// Poll id.
        pollobject: String,
        /// Option id.
        polloptionobject: String,
    },
    /// Withdraw a vote.
    VoteDelete {
        /// Poll id.
        pollobject: String,
        /// Option id.
        polloptionobject: String,
    },
    /// Close a poll.
    PollClose {
        /// Poll id.
        object: String,
    },
    /// Grant moderator permissions.
    Elevate {
        /// Target participant.
        object: UserId,
    },
    /// Revoke moderator permissions.
    Recede {
        /// Target participant.
        object: UserId,
    },
}

impl ClientMessage {
    /// Returns the wire `type` tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Instant { .. } => "instant",
            Self::Raise { .. } => "raise",
            Self::Lower { .. } => "lower",
            Self::Poll { .. } => "poll",
            Self::PollOption { .. } => "polloption",
            Self::Vote { .. } => "vote",
            Self::VoteDelete { .. } => "votedelete",
            Self::PollClose { .. } => "pollclose",
            Self::Elevate { .. } => "elevate",
            Self::Recede { .. } => "recede",
        }
    }

    /// Encodes the message as a JSON text frame.
    ///
    /// # Errors
    ///
    /// Returns `WsError::Serialization` if encoding fails.
    pub fn encode(&self) -> Result<String, WsError> {
        serde_json::to_string(self).map_err(|e| WsError::Serialization(e.to_string()))
    }
}

/// Server-to-client messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ServerMessage {
    /// Identity of the local participant.
    SelfStatus {
        /// Own id.
        object: UserId,
        /// Own moderator flag.
        elevated: bool,
    },
    /// Full snapshot of participants and raised objects.
    All {
        /// Participants keyed by id.
        joined: BTreeMap<String, ParticipantEntry>,
        /// All raised objects.
        raised: Vec<RaisedObject>,
    },
    /// A participant joined.
    Joined {
        /// Participant id.
        id: UserId,
        /// Display name.
        name: String,
        /// Moderator flag.
        elevated: bool,
    },
    /// A participant raised an object.
    Raised {
        /// Object kind.
        object: String,
        /// Owner id.
        owner_id: UserId,
        /// Owner name.
        owner_name: String,
        /// Owner moderator flag.
        elevated: bool,
    },
    /// A participant lowered an object.
    Lower {
        /// Object kind.
        object: String,
        /// Owner id.
        owner_id: UserId,
    },
    /// An icon reaction or chat message.
    Instant {
        /// Nested payload.
        object: InstantPayload,
        /// Sender id.
        owner_id: Option<UserId>,
        /// Sender name.
        owner_name: Option<String>,
        /// Sender moderator flag.
        elevated: Option<bool>,
    },
    /// A poll was created.
    Poll {
        /// Poll id.
        object: String,
    },
    /// An option was added to a poll.
    PollOption {
        /// Parent poll id.
        pollobject: String,
        /// Option id.
        polloptionobject: String,
    },
    /// A vote was cast.
    Vote {
        /// Voter id.
        userid: UserId,
        /// Voter name.
        username: String,
        /// Option id.
        polloptionobject: String,
        /// Poll id.
        pollobject: String,
    },
    /// A poll was closed.
    PollClose {
        /// Poll id.
        object: String,
    },
    /// A vote was withdrawn.
    VoteDelete {
        /// Poll id.
        pollobject: String,
        /// Option id.
        polloptionobject: String,
        /// Voter, carried by the server but not used to locate the vote.
        userid: Option<serde_json::Value>,
    },
    /// A participant was elevated.
    Elevated {
        /// Target participant.
        object: UserId,
    },
    /// A participant was receded.
    Receded {
        /// Target participant.
        object: UserId,
    },
    /// The server reported an error.
    Error {
        /// Human-readable description.
        #[serde(alias = "message")]
        object: String,
    },
    /// A frame type this client does not know.
    #[serde(other)]
    Unknown,
}

impl ServerMessage {
    /// Returns the wire `type` tag, or `"unknown"`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SelfStatus { .. } => "selfstatus",
            Self::All { .. } => "all",
            Self::Joined { .. } => "joined",
            Self::Raised { .. } => "raised",
            Self::Lower { .. } => "lower",
            Self::Instant { .. } => "instant",
            Self::Poll { .. } => "poll",
            Self::PollOption { .. } => "polloption",
            Self::Vote { .. } => "vote",
            Self::PollClose { .. } => "pollclose",
            Self::VoteDelete { .. } => "votedelete",
            Self::Elevated { .. } => "elevated",
            Self::Receded { .. } => "receded",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Deserialize)]
struct FrameTag {
    #[serde(rename = "type")]
    kind: String,
}

/// Decodes an inbound text frame.
///
/// # Errors
///
/// Returns `FrameError::Malformed` when the `type` is readable but the fields
/// do not validate for it, and `FrameError::InvalidFrame` otherwise.
pub fn decode_frame(text: &str) -> Result<ServerMessage, FrameError> {
    serde_json::from_str::<ServerMessage>(text).map_err(|err| {
        match serde_json::from_str::<FrameTag>(text) {
            Ok(tag) => FrameError::Malformed {
                kind: tag.kind,
                reason: err.to_string(),
            },
            Err(_) => FrameError::InvalidFrame(err.to_string()),
        }
    })
}
