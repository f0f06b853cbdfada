//! Vimeet SDK - room state synchronization for the Vimeet client.
//!
//! This crate keeps a local replica of a collaborative room in sync with the
//! room server over a single websocket, and exposes it as subscribable
//! slices plus a small command API.
//!
//! # Components
//!
//! - [`ws`]: Wire codec and the websocket [`RoomClient`]
//! - [`reducers`]: Pure per-domain state folds
//! - [`dispatcher`]: Routes decoded frames to reducers
//! - [`store`]: [`RoomStore`] slices and event streams
//! - [`RoomEngine`]: Connection lifecycle and commands
//!
//! # Example
//!
//! ```rust
//! use vimeet_sdk::{ChatMessage, ConnectionState, RoomEngine};
//!
//! let engine = RoomEngine::new(ChatMessage::welcome("Welcome!"));
//! assert_eq!(engine.connection_state(), ConnectionState::Disconnected);
//! assert_eq!(engine.store().chat.get().len(), 1);
//! ```

pub mod commands;
pub mod dispatcher;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod reducers;
pub mod store;
pub mod types;
pub mod ws;

pub use engine::{Outbound, RoomEngine};
pub use error::FrameError;
pub use metrics::SessionMetrics;
pub use store::{EventStream, RoomStore, Slice, SliceKind, SubscriptionId};
pub use types::{
    icons, objects, ChatMessage, ConnectionState, InstantEvent, Participant, Poll, PollOption,
    RaisedObject, SelfStatus, ServerError, UserId, Vote,
};
pub use ws::{RoomClient, WsConfig, WsError};
