//! WebSocket transport for room sessions.
//!
//! This module provides the wire codec and a tokio-tungstenite client that
//! keeps a [`crate::RoomEngine`] in sync with a room server.
//!
//! # Example
//!
//! ```rust,ignore
//! use vimeet_sdk::ws::{RoomClient, WsConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RoomClient::new(WsConfig::new("https://meet.example.com"))?;
//!
//!     client.store().participants.subscribe(|list| {
//!         println!("{} participants", list.len());
//!     });
//!
//!     client.connect("alice", "standup").await?;
//!     client.engine().raise_object("ready")?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod messages;

pub use client::RoomClient;
pub use config::WsConfig;
pub use error::WsError;
pub use messages::{decode_frame, ClientMessage, InstantPayload, ServerMessage};
