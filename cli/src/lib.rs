//! Vimeet CLI - terminal driver for the room client.
//!
//! Joins a room, logs every state change and turns stdin lines into room
//! commands.
//!
//! # Components
//!
//! - [`config`]: Environment configuration
//! - [`command`]: Input parsing and execution
//! - [`report`]: State change logging

pub mod command;
pub mod config;
pub mod report;

pub use command::{Command, Flow, ParseError};
pub use config::{CliConfig, ConfigError};
