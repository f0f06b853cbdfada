//! Primitive types for the Vimeet SDK.
//!
//! Provides the participant identifier and the well-known kind tags used by
//! raised objects and instant icons.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::FrameError;

/// A participant identifier assigned by the room server.
///
/// Serialized as a JSON number. Deserialization also accepts numeric
/// strings, since some frames carry the id inside a string-typed `object`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new user id.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for UserId {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| FrameError::InvalidId(s.to_string()))
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(n) => Ok(Self(n)),
            Repr::Text(s) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Well-known raised-object kinds.
///
/// The wire format accepts any string; these are the kinds the room UI
/// offers out of the box.
pub mod objects {
    /// "I want to say something".
    pub const SAY_SOMETHING: &str = "say something";
    /// "I am ready".
    pub const READY: &str = "ready";
    /// "I want to go faster".
    pub const FASTER: &str = "faster";
    /// "I want to go slower".
    pub const SLOWER: &str = "slower";
    /// "I need a break".
    pub const BREAK: &str = "break";

    /// All well-known kinds, in display order.
    pub const ALL: [&str; 5] = [SAY_SOMETHING, READY, FASTER, SLOWER, BREAK];
}

/// Well-known instant icons.
pub mod icons {
    /// Thumbs up reaction.
    pub const THUMBS_UP: &str = "thumbs-up";
    /// Thumbs down reaction.
    pub const THUMBS_DOWN: &str = "thumbs-down";

    /// All well-known icons.
    pub const ALL: [&str; 2] = [THUMBS_UP, THUMBS_DOWN];
}
