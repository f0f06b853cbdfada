//! Participant types.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::primitives::UserId;

/// A participant present in the room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Server-assigned id, unique within the room.
    pub id: UserId,

    /// Display name.
    pub name: String,

    /// Whether the participant holds moderator permissions.
    pub elevated: bool,
}

impl Participant {
    /// Creates a new participant.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, elevated: bool) -> Self {
        Self {
            id,
            name: name.into(),
            elevated,
        }
    }

    /// Orders participants by name.
    ///
    /// Names compare case-insensitively first, then case-sensitively, then by
    /// id so that the order is total and stable across snapshots.
    #[must_use]
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        self.name
            .to_lowercase()
            .cmp(&other.name.to_lowercase())
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.elevated {
            write!(f, "{} (#{}, moderator)", self.name, self.id)
        } else {
            write!(f, "{} (#{})", self.name, self.id)
        }
    }
}

/// A participant as carried in the `joined` map of a snapshot frame, where
/// the id is the map key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ParticipantEntry {
    /// Display name.
    pub name: String,

    /// Moderator flag.
    pub elevated: bool,
}

impl ParticipantEntry {
    /// Attaches the id taken from the snapshot map key.
    #[must_use]
    pub fn with_id(self, id: UserId) -> Participant {
        Participant {
            id,
            name: self.name,
            elevated: self.elevated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmp_by_name_case_insensitive() {
        let a = Participant::new(UserId::new(1), "bob", false);
        let b = Participant::new(UserId::new(2), "Alice", false);
        assert_eq!(b.cmp_by_name(&a), Ordering::Less);
    }

    #[test]
    fn test_cmp_by_name_tie_breaks() {
        let upper = Participant::new(UserId::new(9), "Sam", false);
        let lower = Participant::new(UserId::new(1), "sam", false);
        assert_eq!(upper.cmp_by_name(&lower), Ordering::Less);

        let first = Participant::new(UserId::new(1), "sam", false);
        let second = Participant::new(UserId::new(2), "sam", false);
        assert_eq!(first.cmp_by_name(&second), Ordering::Less);
    }

    #[test]
    fn test_entry_with_id() {
        let entry = ParticipantEntry {
            name: "Carol".to_string(),
            elevated: true,
        };
        let participant = entry.with_id(UserId::new(3));
        assert_eq!(participant, Participant::new(UserId::new(3), "Carol", true));
    }

    #[test]
    fn test_display() {
        let p = Participant::new(UserId::new(4), "Dan", true);
        assert_eq!(p.to_string(), "Dan (#4, moderator)");
    }
}
