//! Raised-object types.

use serde::{Deserialize, Serialize};

use super::primitives::UserId;

/// A status a participant has raised about themselves, such as "ready".
///
/// Keyed by `(owner_id, object)`; the room does not deduplicate, so the
/// same key may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaisedObject {
    /// Kind tag.
    pub object: String,

    /// Id of the participant who raised it.
    pub owner_id: UserId,

    /// Name of the participant who raised it.
    pub owner_name: String,

    /// Whether the owner was elevated when raising it.
    pub elevated: bool,
}

impl RaisedObject {
    /// Creates a new raised object.
    #[must_use]
    pub fn new(
        object: impl Into<String>,
        owner_id: UserId,
        owner_name: impl Into<String>,
        elevated: bool,
    ) -> Self {
        Self {
            object: object.into(),
            owner_id,
            owner_name: owner_name.into(),
            elevated,
        }
    }

    /// Returns true if this entry has the given composite key.
    #[must_use]
    pub fn matches(&self, owner_id: UserId, object: &str) -> bool {
        self.owner_id == owner_id && self.object == object
    }

    /// Returns true if the given participant raised this object.
    #[must_use]
    pub fn is_owned_by(&self, id: UserId) -> bool {
        self.owner_id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_composite_key() {
        let obj = RaisedObject::new("ready", UserId::new(1), "Ann", false);
        assert!(obj.matches(UserId::new(1), "ready"));
        assert!(!obj.matches(UserId::new(2), "ready"));
        assert!(!obj.matches(UserId::new(1), "break"));
    }

    #[test]
    fn test_deserialize_with_string_owner_id() {
        let json = r#"{"object":"faster","owner_id":"8","owner_name":"Eve","elevated":false}"#;
        let obj: RaisedObject = serde_json::from_str(json).expect("deserialize");
        assert!(obj.is_owned_by(UserId::new(8)));
    }
}
