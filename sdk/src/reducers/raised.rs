//! Raised-object reducer.

use crate::types::{RaisedObject, UserId};

/// Replaces the list with a snapshot, verbatim.
#[must_use]
pub fn snapshot(current: &[RaisedObject], incoming: Vec<RaisedObject>) -> Option<Vec<RaisedObject>> {
    if incoming == current {
        None
    } else {
        Some(incoming)
    }
}

/// Appends a raised object. Identical keys accumulate.
#[must_use]
pub fn raised(current: &[RaisedObject], object: RaisedObject) -> Vec<RaisedObject> {
    let mut next = current.to_vec();
    next.push(object);
    next
}

/// Removes every entry with the key `(owner_id, object)`.
#[must_use]
pub fn lowered(current: &[RaisedObject], owner_id: UserId, object: &str) -> Option<Vec<RaisedObject>> {
    if !current.iter().any(|r| r.matches(owner_id, object)) {
        return None;
    }

    Some(
        current
            .iter()
            .filter(|r| !r.matches(owner_id, object))
            .cloned()
            .collect(),
    )
}
