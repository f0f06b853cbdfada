//! Participant list reducer.
//!
//! The list is kept sorted by name after every change.

use crate::types::{Participant, UserId};

/// Sorts participants by name.
pub fn sort_by_name(list: &mut [Participant]) {
    list.sort_by(Participant::cmp_by_name);
}

/// Replaces the list with a snapshot.
#[must_use]
pub fn snapshot(current: &[Participant], mut incoming: Vec<Participant>) -> Option<Vec<Participant>> {
    sort_by_name(&mut incoming);
    if incoming == current {
        None
    } else {
        Some(incoming)
    }
}

/// Adds a participant. An existing entry with the same id is replaced.
#[must_use]
pub fn joined(current: &[Participant], participant: Participant) -> Option<Vec<Participant>> {
    let mut next: Vec<Participant> = current
        .iter()
        .filter(|p| p.id != participant.id)
        .cloned()
        .collect();
    next.push(participant);
    sort_by_name(&mut next);

    if next == current {
        None
    } else {
        Some(next)
    }
}

/// Sets the moderator flag of one participant.
#[must_use]
pub fn set_elevated(current: &[Participant], id: UserId, elevated: bool) -> Option<Vec<Participant>> {
    if !current.iter().any(|p| p.id == id && p.elevated != elevated) {
        return None;
    }

    let next = current
        .iter()
        .map(|p| {
            if p.id == id {
                Participant {
                    elevated,
                    ..p.clone()
                }
            } else {
                p.clone()
            }
        })
        .collect();

    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: i64, name: &str, elevated: bool) -> Participant {
        Participant::new(UserId::new(id), name, elevated)
    }

    fn names(list: &[Participant]) -> Vec<&str> {
        list.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_snapshot_sorts_by_name() {
        let next = snapshot(&[], vec![p(2, "carol", false), p(1, "Bob", false), p(3, "alice", true)])
            .expect("changed");
        assert_eq!(names(&next), vec!["alice", "Bob", "carol"]);
    }

    #[test]
    fn test_snapshot_twice_is_identical() {
        let incoming = vec![p(2, "Zed", false), p(1, "Amy", false)];
        let first = snapshot(&[], incoming.clone()).expect("changed");
        assert!(snapshot(&first, incoming).is_none());
    }

    #[test]
    fn test_joined_appends_and_sorts() {
        let current = vec![p(1, "Amy", false), p(2, "Zed", false)];
        let next = joined(&current, p(3, "Max", false)).expect("changed");
        assert_eq!(names(&next), vec!["Amy", "Max", "Zed"]);
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn test_joined_replaces_same_id() {
        let current = vec![p(1, "Amy", false)];
        let next = joined(&current, p(1, "Amelia", true)).expect("changed");
        assert_eq!(next, vec![p(1, "Amelia", true)]);
        assert!(joined(&next, p(1, "Amelia", true)).is_none());
    }

    #[test]
    fn test_set_elevated() {
        let current = vec![p(1, "Amy", false), p(2, "Zed", false)];
        let next = set_elevated(&current, UserId::new(2), true).expect("changed");
        assert!(next[1].elevated);
        assert!(!next[0].elevated);
        assert!(!current[1].elevated);
    }

    #[test]
    fn test_set_elevated_unknown_or_unchanged() {
        let current = vec![p(1, "Amy", true)];
        assert!(set_elevated(&current, UserId::new(9), true).is_none());
        assert!(set_elevated(&current, UserId::new(1), true).is_none());
    }
}
