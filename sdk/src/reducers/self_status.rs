//! Local participant status reducer.

use crate::types::{SelfStatus, UserId};

/// Applies a `selfstatus` frame.
///
/// The id is only taken the first time; later frames update the moderator
/// flag and keep the original id.
#[must_use]
pub fn identified(current: &SelfStatus, id: UserId, elevated: bool) -> Option<SelfStatus> {
    let next = SelfStatus {
        id: Some(current.id.unwrap_or(id)),
        elevated,
    };

    if next == *current {
        None
    } else {
        Some(next)
    }
}

/// Applies an `elevated`/`receded` frame if it targets the local participant.
#[must_use]
pub fn elevation_changed(current: &SelfStatus, id: UserId, elevated: bool) -> Option<SelfStatus> {
    if !current.is_self(id) || current.elevated == elevated {
        return None;
    }

    Some(SelfStatus {
        elevated,
        ..*current
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identified_sets_id_once() {
        let status = identified(&SelfStatus::default(), UserId::new(4), false).expect("changed");
        assert_eq!(status.id, Some(UserId::new(4)));

        let status = identified(&status, UserId::new(9), true).expect("changed");
        assert_eq!(status.id, Some(UserId::new(4)));
        assert!(status.elevated);
    }

    #[test]
    fn test_identified_unchanged() {
        let status = SelfStatus {
            id: Some(UserId::new(4)),
            elevated: false,
        };
        assert!(identified(&status, UserId::new(4), false).is_none());
    }

    #[test]
    fn test_elevation_changed_targets_self_only() {
        let status = SelfStatus {
            id: Some(UserId::new(4)),
            elevated: false,
        };
        assert!(elevation_changed(&status, UserId::new(5), true).is_none());

        let next = elevation_changed(&status, UserId::new(4), true).expect("changed");
        assert!(next.elevated);
        assert!(elevation_changed(&next, UserId::new(4), true).is_none());
    }

    #[test]
    fn test_elevation_before_identity_is_ignored() {
        assert!(elevation_changed(&SelfStatus::default(), UserId::new(1), true).is_none());
    }
}
