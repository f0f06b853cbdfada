//! Poll reducer.
//!
//! Frames that reference a poll apply to the first poll with that id.
//! References to unknown polls leave the list unchanged.

use crate::types::{Poll, PollOption, Vote};

/// Clones the list and applies `change` to the first poll with the given id.
///
/// Returns `None` if no poll matches or `change` reports no effect.
fn with_poll<F>(current: &[Poll], poll: &str, change: F) -> Option<Vec<Poll>>
where
    F: FnOnce(&mut Poll) -> bool,
{
    let index = current.iter().position(|p| p.object == poll)?;
    let mut next = current.to_vec();
    let target = next.get_mut(index)?;

    if change(target) {
        Some(next)
    } else {
        None
    }
}

/// Appends a new, open, empty poll.
#[must_use]
pub fn created(current: &[Poll], poll: &str) -> Vec<Poll> {
    let mut next = current.to_vec();
    next.push(Poll::new(poll));
    next
}

/// Appends an option to its parent poll.
#[must_use]
pub fn option_added(current: &[Poll], option: PollOption) -> Option<Vec<Poll>> {
    let poll = option.pollobject.clone();
    with_poll(current, &poll, |p| {
        p.options.push(option);
        true
    })
}

/// Appends a vote to its poll.
#[must_use]
pub fn voted(current: &[Poll], vote: Vote) -> Option<Vec<Poll>> {
    let poll = vote.pollobject.clone();
    with_poll(current, &poll, |p| {
        p.votes.push(vote);
        true
    })
}

/// Marks a poll closed. Closing an already closed poll changes nothing.
#[must_use]
pub fn closed(current: &[Poll], poll: &str) -> Option<Vec<Poll>> {
    with_poll(current, poll, |p| {
        if p.closed {
            false
        } else {
            p.closed = true;
            true
        }
    })
}

/// Removes the first vote for `option` in the poll.
///
/// The voter is not considered: whichever vote for the option comes first
/// is removed.
#[must_use]
pub fn vote_deleted(current: &[Poll], poll: &str, option: &str) -> Option<Vec<Poll>> {
    with_poll(current, poll, |p| {
        match p.votes.iter().position(|v| v.polloptionobject == option) {
            Some(index) => {
                p.votes.remove(index);
                true
            }
            None => false,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    fn vote(poll: &str, option: &str, user: i64) -> Vote {
        Vote::new(poll, option, UserId::new(user), format!("user{user}"))
    }

    #[test]
    fn test_poll_lifecycle() {
        let polls = created(&[], "P");
        let polls = option_added(&polls, PollOption::new("P", "O1")).expect("option");
        let polls = option_added(&polls, PollOption::new("P", "O2")).expect("option");
        let polls = voted(&polls, vote("P", "O1", 7)).expect("vote");
        let polls = closed(&polls, "P").expect("close");

        let poll = &polls[0];
        assert_eq!(
            poll.options,
            vec![PollOption::new("P", "O1"), PollOption::new("P", "O2")]
        );
        assert_eq!(poll.votes, vec![vote("P", "O1", 7)]);
        assert!(poll.closed);
    }

    #[test]
    fn test_close_only_once() {
        let polls = created(&[], "P");
        let polls = closed(&polls, "P").expect("close");
        assert!(closed(&polls, "P").is_none());
    }

    #[test]
    fn test_unknown_poll_is_noop() {
        let polls = created(&[], "P");
        assert!(option_added(&polls, PollOption::new("Q", "O1")).is_none());
        assert!(voted(&polls, vote("Q", "O1", 1)).is_none());
        assert!(closed(&polls, "Q").is_none());
        assert!(vote_deleted(&polls, "Q", "O1").is_none());
    }

    #[test]
    fn test_first_matching_poll_wins() {
        let polls = created(&created(&[], "P"), "P");
        let polls = option_added(&polls, PollOption::new("P", "O1")).expect("option");
        assert_eq!(polls[0].options.len(), 1);
        assert!(polls[1].options.is_empty());
    }

    #[test]
    fn test_vote_deleted_removes_first_match_ignoring_voter() {
        let polls = created(&[], "P");
        let polls = voted(&polls, vote("P", "O1", 1)).expect("vote");
        let polls = voted(&polls, vote("P", "O2", 2)).expect("vote");
        let polls = voted(&polls, vote("P", "O1", 3)).expect("vote");

        let next = vote_deleted(&polls, "P", "O1").expect("changed");
        assert_eq!(next[0].votes, vec![vote("P", "O2", 2), vote("P", "O1", 3)]);
    }

    #[test]
    fn test_vote_deleted_without_match() {
        let polls = voted(&created(&[], "P"), vote("P", "O2", 2)).expect("vote");
        assert!(vote_deleted(&polls, "P", "O1").is_none());
    }

    #[test]
    fn test_input_not_mutated() {
        let polls = created(&[], "P");
        let _ = option_added(&polls, PollOption::new("P", "O1"));
        assert!(polls[0].options.is_empty());
    }
}
