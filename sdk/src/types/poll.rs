//! Poll types.
//!
//! A poll is created empty by the server; options and votes are appended by
//! later frames and the poll may be closed exactly once.

use serde::{Deserialize, Serialize};

use super::primitives::UserId;

/// A live poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    /// Poll id, which is also its title.
    pub object: String,

    /// Options in the order they were added.
    pub options: Vec<PollOption>,

    /// Votes in the order they were cast.
    pub votes: Vec<Vote>,

    /// Whether the poll has been closed.
    pub closed: bool,
}

impl Poll {
    /// Creates an open poll with no options or votes.
    #[must_use]
    pub fn new(object: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            options: Vec::new(),
            votes: Vec::new(),
            closed: false,
        }
    }

    /// Returns the number of votes cast for an option.
    #[must_use]
    pub fn votes_for(&self, option: &str) -> usize {
        self.votes
            .iter()
            .filter(|v| v.polloptionobject == option)
            .count()
    }

    /// Returns `(option, votes)` pairs in option order.
    #[must_use]
    pub fn tally(&self) -> Vec<(&str, usize)> {
        self.options
            .iter()
            .map(|o| (o.polloptionobject.as_str(), self.votes_for(&o.polloptionobject)))
            .collect()
    }

    /// Returns true if the option exists in this poll.
    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o.polloptionobject == option)
    }

    /// Returns true if the user has at least one vote in this poll.
    #[must_use]
    pub fn has_voted(&self, user: UserId) -> bool {
        self.votes.iter().any(|v| v.userid == user)
    }
}

/// An option of a poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    /// Option id, which is also its title.
    pub polloptionobject: String,

    /// Parent poll id.
    pub pollobject: String,
}

impl PollOption {
    /// Creates a new option for the given poll.
    #[must_use]
    pub fn new(pollobject: impl Into<String>, polloptionobject: impl Into<String>) -> Self {
        Self {
            polloptionobject: polloptionobject.into(),
            pollobject: pollobject.into(),
        }
    }
}

/// A vote cast by a participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Voter id.
    pub userid: UserId,

    /// Voter name.
    pub username: String,

    /// Chosen option id.
    pub polloptionobject: String,

    /// Poll id.
    pub pollobject: String,
}

impl Vote {
    /// Creates a new vote.
    #[must_use]
    pub fn new(
        pollobject: impl Into<String>,
        polloptionobject: impl Into<String>,
        userid: UserId,
        username: impl Into<String>,
    ) -> Self {
        Self {
            userid,
            username: username.into(),
            polloptionobject: polloptionobject.into(),
            pollobject: pollobject.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_poll() -> Poll {
        let mut poll = Poll::new("lunch");
        poll.options.push(PollOption::new("lunch", "pizza"));
        poll.options.push(PollOption::new("lunch", "sushi"));
        poll.votes.push(Vote::new("lunch", "pizza", UserId::new(1), "Ann"));
        poll.votes.push(Vote::new("lunch", "pizza", UserId::new(2), "Ben"));
        poll.votes.push(Vote::new("lunch", "sushi", UserId::new(3), "Cal"));
        poll
    }

    #[test]
    fn test_poll_new_is_open_and_empty() {
        let poll = Poll::new("p");
        assert!(!poll.closed);
        assert!(poll.options.is_empty());
        assert!(poll.votes.is_empty());
    }

    #[test]
    fn test_votes_for() {
        let poll = sample_poll();
        assert_eq!(poll.votes_for("pizza"), 2);
        assert_eq!(poll.votes_for("sushi"), 1);
        assert_eq!(poll.votes_for("tacos"), 0);
    }

    #[test]
    fn test_tally_in_option_order() {
        let poll = sample_poll();
        assert_eq!(poll.tally(), vec![("pizza", 2), ("sushi", 1)]);
    }

    #[test]
    fn test_has_voted_and_option() {
        let poll = sample_poll();
        assert!(poll.has_voted(UserId::new(3)));
        assert!(!poll.has_voted(UserId::new(4)));
        assert!(poll.has_option("sushi"));
        assert!(!poll.has_option("tacos"));
    }
}
