//! Frame dispatcher.
//!
//! Routes a decoded server frame to the reducers it affects and republishes
//! only the slices whose value changed.

use tracing::{debug, warn};

use crate::error::FrameError;
use crate::reducers::{chat, polls, raised, self_status, users};
use crate::store::{RoomStore, SliceKind};
use crate::types::{
    ChatMessage, InstantEvent, Participant, PollOption, RaisedObject, ServerError, UserId, Vote,
};
use crate::ws::messages::{InstantPayload, ServerMessage};

/// What a dispatched frame did to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Slices republished, in publication order.
    pub changed: Vec<SliceKind>,

    /// Whether an ephemeral event was emitted.
    pub emitted: bool,
}

impl Dispatch {
    /// Returns true if the frame had no observable effect.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changed.is_empty() && !self.emitted
    }

    fn track(&mut self, kind: SliceKind, changed: bool) {
        if changed {
            self.changed.push(kind);
        }
    }
}

/// Applies one frame to the store.
///
/// # Errors
///
/// Returns `FrameError::Malformed` for frames that decoded but cannot be
/// applied: a snapshot with a non-numeric participant key, or a chat
/// instant without its sender. The store is left untouched in that case.
pub fn dispatch(store: &RoomStore, message: ServerMessage) -> Result<Dispatch, FrameError> {
    let mut outcome = Dispatch::default();

    match message {
        ServerMessage::SelfStatus { object, elevated } => {
            if let Some(existing) = store.self_status.get().id {
                if existing != object {
                    warn!(
                        "Ignoring selfstatus id {} (already identified as {})",
                        object, existing
                    );
                }
            }
            let changed = store
                .self_status
                .update(|s| self_status::identified(s, object, elevated));
            outcome.track(SliceKind::SelfStatus, changed);
        }

        ServerMessage::All { joined, raised } => {
            let participants = joined
                .into_iter()
                .map(|(key, entry)| {
                    key.parse::<UserId>().map(|id| entry.with_id(id)).map_err(|_| {
                        FrameError::Malformed {
                            kind: "all".to_string(),
                            reason: format!("participant key '{}' is not an id", key),
                        }
                    })
                })
                .collect::<Result<Vec<Participant>, FrameError>>()?;

            let changed = store
                .participants
                .update(|current| users::snapshot(current, participants));
            outcome.track(SliceKind::Participants, changed);

            let changed = store
                .raised
                .update(|current| raised::snapshot(current, raised));
            outcome.track(SliceKind::Raised, changed);
        }

        ServerMessage::Joined { id, name, elevated } => {
            let participant = Participant::new(id, name, elevated);
            let changed = store
                .participants
                .update(|current| users::joined(current, participant));
            outcome.track(SliceKind::Participants, changed);
        }

        ServerMessage::Raised {
            object,
            owner_id,
            owner_name,
            elevated,
        } => {
            let entry = RaisedObject::new(object, owner_id, owner_name, elevated);
            let changed = store
                .raised
                .update(|current| Some(raised::raised(current, entry)));
            outcome.track(SliceKind::Raised, changed);
        }

        ServerMessage::Lower { object, owner_id } => {
            let changed = store
                .raised
                .update(|current| raised::lowered(current, owner_id, &object));
            outcome.track(SliceKind::Raised, changed);
        }

        ServerMessage::Instant {
            object,
            owner_id,
            owner_name,
            elevated,
        } => match object {
            InstantPayload::Icon(icon) => {
                store
                    .instants
                    .emit(InstantEvent::new(icon).with_owner(owner_id, owner_name));
                outcome.emitted = true;
            }
            InstantPayload::Chat(text) => {
                let (Some(owner_id), Some(owner_name)) = (owner_id, owner_name) else {
                    return Err(FrameError::Malformed {
                        kind: "instant".to_string(),
                        reason: "chat message without owner".to_string(),
                    });
                };
                let message =
                    ChatMessage::new(owner_id, owner_name, text, elevated.unwrap_or(false));
                let changed = store
                    .chat
                    .update(|current| Some(chat::appended(current, message)));
                outcome.track(SliceKind::Chat, changed);
            }
        },

        ServerMessage::Poll { object } => {
            let changed = store
                .polls
                .update(|current| Some(polls::created(current, &object)));
            outcome.track(SliceKind::Polls, changed);
        }

        ServerMessage::PollOption {
            pollobject,
            polloptionobject,
        } => {
            let option = PollOption::new(pollobject, polloptionobject);
            let changed = store
                .polls
                .update(|current| polls::option_added(current, option));
            outcome.track(SliceKind::Polls, changed);
        }

        ServerMessage::Vote {
            userid,
            username,
            polloptionobject,
            pollobject,
        } => {
            let vote = Vote::new(pollobject, polloptionobject, userid, username);
            let changed = store.polls.update(|current| polls::voted(current, vote));
            outcome.track(SliceKind::Polls, changed);
        }

        ServerMessage::PollClose { object } => {
            let changed = store
                .polls
                .update(|current| polls::closed(current, &object));
            outcome.track(SliceKind::Polls, changed);
        }

        ServerMessage::VoteDelete {
            pollobject,
            polloptionobject,
            ..
        } => {
            let changed = store
                .polls
                .update(|current| polls::vote_deleted(current, &pollobject, &polloptionobject));
            outcome.track(SliceKind::Polls, changed);
        }

        ServerMessage::Elevated { object } => {
            apply_elevation(store, object, true, &mut outcome);
        }

        ServerMessage::Receded { object } => {
            apply_elevation(store, object, false, &mut outcome);
        }

        ServerMessage::Error { object } => {
            store.errors.emit(ServerError::new(object));
            outcome.emitted = true;
        }

        ServerMessage::Unknown => {
            debug!("Ignoring frame of unknown type");
        }
    }

    Ok(outcome)
}

/// Updates the participant list and, when the target is the local
/// participant, the self status.
fn apply_elevation(store: &RoomStore, id: UserId, elevated: bool, outcome: &mut Dispatch) {
    let changed = store
        .participants
        .update(|current| users::set_elevated(current, id, elevated));
    outcome.track(SliceKind::Participants, changed);

    let changed = store
        .self_status
        .update(|s| self_status::elevation_changed(s, id, elevated));
    outcome.track(SliceKind::SelfStatus, changed);
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::types::SelfStatus;
    use crate::ws::messages::decode_frame;

    fn store() -> RoomStore {
        RoomStore::new(ChatMessage::welcome("welcome"))
    }

    fn apply(store: &RoomStore, json: &str) -> Dispatch {
        let msg = decode_frame(json).expect("decode");
        dispatch(store, msg).expect("dispatch")
    }

    const SNAPSHOT: &str = r#"{
        "type": "all",
        "joined": {
            "3": {"name": "carol", "elevated": false},
            "1": {"name": "Alice", "elevated": true},
            "2": {"name": "bob", "elevated": false}
        },
        "raised": [{"object": "ready", "owner_id": 2, "owner_name": "bob", "elevated": false}]
    }"#;

    #[test]
    fn test_snapshot_replaces_users_and_raised() {
        let store = store();
        let outcome = apply(&store, SNAPSHOT);
        assert_eq!(
            outcome.changed,
            vec![SliceKind::Participants, SliceKind::Raised]
        );

        let names: Vec<String> = store.participants.get().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);
        assert_eq!(store.participants.get()[0].id, UserId::new(1));
        assert_eq!(store.raised.get().len(), 1);
    }

    #[test]
    fn test_snapshot_idempotent() {
        let store = store();
        apply(&store, SNAPSHOT);
        let first = store.participants.get();

        let outcome = apply(&store, SNAPSHOT);
        assert!(outcome.is_noop());
        assert_eq!(*store.participants.get(), *first);
    }

    #[test]
    fn test_snapshot_with_bad_key_is_rejected() {
        let store = store();
        let msg = decode_frame(
            r#"{"type":"all","joined":{"x":{"name":"a","elevated":false}},"raised":[]}"#,
        )
        .expect("decode");
        assert!(dispatch(&store, msg).is_err());
        assert!(store.participants.get().is_empty());
    }

    #[test]
    fn test_joined_sorted_insert() {
        let store = store();
        apply(&store, SNAPSHOT);
        apply(&store, r#"{"type":"joined","id":4,"name":"Ben","elevated":false}"#);

        let names: Vec<String> = store.participants.get().iter().map(|p| p.name.clone()).collect();
        assert_eq!(names, vec!["Alice", "Ben", "bob", "carol"]);
    }

    #[test]
    fn test_elevation_propagates_to_self() {
        let store = store();
        apply(&store, SNAPSHOT);
        apply(&store, r#"{"type":"selfstatus","object":2,"elevated":false}"#);

        let outcome = apply(&store, r#"{"type":"elevated","object":2}"#);
        assert_eq!(
            outcome.changed,
            vec![SliceKind::Participants, SliceKind::SelfStatus]
        );
        assert!(store.self_status.get().elevated);
        assert!(store
            .find_participant(UserId::new(2))
            .map(|p| p.elevated)
            .unwrap_or(false));
    }

    #[test]
    fn test_receded_other_user_leaves_self() {
        let store = store();
        apply(&store, SNAPSHOT);
        apply(&store, r#"{"type":"selfstatus","object":2,"elevated":true}"#);

        let outcome = apply(&store, r#"{"type":"receded","object":1}"#);
        assert_eq!(outcome.changed, vec![SliceKind::Participants]);
        assert_eq!(
            *store.self_status.get(),
            SelfStatus {
                id: Some(UserId::new(2)),
                elevated: true,
            }
        );
        assert!(!store.participants.get()[0].elevated);
    }

    #[test]
    fn test_raise_and_lower() {
        let store = store();
        apply(&store, SNAPSHOT);
        apply(
            &store,
            r#"{"type":"raised","object":"ready","owner_id":1,"owner_name":"Alice","elevated":true}"#,
        );
        apply(
            &store,
            r#"{"type":"raised","object":"break","owner_id":1,"owner_name":"Alice","elevated":true}"#,
        );
        assert_eq!(store.raised.get().len(), 3);

        apply(&store, r#"{"type":"lower","object":"ready","owner_id":1}"#);
        assert_eq!(
            *store.raised.get(),
            vec![
                RaisedObject::new("ready", UserId::new(2), "bob", false),
                RaisedObject::new("break", UserId::new(1), "Alice", true),
            ]
        );

        let outcome = apply(&store, r#"{"type":"lower","object":"faster","owner_id":3}"#);
        assert!(outcome.is_noop());
    }

    #[test]
    fn test_poll_lifecycle() {
        let store = store();
        for frame in [
            r#"{"type":"poll","object":"P"}"#,
            r#"{"type":"polloption","pollobject":"P","polloptionobject":"O1"}"#,
            r#"{"type":"polloption","pollobject":"P","polloptionobject":"O2"}"#,
            r#"{"type":"vote","pollobject":"P","polloptionobject":"O1","userid":9,"username":"U"}"#,
            r#"{"type":"pollclose","object":"P"}"#,
        ] {
            assert_eq!(apply(&store, frame).changed, vec![SliceKind::Polls]);
        }

        let poll = store.find_poll("P").expect("poll");
        assert_eq!(poll.tally(), vec![("O1", 1), ("O2", 0)]);
        assert_eq!(poll.votes.len(), 1);
        assert_eq!(poll.votes[0].userid, UserId::new(9));
        assert!(poll.closed);
    }

    #[test]
    fn test_votedelete_ignores_userid() {
        let store = store();
        apply(&store, r#"{"type":"poll","object":"P"}"#);
        apply(
            &store,
            r#"{"type":"vote","pollobject":"P","polloptionobject":"O1","userid":1,"username":"U1"}"#,
        );
        apply(
            &store,
            r#"{"type":"vote","pollobject":"P","polloptionobject":"O2","userid":2,"username":"U2"}"#,
        );

        apply(
            &store,
            r#"{"type":"votedelete","pollobject":"P","polloptionobject":"O1","userid":"42"}"#,
        );
        let poll = store.find_poll("P").expect("poll");
        assert_eq!(poll.votes.len(), 1);
        assert_eq!(poll.votes[0].polloptionobject, "O2");
    }

    #[test]
    fn test_instant_icon_emits_event_only() {
        let store = store();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        store.instants.subscribe(move |e: &InstantEvent| {
            sink.lock().expect("lock").push(e.object.clone());
        });

        let outcome = apply(
            &store,
            r#"{"type":"instant","object":{"type":"icon","value":"thumbs-up"},"owner_id":1,"owner_name":"Alice"}"#,
        );
        assert!(outcome.emitted);
        assert!(outcome.changed.is_empty());
        assert_eq!(*received.lock().expect("lock"), vec!["thumbs-up"]);
        assert_eq!(store.chat.get().len(), 1);
    }

    #[test]
    fn test_instant_chat_appends_message() {
        let store = store();
        let outcome = apply(
            &store,
            r#"{"type":"instant","object":{"type":"chat","value":"hi all"},"owner_id":1,"owner_name":"Alice","elevated":true}"#,
        );
        assert_eq!(outcome.changed, vec![SliceKind::Chat]);

        let chat = store.chat.get();
        assert_eq!(chat.len(), 2);
        assert_eq!(
            chat[1],
            ChatMessage::new(UserId::new(1), "Alice", "hi all", true)
        );
    }

    #[test]
    fn test_instant_chat_without_owner_is_rejected() {
        let store = store();
        let msg = decode_frame(r#"{"type":"instant","object":{"type":"chat","value":"hi"}}"#)
            .expect("decode");
        assert!(dispatch(&store, msg).is_err());
        assert_eq!(store.chat.get().len(), 1);
    }

    #[test]
    fn test_error_frame_surfaced() {
        let store = store();
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&received);
        store.errors.subscribe(move |e: &ServerError| {
            sink.lock().expect("lock").push(e.message.clone());
        });

        let outcome = apply(&store, r#"{"type":"error","object":"Room is locked"}"#);
        assert!(outcome.emitted);
        assert_eq!(*received.lock().expect("lock"), vec!["Room is locked"]);
    }

    #[test]
    fn test_unknown_frame_noop() {
        let store = store();
        assert!(apply(&store, r#"{"type":"typing","object":1}"#).is_noop());
    }

    #[test]
    fn test_only_changed_slices_notify() {
        let store = store();
        let calls = Arc::new(Mutex::new(0u32));
        let counter = Arc::clone(&calls);
        store.raised.subscribe(move |_| {
            *counter.lock().expect("lock") += 1;
        });

        apply(&store, r#"{"type":"joined","id":1,"name":"A","elevated":false}"#);
        assert_eq!(*calls.lock().expect("lock"), 0);
    }
}
