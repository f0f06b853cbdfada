//! Logs room state changes as they are published.

use tracing::{info, warn};
use vimeet_sdk::{Poll, RoomStore};

/// Formats a poll with its tally, e.g. `lunch [open]: pizza=2, sushi=0`.
#[must_use]
pub fn poll_line(poll: &Poll) -> String {
    let state = if poll.closed { "closed" } else { "open" };
    let tally: Vec<String> = poll
        .tally()
        .into_iter()
        .map(|(option, votes)| format!("{}={}", option, votes))
        .collect();

    if tally.is_empty() {
        format!("{} [{}]: no options", poll.object, state)
    } else {
        format!("{} [{}]: {}", poll.object, state, tally.join(", "))
    }
}

/// Subscribes a logging callback to every slice and event stream.
pub fn subscribe(store: &RoomStore) {
    store.connection.subscribe(|state| {
        info!("Connection {}", state);
    });

    store.participants.subscribe(|participants| {
        info!("{} participant(s) in the room", participants.len());
    });

    store.raised.subscribe(|raised| {
        let entries: Vec<String> = raised
            .iter()
            .map(|r| format!("{} by {}", r.object, r.owner_name))
            .collect();
        info!("Raised: [{}]", entries.join(", "));
    });

    store.polls.subscribe(|polls| {
        for poll in polls.iter() {
            info!("Poll {}", poll_line(poll));
        }
    });

    store.chat.subscribe(|chat| {
        if let Some(message) = chat.last() {
            info!("<{}> {}", message.owner_name, message.text);
        }
    });

    store.self_status.subscribe(|status| match status.id {
        Some(id) if status.elevated => info!("You are #{} (moderator)", id),
        Some(id) => info!("You are #{}", id),
        None => {}
    });

    store.instants.subscribe(|event| {
        let sender = event.owner_name.as_deref().unwrap_or("someone");
        info!("{} reacted with {}", sender, event.object);
    });

    store.errors.subscribe(|error| {
        warn!("Server error: {}", error.message);
    });
}
