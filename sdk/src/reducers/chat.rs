//! Chat transcript reducer.

use crate::types::ChatMessage;

/// Appends a message to the transcript.
#[must_use]
pub fn appended(current: &[ChatMessage], message: ChatMessage) -> Vec<ChatMessage> {
    let mut next = Vec::with_capacity(current.len() + 1);
    next.extend_from_slice(current);
    next.push(message);
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UserId;

    #[test]
    fn test_appended_keeps_order() {
        let start = vec![ChatMessage::welcome("hi")];
        let next = appended(&start, ChatMessage::new(UserId::new(1), "Ann", "hello", false));
        assert_eq!(next.len(), 2);
        assert!(next[0].is_system());
        assert_eq!(next[1].text, "hello");
        assert_eq!(start.len(), 1);
    }
}
