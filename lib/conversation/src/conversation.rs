//! Append-only conversation history.
//!
//! A conversation lives for one chat session. It always opens with the
//! concierge's greeting and only ever grows at the end.

use crate::message::Message;
use serde::Serialize;

/// Ordered message history for one session.
///
/// There is deliberately no way to remove or edit a message once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Starts a conversation seeded with the assistant's greeting.
    #[must_use]
    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::assistant(greeting)],
        }
    }

    /// Appends a message and returns the updated conversation.
    pub fn append(&mut self, message: Message) -> &Self {
        self.messages.push(message);
        self
    }

    /// Returns the full ordered history.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Returns the number of messages, greeting included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Always false: the greeting is present from creation.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Returns the last message.
    #[must_use]
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Finds the most recent user turn in a history slice.
#[must_use]
pub fn last_user_text(history: &[Message]) -> Option<&str> {
    history
        .iter()
        .rev()
        .find(|m| m.is_from_user())
        .map(|m| m.text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Sender;

    const GREETING: &str = "Hello! How can I help?";

    #[test]
    fn starts_with_single_greeting() {
        let conversation = Conversation::seeded(GREETING);
        assert_eq!(conversation.len(), 1);
        let first = &conversation.messages()[0];
        assert_eq!(first.sender, Sender::Assistant);
        assert_eq!(first.text, GREETING);
        assert!(last_user_text(conversation.messages()).is_none());
    }

    #[test]
    fn append_preserves_prior_entries() {
        let mut conversation = Conversation::seeded(GREETING);
        let before = conversation.messages().to_vec();

        conversation.append(Message::user("Any rooms free?"));
        conversation.append(Message::assistant("Plenty."));

        assert_eq!(conversation.len(), 3);
        assert_eq!(&conversation.messages()[..1], before.as_slice());
        assert_eq!(conversation.last_message().map(|m| m.text.as_str()), Some("Plenty."));
    }

    #[test]
    fn last_user_text_skips_assistant_turns() {
        let mut conversation = Conversation::seeded(GREETING);
        conversation.append(Message::user("first"));
        conversation.append(Message::assistant("reply"));
        assert_eq!(last_user_text(conversation.messages()), Some("first"));

        conversation.append(Message::user("second"));
        assert_eq!(last_user_text(conversation.messages()), Some("second"));
    }

    #[test]
    fn serializes_as_message_array() {
        let conversation = Conversation::seeded(GREETING);
        let json = serde_json::to_value(&conversation).expect("serialize");
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }
}
