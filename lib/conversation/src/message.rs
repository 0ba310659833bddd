//! Message types for concierge conversations.

use chrono::{DateTime, Utc};
use hotel_jina_core::MessageId;
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The guest typing into the chat widget.
    User,
    /// The concierge.
    Assistant,
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message identifier, also used as the display key.
    pub id: MessageId,
    /// Message author.
    pub sender: Sender,
    /// Display text. Assistant replies may span several lines.
    pub text: String,
    /// When the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new message.
    #[must_use]
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: MessageId::new(),
            sender,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Creates a user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    /// Creates an assistant message.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Sender::Assistant, text)
    }

    /// Returns true if the guest wrote this message.
    #[must_use]
    pub fn is_from_user(&self) -> bool {
        self.sender == Sender::User
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_creation() {
        let msg = Message::user("Do you have parking?");
        assert_eq!(msg.sender, Sender::User);
        assert_eq!(msg.text, "Do you have parking?");
        assert!(msg.is_from_user());
    }

    #[test]
    fn assistant_message_is_not_from_user() {
        let msg = Message::assistant("Yes!\n\nValet parking is free.");
        assert!(!msg.is_from_user());
        assert!(msg.text.contains('\n'));
    }

    #[test]
    fn sender_serializes_lowercase() {
        let msg = Message::assistant("Hi");
        let json = serde_json::to_value(&msg).expect("serialize");
        assert_eq!(json["sender"], "assistant");
        assert!(json["id"].is_string());
    }
}
