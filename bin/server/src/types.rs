//! Request and response bodies for the concierge API.

use hotel_jina_conversation::{ConciergeSession, Conversation, Message};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/concierge/messages`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SubmitMessageRequest {
    pub text: String,
}

/// Conversation state handed to the chat widget.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationView {
    pub session_id: String,
    /// True while a reply is pending; the widget shows its loading state.
    pub busy: bool,
    pub messages: Vec<Message>,
}

impl ConversationView {
    /// Builds the view from a session and a conversation snapshot.
    pub fn new(session: &ConciergeSession, conversation: Conversation) -> Self {
        Self {
            session_id: session.id().to_string(),
            busy: session.is_busy(),
            messages: conversation.messages().to_vec(),
        }
    }
}
