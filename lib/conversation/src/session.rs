//! Concierge chat sessions.
//!
//! A session owns one conversation and is the single entry point the chat
//! surface talks to: [`ConciergeSession::submit`] appends the guest's turn,
//! asks the [`ReplyResolver`] for a reply and appends that too.

use crate::conversation::Conversation;
use crate::error::SubmitError;
use crate::message::Message;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hotel_jina_core::ConversationSessionId;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{debug, error, instrument};

/// Reply used when the resolution task dies before producing anything.
pub const CONNECTION_TROUBLE_REPLY: &str =
    "I'm having trouble connecting right now. Please try again.";

/// Produces the next assistant reply for a conversation.
///
/// Implementations must be total: every failure is turned into a
/// displayable reply rather than an error.
#[async_trait]
pub trait ReplyResolver: Send + Sync {
    /// The greeting every new conversation starts with.
    fn greeting(&self) -> &str;

    /// Returns the assistant's reply to the last user turn in `history`.
    async fn resolve(&self, history: &[Message]) -> String;
}

/// One guest's chat session.
pub struct ConciergeSession {
    id: ConversationSessionId,
    created_at: DateTime<Utc>,
    conversation: Arc<RwLock<Conversation>>,
    in_flight: Arc<AtomicBool>,
    resolver: Arc<dyn ReplyResolver>,
}

impl std::fmt::Debug for ConciergeSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConciergeSession")
            .field("id", &self.id)
            .field("created_at", &self.created_at)
            .field("busy", &self.is_busy())
            .finish_non_exhaustive()
    }
}

impl ConciergeSession {
    /// Creates a session whose conversation is seeded with the resolver's greeting.
    #[must_use]
    pub fn new(resolver: Arc<dyn ReplyResolver>) -> Self {
        Self::with_id(ConversationSessionId::new(), resolver)
    }

    /// Creates a session with a known id.
    #[must_use]
    pub fn with_id(id: ConversationSessionId, resolver: Arc<dyn ReplyResolver>) -> Self {
        let conversation = Conversation::seeded(resolver.greeting());
        Self {
            id,
            created_at: Utc::now(),
            conversation: Arc::new(RwLock::new(conversation)),
            in_flight: Arc::new(AtomicBool::new(false)),
            resolver,
        }
    }

    /// Returns the session id.
    #[must_use]
    pub fn id(&self) -> ConversationSessionId {
        self.id
    }

    /// Returns when the session was created.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true while a submission is waiting for its reply.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Returns a snapshot of the current conversation.
    pub async fn conversation(&self) -> Conversation {
        self.conversation.read().await.clone()
    }

    /// Submits a guest message and waits for the concierge's reply.
    ///
    /// Only one submission may be in flight per session; a concurrent call
    /// is refused with [`SubmitError::Busy`] without touching the history.
    /// The append/resolve/append sequence runs on its own task, so dropping
    /// the returned future never leaves a guest turn without a reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is blank, the session is busy, or the
    /// pipeline task could not be joined.
    #[instrument(skip(self, text), fields(session_id = %self.id))]
    pub async fn submit(&self, text: &str) -> Result<Conversation, SubmitError> {
        if text.trim().is_empty() {
            return Err(SubmitError::EmptyMessage);
        }

        let guard = InFlightGuard::acquire(&self.in_flight).ok_or_else(|| {
            debug!("rejecting submission while a reply is pending");
            SubmitError::Busy {
                session_id: self.id,
            }
        })?;

        let session_id = self.id;
        let conversation = Arc::clone(&self.conversation);
        let resolver = Arc::clone(&self.resolver);
        let user_message = Message::user(text);

        let pipeline = tokio::spawn(async move {
            let _guard = guard;

            let history = {
                let mut conversation = conversation.write().await;
                conversation.append(user_message);
                conversation.messages().to_vec()
            };

            let resolution = tokio::spawn(async move { resolver.resolve(&history).await });
            let reply = match resolution.await {
                Ok(reply) => reply,
                Err(e) => {
                    error!(%session_id, error = %e, "reply resolution task failed");
                    CONNECTION_TROUBLE_REPLY.to_string()
                }
            };

            let mut conversation = conversation.write().await;
            conversation.append(Message::assistant(reply)).clone()
        });

        pipeline.await.map_err(|e| SubmitError::PipelineAborted {
            reason: e.to_string(),
        })
    }
}

/// Holds the session's in-flight flag until dropped.
struct InFlightGuard(Arc<AtomicBool>);

impl InFlightGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(Arc::clone(flag)))
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::last_user_text;
    use crate::message::Sender;
    use std::time::Duration;
    use tokio::sync::Notify;

    const GREETING: &str = "Welcome to the test hotel.";

    struct EchoResolver;

    #[async_trait]
    impl ReplyResolver for EchoResolver {
        fn greeting(&self) -> &str {
            GREETING
        }

        async fn resolve(&self, history: &[Message]) -> String {
            format!("echo: {}", last_user_text(history).unwrap_or_default())
        }
    }

    struct GatedResolver {
        gate: Arc<Notify>,
    }

    #[async_trait]
    impl ReplyResolver for GatedResolver {
        fn greeting(&self) -> &str {
            GREETING
        }

        async fn resolve(&self, _history: &[Message]) -> String {
            self.gate.notified().await;
            "released".to_string()
        }
    }

    struct PanickingResolver;

    #[async_trait]
    impl ReplyResolver for PanickingResolver {
        fn greeting(&self) -> &str {
            GREETING
        }

        async fn resolve(&self, _history: &[Message]) -> String {
            panic!("resolver exploded");
        }
    }

    #[tokio::test]
    async fn new_session_holds_only_the_greeting() {
        let session = ConciergeSession::new(Arc::new(EchoResolver));
        let conversation = session.conversation().await;

        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.messages()[0].text, GREETING);
        assert!(!session.is_busy());
    }

    #[tokio::test]
    async fn submit_appends_user_then_assistant() {
        let session = ConciergeSession::new(Arc::new(EchoResolver));
        let conversation = session.submit("Is breakfast included?").await.expect("submit");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "Is breakfast included?");
        assert_eq!(messages[2].sender, Sender::Assistant);
        assert_eq!(messages[2].text, "echo: Is breakfast included?");
    }

    #[tokio::test]
    async fn history_grows_by_two_per_submission_and_never_changes() {
        let session = ConciergeSession::new(Arc::new(EchoResolver));
        let mut previous = session.conversation().await.messages().to_vec();

        for n in 1..=4 {
            let conversation = session.submit(&format!("question {n}")).await.expect("submit");
            assert_eq!(conversation.len(), 1 + 2 * n);
            assert_eq!(&conversation.messages()[..previous.len()], previous.as_slice());
            previous = conversation.messages().to_vec();
        }
    }

    #[tokio::test]
    async fn blank_text_is_rejected_without_appending() {
        let session = ConciergeSession::new(Arc::new(EchoResolver));

        assert_eq!(session.submit("   \n").await, Err(SubmitError::EmptyMessage));
        assert_eq!(session.conversation().await.len(), 1);
    }

    #[tokio::test]
    async fn concurrent_submission_is_refused_while_busy() {
        let gate = Arc::new(Notify::new());
        let session = Arc::new(ConciergeSession::new(Arc::new(GatedResolver {
            gate: Arc::clone(&gate),
        })));

        let first = {
            let session = Arc::clone(&session);
            tokio::spawn(async move { session.submit("first").await })
        };
        while !session.is_busy() {
            tokio::task::yield_now().await;
        }

        let refused = session.submit("second").await;
        assert!(matches!(refused, Err(SubmitError::Busy { .. })));

        gate.notify_one();
        let conversation = first.await.expect("join").expect("submit");
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.messages()[1].text, "first");
        assert!(!session.is_busy());

        gate.notify_one();
        let conversation = session.submit("third").await.expect("accepted once idle");
        assert_eq!(conversation.len(), 5);
    }

    #[tokio::test]
    async fn dropped_submission_still_records_the_reply() {
        let gate = Arc::new(Notify::new());
        let session = ConciergeSession::new(Arc::new(GatedResolver {
            gate: Arc::clone(&gate),
        }));

        let abandoned =
            tokio::time::timeout(Duration::from_millis(10), session.submit("anyone there?")).await;
        assert!(abandoned.is_err());
        assert!(session.is_busy());

        gate.notify_one();
        while session.is_busy() {
            tokio::task::yield_now().await;
        }

        let conversation = session.conversation().await;
        assert_eq!(conversation.len(), 3);
        assert_eq!(conversation.messages()[1].text, "anyone there?");
        assert_eq!(
            conversation.last_message().map(|m| m.text.as_str()),
            Some("released")
        );
    }

    #[tokio::test]
    async fn panicking_resolver_degrades_to_connection_trouble_reply() {
        let session = ConciergeSession::new(Arc::new(PanickingResolver));
        let conversation = session.submit("hello").await.expect("submit");

        assert_eq!(conversation.len(), 3);
        assert_eq!(
            conversation.last_message().map(|m| m.text.as_str()),
            Some(CONNECTION_TROUBLE_REPLY)
        );
        assert!(!session.is_busy());
    }
}
