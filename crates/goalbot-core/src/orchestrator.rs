//! Orchestrator wiring user turns through the completion and page adapters.
//!
//! Owns the session store and the two adapter handles. Conversation turns
//! append to the session; summarize-and-save reads the transcript, runs a
//! one-shot extraction completion, and persists the result as a goal page.
//! Neither operation retries a failed adapter call.

use thiserror::Error;

use goalbot_types::llm::{ChatMessage, ChatRole, CompletionRequest, LlmError};
use goalbot_types::page::{GoalPage, PageError};

use crate::llm::CompletionProvider;
use crate::page::PageStore;
use crate::session::{SessionStore, UserId};
use crate::{prompt, reply};

/// Title of created goal pages; the page store stamps the date on it.
const PAGE_TITLE: &str = "Yearly Goals";

/// User label used when the session holds fewer than two messages.
const FALLBACK_USER_LABEL: &str = "User";

/// Errors from the summarize-and-save operation.
///
/// Mapped to fixed user-facing strings at the dispatch boundary; the typed
/// form exists so callers can distinguish a refused precondition from an
/// adapter failure.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no conversation to summarize")]
    NoConversation,

    #[error("completion provider unavailable: {0}")]
    AiUnavailable(#[source] LlmError),

    #[error("page store unavailable: {0}")]
    StoreUnavailable(#[source] PageError),
}

/// Orchestrates the goal-setting workflow over a completion provider and a
/// page store.
pub struct GoalOrchestrator<L, P> {
    sessions: SessionStore,
    llm: L,
    pages: P,
    model: String,
    max_reply_tokens: u32,
}

impl<L: CompletionProvider, P: PageStore> GoalOrchestrator<L, P> {
    /// Create an orchestrator with an empty session store seeded from
    /// [`prompt::SYSTEM_PROMPT`].
    pub fn new(llm: L, pages: P, model: impl Into<String>, max_reply_tokens: u32) -> Self {
        Self {
            sessions: SessionStore::new(prompt::SYSTEM_PROMPT),
            llm,
            pages,
            model: model.into(),
            max_reply_tokens,
        }
    }

    /// Access the session store (used by the dispatcher and tests).
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Access the completion provider (used by the connectivity check).
    pub fn llm(&self) -> &L {
        &self.llm
    }

    /// Access the page store (used by the saved-goals listing).
    pub fn pages(&self) -> &P {
        &self.pages
    }

    /// Handle /chat: create the session if absent and pick the
    /// started-vs-resumed wording.
    pub fn start_chat(&self, user_id: UserId) -> &'static str {
        if self.sessions.exists(user_id) {
            reply::CHAT_RESUMED
        } else {
            self.sessions.get_or_create(user_id);
            reply::CHAT_STARTED
        }
    }

    /// Handle /cancel: discard the session. Idempotent.
    pub fn cancel(&self, user_id: UserId) -> &'static str {
        self.sessions.reset(user_id);
        reply::CANCELLED
    }

    /// Handle one conversation turn: append the user message, run a
    /// completion over the full transcript, append and return the reply.
    ///
    /// On provider failure there is no retry and no rollback: the session
    /// keeps the trailing user message without an assistant reply (the next
    /// turn simply appends after it) and the fixed AI-error string is
    /// returned.
    pub async fn process_message(&self, user_id: UserId, text: &str) -> String {
        let transcript = self.sessions.append_user_and_snapshot(user_id, text);

        // The store seeds every session, so a non-system head is a bug in
        // the store, not a state to silently repair.
        debug_assert_eq!(transcript[0].role, ChatRole::System);

        let request = CompletionRequest {
            model: self.model.clone(),
            messages: transcript,
            max_tokens: self.max_reply_tokens,
        };

        match self.llm.complete(&request).await {
            Ok(response) => {
                self.sessions
                    .append(user_id, ChatRole::Assistant, response.content.clone());
                response.content
            }
            Err(err) => {
                tracing::warn!(
                    user_id,
                    error = %err,
                    "completion failed; turn left without assistant reply"
                );
                reply::AI_ERROR.to_string()
            }
        }
    }

    /// Summarize the session into a numbered goal list and persist it as a
    /// page, returning the page URL unchanged.
    ///
    /// Refused without side effects unless at least one turn has occurred.
    /// Never appends to the session; a failure in either adapter aborts the
    /// operation and leaves the session as it was.
    pub async fn save_goals(&self, user_id: UserId) -> Result<String, SaveError> {
        if !self.sessions.has_meaningful_content(user_id) {
            return Err(SaveError::NoConversation);
        }
        let Some(transcript) = self.sessions.snapshot(user_id) else {
            // Session reset between the check and the snapshot.
            return Err(SaveError::NoConversation);
        };

        // Fresh instruction sequence: extraction prompt, then every
        // non-system message in original order.
        let mut messages = vec![ChatMessage::system(prompt::EXTRACTION_PROMPT)];
        messages.extend(
            transcript
                .iter()
                .filter(|m| m.role != ChatRole::System)
                .cloned(),
        );

        let request = CompletionRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_reply_tokens,
        };

        let goals = self
            .llm
            .complete(&request)
            .await
            .map_err(|err| {
                tracing::warn!(user_id, error = %err, "goal extraction failed");
                SaveError::AiUnavailable(err)
            })?
            .content;

        let user_label = transcript
            .get(1)
            .map(|m| m.content.clone())
            .unwrap_or_else(|| FALLBACK_USER_LABEL.to_string());

        let page = GoalPage {
            title: PAGE_TITLE.to_string(),
            goals,
            user_label,
        };

        let url = self.pages.create_goal_page(&page).await.map_err(|err| {
            tracing::warn!(user_id, error = %err, "goal page creation failed");
            SaveError::StoreUnavailable(err)
        })?;

        tracing::info!(user_id, %url, "goals saved");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use goalbot_types::llm::{CompletionResponse, Usage};
    use goalbot_types::page::GoalPageSummary;

    /// Completion stub that pops canned results and records requests.
    struct StubLlm {
        replies: Mutex<Vec<Result<String, LlmError>>>,
        requests: Mutex<Vec<CompletionRequest>>,
        calls: AtomicUsize,
    }

    impl StubLlm {
        fn new(replies: Vec<Result<String, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                requests: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CompletionProvider for &StubLlm {
        fn name(&self) -> &str {
            "stub-llm"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            let reply = self.replies.lock().unwrap().remove(0)?;
            Ok(CompletionResponse {
                id: "cmpl-test".to_string(),
                content: reply,
                model: request.model.clone(),
                usage: Usage::default(),
            })
        }
    }

    /// Page store stub returning a fixed URL or a provider error.
    struct StubPages {
        url: Option<String>,
        pages: Mutex<Vec<GoalPage>>,
        calls: AtomicUsize,
    }

    impl StubPages {
        fn returning(url: &str) -> Self {
            Self {
                url: Some(url.to_string()),
                pages: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                url: None,
                pages: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl PageStore for &StubPages {
        fn name(&self) -> &str {
            "stub-pages"
        }

        async fn create_goal_page(&self, page: &GoalPage) -> Result<String, PageError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.pages.lock().unwrap().push(page.clone());
            self.url.clone().ok_or(PageError::Provider {
                message: "HTTP 503".to_string(),
            })
        }

        async fn list_goal_pages(&self) -> Result<Vec<GoalPageSummary>, PageError> {
            Ok(Vec::new())
        }
    }

    fn orchestrator<'a>(
        llm: &'a StubLlm,
        pages: &'a StubPages,
    ) -> GoalOrchestrator<&'a StubLlm, &'a StubPages> {
        GoalOrchestrator::new(llm, pages, "gpt-4", 1000)
    }

    #[tokio::test]
    async fn test_turn_appends_user_and_assistant_in_order() {
        let llm = StubLlm::new(vec![Ok("Great goal! Let's break it down.".to_string())]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        let reply = orch.process_message(7, "I want to run a marathon").await;
        assert_eq!(reply, "Great goal! Let's break it down.");

        let session = orch.sessions().snapshot(7).unwrap();
        assert_eq!(session.len(), 3);
        assert_eq!(session[0].role, ChatRole::System);
        assert_eq!(session[1].content, "I want to run a marathon");
        assert_eq!(session[2].content, "Great goal! Let's break it down.");
    }

    #[tokio::test]
    async fn test_turn_sends_full_transcript_to_provider() {
        let llm = StubLlm::new(vec![Ok("first".to_string()), Ok("second".to_string())]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        orch.process_message(7, "one").await;
        orch.process_message(7, "two").await;

        let requests = llm.requests.lock().unwrap();
        // Second request carries seed + first turn + new user message.
        assert_eq!(requests[1].messages.len(), 4);
        assert_eq!(requests[1].messages[0].role, ChatRole::System);
        assert_eq!(requests[1].messages[3].content, "two");
        assert_eq!(requests[1].max_tokens, 1000);

        // N successful turns leave 1 + 2N messages.
        assert_eq!(orch.sessions().snapshot(7).unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_failed_turn_keeps_user_message_and_returns_fixed_string() {
        let llm = StubLlm::new(vec![Err(LlmError::RateLimited)]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        let reply_text = orch.process_message(7, "hello").await;
        assert_eq!(reply_text, reply::AI_ERROR);

        // Trailing user message without an assistant reply is accepted.
        let session = orch.sessions().snapshot(7).unwrap();
        assert_eq!(session.len(), 2);
        assert_eq!(session[1].role, ChatRole::User);
    }

    #[tokio::test]
    async fn test_save_returns_url_unchanged() {
        let llm = StubLlm::new(vec![
            Ok("Great goal! Let's break it down.".to_string()),
            Ok("1. Run a marathon".to_string()),
        ]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        orch.process_message(7, "I want to run a marathon").await;
        let url = orch.save_goals(7).await.unwrap();
        assert_eq!(url, "https://notion.so/abc123");

        let created = pages.pages.lock().unwrap();
        assert_eq!(created[0].title, "Yearly Goals");
        assert_eq!(created[0].goals, "1. Run a marathon");
        // User label is the session's second message.
        assert_eq!(created[0].user_label, "I want to run a marathon");
    }

    #[tokio::test]
    async fn test_save_builds_extraction_sequence_without_session_seed() {
        let llm = StubLlm::new(vec![
            Ok("reply".to_string()),
            Ok("1. Goal".to_string()),
        ]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        orch.process_message(7, "my goal").await;
        orch.save_goals(7).await.unwrap();

        let requests = llm.requests.lock().unwrap();
        let extraction = &requests[1];
        assert_eq!(extraction.messages[0].role, ChatRole::System);
        assert_eq!(extraction.messages[0].content, prompt::EXTRACTION_PROMPT);
        // Seed system message excluded; user + assistant turn carried over.
        assert_eq!(extraction.messages.len(), 3);
        assert_eq!(extraction.messages[1].content, "my goal");
        assert_eq!(extraction.messages[2].content, "reply");
    }

    #[tokio::test]
    async fn test_save_with_no_history_is_refused_with_zero_adapter_calls() {
        let llm = StubLlm::new(vec![]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        // Seed-only session: still refused.
        orch.start_chat(7);
        let err = orch.save_goals(7).await.unwrap_err();
        assert!(matches!(err, SaveError::NoConversation));
        assert_eq!(llm.calls(), 0);
        assert_eq!(pages.calls(), 0);
    }

    #[tokio::test]
    async fn test_save_extraction_failure_skips_page_store_and_keeps_session() {
        let llm = StubLlm::new(vec![
            Ok("reply".to_string()),
            Err(LlmError::AuthenticationFailed),
        ]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        orch.process_message(7, "my goal").await;
        let before = orch.sessions().snapshot(7).unwrap().len();

        let err = orch.save_goals(7).await.unwrap_err();
        assert!(matches!(err, SaveError::AiUnavailable(_)));
        assert_eq!(pages.calls(), 0);
        assert_eq!(orch.sessions().snapshot(7).unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_save_page_failure_leaves_session_unmodified() {
        let llm = StubLlm::new(vec![
            Ok("reply".to_string()),
            Ok("1. Goal".to_string()),
        ]);
        let pages = StubPages::failing();
        let orch = orchestrator(&llm, &pages);

        orch.process_message(7, "my goal").await;
        let before = orch.sessions().snapshot(7).unwrap().len();

        let err = orch.save_goals(7).await.unwrap_err();
        assert!(matches!(err, SaveError::StoreUnavailable(_)));
        assert_eq!(orch.sessions().snapshot(7).unwrap().len(), before);
    }

    #[tokio::test]
    async fn test_start_chat_and_cancel_lifecycle() {
        let llm = StubLlm::new(vec![]);
        let pages = StubPages::returning("https://notion.so/abc123");
        let orch = orchestrator(&llm, &pages);

        assert_eq!(orch.start_chat(7), reply::CHAT_STARTED);
        assert_eq!(orch.start_chat(7), reply::CHAT_RESUMED);

        assert_eq!(orch.cancel(7), reply::CANCELLED);
        assert!(!orch.sessions().exists(7));
        // Cancel with no session is a no-op with the same reply.
        assert_eq!(orch.cancel(7), reply::CANCELLED);
    }
}
