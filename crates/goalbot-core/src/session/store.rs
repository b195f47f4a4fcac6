//! In-memory conversation session store.
//!
//! Maps a Telegram user id to an ordered message transcript. A non-empty
//! session always starts with the seed system message; sessions are created
//! lazily, grow without bound (an accepted design limitation), and are
//! destroyed only by an explicit reset.
//!
//! Backed by a `DashMap` so concurrent update delivery cannot interleave
//! appends for one user: every mutation runs under the map's shard lock via
//! the entry API, and no guard is ever held across an await point.

use dashmap::DashMap;
use goalbot_types::llm::{ChatMessage, ChatRole};

/// Telegram user identifier.
pub type UserId = i64;

/// Store of per-user conversation transcripts.
pub struct SessionStore {
    sessions: DashMap<UserId, Vec<ChatMessage>>,
    seed_prompt: String,
}

impl SessionStore {
    /// Create an empty store whose sessions are seeded with `seed_prompt`
    /// as the initial system message.
    pub fn new(seed_prompt: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            seed_prompt: seed_prompt.into(),
        }
    }

    fn seeded(&self) -> Vec<ChatMessage> {
        vec![ChatMessage::system(self.seed_prompt.clone())]
    }

    /// Return a snapshot of the user's session, creating a seeded session
    /// first if none exists. Idempotent: a second call without intervening
    /// appends returns identical contents.
    pub fn get_or_create(&self, user_id: UserId) -> Vec<ChatMessage> {
        self.sessions
            .entry(user_id)
            .or_insert_with(|| self.seeded())
            .clone()
    }

    /// Whether a session exists for the user (seeded or not).
    pub fn exists(&self, user_id: UserId) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// Append one message to the user's session, preserving insertion
    /// order. A missing session is seeded first so the system-first
    /// invariant holds under any call order.
    pub fn append(&self, user_id: UserId, role: ChatRole, content: impl Into<String>) {
        let mut session = self.sessions.entry(user_id).or_insert_with(|| self.seeded());
        session.push(ChatMessage {
            role,
            content: content.into(),
        });
    }

    /// Append a user message and return a snapshot of the whole transcript
    /// in one locked operation, so two concurrent turns for the same user
    /// cannot observe each other's half-appended state.
    pub fn append_user_and_snapshot(&self, user_id: UserId, content: impl Into<String>) -> Vec<ChatMessage> {
        let mut session = self.sessions.entry(user_id).or_insert_with(|| self.seeded());
        session.push(ChatMessage::user(content.into()));
        session.clone()
    }

    /// Remove the user's session entirely. Idempotent; a no-op when no
    /// session exists.
    pub fn reset(&self, user_id: UserId) {
        if self.sessions.remove(&user_id).is_some() {
            tracing::debug!(user_id, "session reset");
        }
    }

    /// True iff a session exists and contains more than the seed system
    /// message, i.e. at least one turn has occurred. Gates summarize-and-save.
    pub fn has_meaningful_content(&self, user_id: UserId) -> bool {
        self.sessions
            .get(&user_id)
            .is_some_and(|session| session.len() > 1)
    }

    /// Snapshot of the user's session, `None` when no session exists.
    pub fn snapshot(&self, user_id: UserId) -> Option<Vec<ChatMessage>> {
        self.sessions.get(&user_id).map(|session| session.clone())
    }
}
