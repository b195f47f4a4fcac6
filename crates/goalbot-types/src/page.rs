//! Goal-page types for the document store boundary.
//!
//! A `GoalPage` is what the orchestrator hands to the page store; the
//! store expands it into the provider's wire format. Failures are a typed
//! `PageError` -- there is no "absent URL" success path.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input to a goal-page create operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPage {
    /// Page title (e.g. "Yearly Goals"); the store stamps the date on it.
    pub title: String,
    /// Free-text goal summary extracted from the conversation.
    pub goals: String,
    /// Label identifying who the goals belong to.
    pub user_label: String,
}

/// One row of the saved-goals listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalPageSummary {
    pub title: String,
    pub url: String,
}

/// Errors from page store operations.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),

    #[error("rate limited")]
    RateLimited,

    #[error("authentication failed")]
    AuthenticationFailed,
}
