//! PageStore trait definition.
//!
//! The abstraction over the document store that persists extracted goals.
//! Create returns the canonical page URL; every failure is a typed
//! [`PageError`] -- success never carries an absent URL.
//!
//! The concrete implementation lives in goalbot-infra (`NotionPageStore`).

use goalbot_types::page::{GoalPage, GoalPageSummary, PageError};

/// Trait for goal-page persistence backends.
pub trait PageStore: Send + Sync {
    /// Human-readable store name (e.g. "notion").
    fn name(&self) -> &str;

    /// Create a goal page and return its canonical URL.
    fn create_goal_page(
        &self,
        page: &GoalPage,
    ) -> impl std::future::Future<Output = Result<String, PageError>> + Send;

    /// List previously saved goal pages.
    fn list_goal_pages(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<GoalPageSummary>, PageError>> + Send;
}
