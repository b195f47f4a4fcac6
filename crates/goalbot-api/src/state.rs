//! Application state wiring the orchestrator to concrete adapters.
//!
//! The orchestrator is generic over the completion provider and page store
//! traits; AppState pins it to the infra implementations and holds the
//! Telegram client alongside.

use std::sync::Arc;

use goalbot_core::orchestrator::GoalOrchestrator;
use goalbot_infra::config::{load_credentials, load_settings, resolve_data_dir};
use goalbot_infra::llm::OpenAiProvider;
use goalbot_infra::notion::NotionPageStore;
use goalbot_infra::telegram::TelegramClient;
use goalbot_types::config::Settings;

/// The orchestrator pinned to the concrete infra adapters.
pub type ConcreteOrchestrator = GoalOrchestrator<OpenAiProvider, NotionPageStore>;

/// Shared application state for the dispatch loop and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ConcreteOrchestrator>,
    pub telegram: Arc<TelegramClient>,
    pub settings: Settings,
}

impl AppState {
    /// Initialize the application state: load config, wire adapters.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        let settings = load_settings(&data_dir).await;
        let credentials = load_credentials()?;

        let llm = OpenAiProvider::new(&credentials.openai_api_key);
        let pages = NotionPageStore::new(
            credentials.notion_token.clone(),
            credentials.notion_database_id.clone(),
        );
        let orchestrator = GoalOrchestrator::new(
            llm,
            pages,
            settings.model.clone(),
            settings.max_reply_tokens,
        );
        let telegram = TelegramClient::new(
            credentials.telegram_token.clone(),
            settings.poll_timeout_secs,
        );

        Ok(Self {
            orchestrator: Arc::new(orchestrator),
            telegram: Arc::new(telegram),
            settings,
        })
    }
}
