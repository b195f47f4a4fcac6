//! Telegram update dispatch loop.
//!
//! Long-polls getUpdates and handles each update sequentially in arrival
//! order, so session mutations for one user never race. Poll failures log
//! a warning and back off; the loop stops when the cancellation token
//! fires.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use goalbot_core::orchestrator::SaveError;
use goalbot_core::reply;

use crate::command::BotCommand;
use crate::state::AppState;

/// Backoff after a failed getUpdates call.
const POLL_BACKOFF: Duration = Duration::from_secs(5);

/// Run the bot until the token is cancelled.
///
/// Validates the Telegram token via getMe first; a failure there is fatal
/// and the bot does not start.
pub async fn run(state: AppState, cancel: CancellationToken) -> anyhow::Result<()> {
    let me = state.telegram.get_me().await?;
    info!(
        bot_id = me.id,
        username = me.username.as_deref().unwrap_or(&me.first_name),
        "connected to Telegram"
    );

    let mut offset: Option<i64> = None;

    loop {
        let updates = tokio::select! {
            _ = cancel.cancelled() => break,
            result = state.telegram.get_updates(offset) => match result {
                Ok(updates) => updates,
                Err(err) => {
                    warn!(error = %err, "getUpdates failed, backing off");
                    tokio::time::sleep(POLL_BACKOFF).await;
                    continue;
                }
            },
        };

        for update in updates {
            offset = Some(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                continue;
            };
            let chat_id = message.chat.id;
            let user_id = message.from.map(|u| u.id).unwrap_or(chat_id);

            debug!(user_id, chat_id, "handling update");
            let reply_text = dispatch(&state, user_id, chat_id, &text).await;

            if let Err(err) = state.telegram.send_message(chat_id, &reply_text).await {
                warn!(chat_id, error = %err, "failed to send reply");
            }
        }
    }

    info!("dispatch loop stopped");
    Ok(())
}

/// Route one inbound message to the orchestrator and produce the reply.
///
/// All adapter failures surface here as fixed user-facing strings.
async fn dispatch(state: &AppState, user_id: i64, chat_id: i64, text: &str) -> String {
    match BotCommand::parse(text) {
        BotCommand::Start => reply::WELCOME.to_string(),
        BotCommand::Help => reply::HELP.to_string(),
        BotCommand::Chat => state.orchestrator.start_chat(user_id).to_string(),
        BotCommand::Cancel => state.orchestrator.cancel(user_id).to_string(),
        BotCommand::Save => {
            if !state.orchestrator.sessions().has_meaningful_content(user_id) {
                return reply::NO_CONVERSATION.to_string();
            }

            // The pipeline runs two adapter calls; acknowledge first.
            if let Err(err) = state.telegram.send_message(chat_id, reply::SAVING).await {
                warn!(chat_id, error = %err, "failed to send save acknowledgement");
            }

            match state.orchestrator.save_goals(user_id).await {
                Ok(url) => reply::saved(&url),
                Err(SaveError::NoConversation) => reply::NO_CONVERSATION.to_string(),
                Err(SaveError::AiUnavailable(_)) => reply::AI_ERROR.to_string(),
                Err(SaveError::StoreUnavailable(_)) => reply::NOTION_ERROR.to_string(),
            }
        }
        BotCommand::Text(text) => state.orchestrator.process_message(user_id, &text).await,
        BotCommand::Unknown(name) => {
            format!("Unknown command /{name}.\n\n{}", reply::HELP)
        }
    }
}
