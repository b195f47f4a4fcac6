//! Connectivity check command.
//!
//! Probes the Telegram token (getMe) and the completion API (a one-shot
//! hello request) and prints a check mark per service.

use goalbot_core::llm::CompletionProvider;
use goalbot_types::llm::{ChatMessage, CompletionRequest};

use crate::state::AppState;

/// Output token budget for the probe completion.
const CHECK_MAX_TOKENS: u32 = 150;

/// Run both probes; returns an error if either service is unreachable.
pub async fn run_check(state: &AppState) -> anyhow::Result<()> {
    let check_mark = |ok: bool| {
        if ok {
            format!("{}", console::style("✓").green())
        } else {
            format!("{}", console::style("✗").red())
        }
    };

    println!();
    println!(
        "  {} Checking connectivity (model: {})",
        console::style("🔍").bold(),
        console::style(&state.settings.model).cyan()
    );
    println!();

    let telegram_ok = match state.telegram.get_me().await {
        Ok(me) => {
            println!(
                "  {} Telegram: connected as {}",
                check_mark(true),
                console::style(me.username.as_deref().unwrap_or(&me.first_name)).cyan()
            );
            true
        }
        Err(err) => {
            println!("  {} Telegram: {err}", check_mark(false));
            false
        }
    };

    let request = CompletionRequest {
        model: state.settings.model.clone(),
        messages: vec![
            ChatMessage::system("You are a helpful assistant."),
            ChatMessage::user("Hello, what year is it currently?"),
        ],
        max_tokens: CHECK_MAX_TOKENS,
    };

    let openai_ok = match state.orchestrator.llm().complete(&request).await {
        Ok(response) => {
            println!(
                "  {} OpenAI: {}",
                check_mark(true),
                console::style(response.content.trim()).dim()
            );
            true
        }
        Err(err) => {
            println!("  {} OpenAI: {err}", check_mark(false));
            false
        }
    };

    println!();
    if telegram_ok && openai_ok {
        Ok(())
    } else {
        anyhow::bail!("one or more connectivity checks failed")
    }
}
