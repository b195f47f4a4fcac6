//! Saved-goals listing command.

use goalbot_core::page::PageStore;

use crate::state::AppState;

/// Print the goal pages saved to the Notion database.
pub async fn list_goals(state: &AppState) -> anyhow::Result<()> {
    let pages = state.orchestrator.pages().list_goal_pages().await?;

    if pages.is_empty() {
        println!("No saved goals yet. Chat with the bot and use /save to create one.");
        return Ok(());
    }

    println!();
    for page in &pages {
        println!(
            "  {}  {}",
            console::style(&page.title).cyan(),
            console::style(&page.url).dim()
        );
    }
    println!();
    println!("{} saved goal page(s)", pages.len());

    Ok(())
}
