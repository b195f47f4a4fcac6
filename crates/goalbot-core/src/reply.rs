//! Fixed user-facing reply strings.
//!
//! Everything the bot says that is not model-generated lives here. Adapter
//! failures are converted to these strings at the dispatch boundary; no
//! structured error crosses back to the messaging platform.

/// Reply to /start.
pub const WELCOME: &str = "Welcome to the AI Goal Planner! \u{1F3AF}

I'm here to help you create meaningful yearly goals.

Commands:
/chat - Start or continue our conversation about your goals
/save - Save the current goals to Notion
/cancel - End the current conversation

Let's get started! Use /chat to begin.";

/// Reply to /help, and the hint appended after an unknown command.
pub const HELP: &str = "Here are the commands you can use:

/chat - Start or continue our conversation about your goals
/save - Save the current goals to Notion
/cancel - End the current conversation
/help - Show this help message";

/// Reply to /chat when no session existed.
pub const CHAT_STARTED: &str =
    "Let's talk about your goals! Tell me about what you'd like to achieve this year.";

/// Reply to /chat when a session already existed.
pub const CHAT_RESUMED: &str =
    "Continuing our conversation. What else would you like to discuss about your goals?";

/// Reply to /cancel.
pub const CANCELLED: &str =
    "Conversation ended. Use /chat to start a new conversation about your goals.";

/// Acknowledgement sent before the summarize-and-save pipeline runs.
pub const SAVING: &str = "Processing your goals and saving them to Notion...";

/// Refusal when /save is requested with no conversation to summarize.
pub const NO_CONVERSATION: &str =
    "We haven't discussed any goals yet. Use /chat to start a conversation.";

/// Fixed error string for a failed completion call.
pub const AI_ERROR: &str =
    "I'm having trouble connecting to my brain right now. Please try again in a moment.";

/// Fixed error string for a failed page-store call.
pub const NOTION_ERROR: &str =
    "I couldn't save your goals to Notion. Please check your connection and try again.";

/// Success wrapper around the created page URL.
pub fn saved(url: &str) -> String {
    format!("Your goals have been saved to Notion! You can view them here: {url}")
}
