//! Parsing of incoming Telegram text into bot commands.

/// One parsed inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Chat,
    Save,
    Cancel,
    Help,
    /// A slash-command the bot does not know.
    Unknown(String),
    /// A plain conversation message.
    Text(String),
}

impl BotCommand {
    /// Parse a message text. Commands are `/name` with an optional
    /// `@botname` suffix (Telegram appends it in group chats); anything
    /// else is a conversation message.
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        let Some(rest) = trimmed.strip_prefix('/') else {
            return BotCommand::Text(trimmed.to_string());
        };

        let first_word = rest.split_whitespace().next().unwrap_or("");
        let name = first_word.split('@').next().unwrap_or("");

        match name {
            "start" => BotCommand::Start,
            "chat" => BotCommand::Chat,
            "save" => BotCommand::Save,
            "cancel" => BotCommand::Cancel,
            "help" => BotCommand::Help,
            other => BotCommand::Unknown(other.to_string()),
        }
    }
}
