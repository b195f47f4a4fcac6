//! Configuration types for GoalBot.
//!
//! `Settings` represents the optional `config.toml` that controls model
//! selection and polling tunables. `Credentials` holds the API tokens read
//! from the environment at startup; tokens are wrapped in [`SecretString`]
//! so they never appear in Debug output or logs.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

/// Tunable settings for the bot.
///
/// Loaded from `~/.goalbot/config.toml`. All fields have defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Completion model identifier.
    #[serde(default = "default_model")]
    pub model: String,

    /// Output token budget per completion call.
    #[serde(default = "default_max_reply_tokens")]
    pub max_reply_tokens: u32,

    /// Long-poll timeout for Telegram getUpdates, in seconds.
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_max_reply_tokens() -> u32 {
    1000
}

fn default_poll_timeout_secs() -> u64 {
    50
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_reply_tokens: default_max_reply_tokens(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

/// API credentials, read once from the environment at startup.
#[derive(Clone)]
pub struct Credentials {
    pub telegram_token: SecretString,
    pub openai_api_key: SecretString,
    pub notion_token: SecretString,
    pub notion_database_id: String,
}

// Credentials intentionally does NOT derive Debug: three of the four
// fields are secrets and the struct has no legitimate reason to be printed.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default_values() {
        let settings = Settings::default();
        assert_eq!(settings.model, "gpt-4");
        assert_eq!(settings.max_reply_tokens, 1000);
        assert_eq!(settings.poll_timeout_secs, 50);
    }

    #[test]
    fn test_settings_partial_toml_fills_defaults() {
        let settings: Settings = toml::from_str("model = \"o3-mini\"").unwrap();
        assert_eq!(settings.model, "o3-mini");
        assert_eq!(settings.max_reply_tokens, 1000);
        assert_eq!(settings.poll_timeout_secs, 50);
    }
}
