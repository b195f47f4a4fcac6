//! Infrastructure layer for GoalBot.
//!
//! Contains implementations of the adapter traits defined in `goalbot-core`
//! (OpenAI completion provider, Notion page store), the Telegram Bot API
//! client, and configuration loading.

pub mod config;
pub mod llm;
pub mod notion;
pub mod telegram;
