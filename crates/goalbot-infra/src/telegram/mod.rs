//! Telegram Bot API client.
//!
//! Long-polling client over `reqwest`. The bot token is part of every
//! request URL (the Bot API's authentication scheme), so it is wrapped in
//! [`secrecy::SecretString`] and only exposed when building a URL; the
//! client does not derive Debug.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use self::types::{
    ApiResponse, BotProfile, GetUpdatesRequest, SendMessageRequest, Update,
};

/// Extra headroom on the HTTP timeout over the long-poll timeout, so the
/// client never cuts off a poll the server is still holding open.
const POLL_TIMEOUT_MARGIN_SECS: u64 = 10;

/// Errors from Telegram Bot API operations.
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("api error: {description}")]
    Api { description: String },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("http error: {0}")]
    Http(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}

/// Telegram Bot API client.
pub struct TelegramClient {
    client: reqwest::Client,
    token: SecretString,
    base_url: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    /// Create a client. `poll_timeout_secs` is the getUpdates long-poll
    /// timeout; the HTTP timeout is derived from it.
    pub fn new(token: SecretString, poll_timeout_secs: u64) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(
                poll_timeout_secs + POLL_TIMEOUT_MARGIN_SECS,
            ))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            token,
            base_url: "https://api.telegram.org".to_string(),
            poll_timeout_secs,
        }
    }

    /// Override the base URL (useful for testing or proxies).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.token.expose_secret(),
            method
        )
    }

    /// Unwrap the Bot API envelope into the inner result.
    async fn into_result<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TelegramError> {
        if response.status().as_u16() == 401 {
            return Err(TelegramError::AuthenticationFailed);
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| TelegramError::Deserialization(format!("failed to parse response: {e}")))?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                description: envelope
                    .description
                    .unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::Deserialization("missing result field".to_string()))
    }

    async fn call<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        body: &B,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(|e| TelegramError::Http(format!("{method} request failed: {e}")))?;

        Self::into_result(response).await
    }

    /// Validate the token and fetch the bot's own profile.
    ///
    /// Called once at startup; a failure here is fatal to the process.
    pub async fn get_me(&self) -> Result<BotProfile, TelegramError> {
        let response = self
            .client
            .get(self.method_url("getMe"))
            .send()
            .await
            .map_err(|e| TelegramError::Http(format!("getMe request failed: {e}")))?;

        Self::into_result(response).await
    }

    /// Long-poll for new updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, TelegramError> {
        let body = GetUpdatesRequest {
            offset,
            timeout: self.poll_timeout_secs,
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &body).await
    }

    /// Send a text reply.
    ///
    /// Replies are sent with Markdown formatting; when the platform rejects
    /// the markup (model output is not guaranteed to be valid Markdown) the
    /// message is re-sent once as plain text.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let markdown = SendMessageRequest {
            chat_id,
            text: text.to_string(),
            parse_mode: Some("Markdown"),
        };

        match self.call::<_, types::IncomingMessage>("sendMessage", &markdown).await {
            Ok(_) => Ok(()),
            Err(TelegramError::Api { description }) => {
                tracing::debug!(chat_id, %description, "markdown send rejected, retrying as plain text");
                let plain = SendMessageRequest {
                    parse_mode: None,
                    ..markdown
                };
                self.call::<_, types::IncomingMessage>("sendMessage", &plain)
                    .await
                    .map(|_| ())
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_url_embeds_token() {
        let client = TelegramClient::new(SecretString::from("123:abc"), 50);
        assert_eq!(
            client.method_url("getMe"),
            "https://api.telegram.org/bot123:abc/getMe"
        );
    }

    #[test]
    fn test_telegram_error_display() {
        let err = TelegramError::Api {
            description: "Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "api error: Unauthorized");
    }
}
