//! Configuration loading for GoalBot.
//!
//! Credentials come from environment variables, read once at startup.
//! Tunables come from an optional `config.toml` in the data directory;
//! a missing or malformed file falls back to defaults with a warning.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use thiserror::Error;

use goalbot_types::config::{Credentials, Settings};

/// Errors from startup configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `GOALBOT_DATA_DIR` environment variable
/// 2. `~/.goalbot`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("GOALBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".goalbot");
    }

    // Last resort: current directory
    PathBuf::from(".goalbot")
}

/// Load settings from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`Settings::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - `AI_MODEL` in the environment overrides the model from either source.
pub async fn load_settings(data_dir: &Path) -> Settings {
    let config_path = data_dir.join("config.toml");

    let mut settings = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => match toml::from_str::<Settings>(&content) {
            Ok(settings) => settings,
            Err(err) => {
                tracing::warn!(
                    "Failed to parse {}: {err}, using defaults",
                    config_path.display()
                );
                Settings::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                "No config.toml found at {}, using defaults",
                config_path.display()
            );
            Settings::default()
        }
        Err(err) => {
            tracing::warn!(
                "Failed to read {}: {err}, using defaults",
                config_path.display()
            );
            Settings::default()
        }
    };

    if let Ok(model) = std::env::var("AI_MODEL") {
        settings.model = model;
    }

    settings
}

/// Read API credentials from the process environment.
pub fn load_credentials() -> Result<Credentials, ConfigError> {
    load_credentials_from(|name| std::env::var(name).ok())
}

/// Credentials loading over an injectable variable lookup (test seam).
fn load_credentials_from(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Credentials, ConfigError> {
    let required = |name: &'static str| -> Result<String, ConfigError> {
        lookup(name).ok_or(ConfigError::MissingVar(name))
    };

    Ok(Credentials {
        telegram_token: SecretString::from(required("TELEGRAM_TOKEN")?),
        openai_api_key: SecretString::from(required("OPENAI_API_KEY")?),
        notion_token: SecretString::from(required("NOTION_TOKEN")?),
        notion_database_id: required("NOTION_DATABASE_ID")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_settings_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let settings = load_settings(tmp.path()).await;
        assert_eq!(settings.max_reply_tokens, 1000);
        assert_eq!(settings.poll_timeout_secs, 50);
    }

    #[tokio::test]
    async fn load_settings_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model = "o3-mini"
max_reply_tokens = 500
"#,
        )
        .await
        .unwrap();

        let settings = load_settings(tmp.path()).await;
        assert_eq!(settings.model, "o3-mini");
        assert_eq!(settings.max_reply_tokens, 500);
        assert_eq!(settings.poll_timeout_secs, 50);
    }

    #[tokio::test]
    async fn load_settings_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let settings = load_settings(tmp.path()).await;
        assert_eq!(settings.model, "gpt-4");
    }

    #[test]
    fn load_credentials_complete_environment() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("TELEGRAM_TOKEN", "123:abc"),
            ("OPENAI_API_KEY", "sk-test"),
            ("NOTION_TOKEN", "secret_test"),
            ("NOTION_DATABASE_ID", "db-1"),
        ]);

        let creds =
            load_credentials_from(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.notion_database_id, "db-1");
    }

    #[test]
    fn load_credentials_missing_var_is_an_error() {
        let err = match load_credentials_from(|name| {
            (name == "TELEGRAM_TOKEN").then(|| "123:abc".to_string())
        }) {
            Err(e) => e,
            Ok(_) => panic!("expected an error"),
        };
        assert!(matches!(err, ConfigError::MissingVar("OPENAI_API_KEY")));
    }
}
