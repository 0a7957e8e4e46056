use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CamscoutError;


/// Top-level camscout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Directory for daily-rolling log files. Empty = stdout only.
    #[serde(default)]
    pub log_dir: String,
    /// Reply with a localized error when a camera or profile lookup fails
    /// instead of staying silent.
    #[serde(default)]
    pub notify_failures: bool,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_dir: String::new(),
            notify_failures: false,
        }
    }
}

/// Telegram bot config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: String,
    /// Long-poll timeout passed to `getUpdates`.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }
}

/// Backend API config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: String,
    /// Sent as `Authorization: Bearer <secret_key>`.
    #[serde(default)]
    pub secret_key: String,
    #[serde(default = "default_api_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            secret_key: String::new(),
            timeout_secs: default_api_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_poll_timeout() -> u64 {
    30
}
fn default_api_timeout() -> u64 {
    15
}

impl Config {
    /// Overlay values from a variable lookup (normally the process environment).
    ///
    /// Empty variables are ignored so a blank `.env` entry does not wipe a
    /// value set in `config.toml`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("TELEGRAM_BOT_TOKEN") {
            self.telegram.bot_token = v;
        }
        if let Some(v) = get("API_SECRET_KEY") {
            self.api.secret_key = v;
        }
        if let Some(v) = get("API_BASE_URL") {
            self.api.base_url = v;
        }
        if let Some(v) = get("CAMSCOUT_LOG_LEVEL") {
            self.bot.log_level = v;
        }
    }

    /// Check that the values needed to run the bot are present.
    pub fn validate(&self) -> Result<(), CamscoutError> {
        if self.telegram.bot_token.trim().is_empty() {
            return Err(CamscoutError::Config(
                "telegram bot token is not set (TELEGRAM_BOT_TOKEN or [telegram].bot_token)"
                    .into(),
            ));
        }
        if self.api.base_url.trim().is_empty() {
            return Err(CamscoutError::Config(
                "API base URL is not set (API_BASE_URL or [api].base_url)".into(),
            ));
        }
        if self.api.secret_key.is_empty() {
            tracing::warn!("API secret key is empty; backend requests will be unauthenticated");
        }
        Ok(())
    }
}

/// Load configuration from a TOML file, then apply environment overrides.
///
/// A missing file is not an error: everything can come from the environment.
pub fn load(path: &str) -> Result<Config, CamscoutError> {
    let mut config = read_file(Path::new(path))?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, CamscoutError> {
    // Missing file: the caller logs it once tracing is up.
    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| CamscoutError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| CamscoutError::Config(format!("failed to parse config: {}", e)))
}
