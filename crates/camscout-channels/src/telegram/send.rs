//! Message sending and command registration.

use super::types::{TgReplyKeyboard, TgSendMessage};
use super::{TelegramChannel, MAX_MESSAGE_LEN};
use crate::utils::split_message;
use camscout_core::{error::CamscoutError, message::BotCommand};
use tracing::info;

impl TelegramChannel {
    /// Send a text message to a specific chat.
    ///
    /// Long texts go out in several messages; the keyboard rides on the last one.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&[Vec<String>]>,
    ) -> Result<(), CamscoutError> {
        let chunks = split_message(text, MAX_MESSAGE_LEN);
        let last = chunks.len().saturating_sub(1);
        let url = format!("{}/sendMessage", self.base_url);

        for (i, chunk) in chunks.into_iter().enumerate() {
            let body = TgSendMessage {
                chat_id,
                text: chunk,
                reply_markup: if i == last {
                    keyboard.map(TgReplyKeyboard::from_rows)
                } else {
                    None
                },
            };

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| CamscoutError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(CamscoutError::Channel(format!(
                    "telegram send failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }

    /// Register bot commands so users see an autocomplete menu.
    ///
    /// An empty `lang` sets the menu shown to clients with no dedicated list.
    pub(crate) async fn register_commands(
        &self,
        lang: &str,
        commands: &[BotCommand],
    ) -> Result<(), CamscoutError> {
        let mut body = serde_json::json!({ "commands": commands });
        if !lang.is_empty() {
            body["language_code"] = serde_json::Value::from(lang);
        }

        let url = format!("{}/setMyCommands", self.base_url);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CamscoutError::Channel(format!("telegram setMyCommands failed: {e}")))?;

        if !resp.status().is_success() {
            let error_text = resp.text().await.unwrap_or_default();
            return Err(CamscoutError::Channel(format!(
                "telegram setMyCommands failed: {error_text}"
            )));
        }

        info!("registered Telegram bot commands (lang: {lang:?})");
        Ok(())
    }
}
