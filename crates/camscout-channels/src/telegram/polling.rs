//! Long-polling update loop and Channel trait implementation.

use super::types::{TgMessage, TgResponse, TgUpdate};
use super::TelegramChannel;
use async_trait::async_trait;
use camscout_core::{
    error::CamscoutError,
    geo::GeoPoint,
    message::{BotCommand, IncomingMessage, OutgoingMessage, Payload},
    traits::Channel,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Pause before the next `getUpdates` after a failed poll.
const POLL_ERROR_DELAY: Duration = Duration::from_secs(3);

#[async_trait]
impl Channel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, CamscoutError> {
        let (tx, rx) = mpsc::channel(64);
        let client = self.client.clone();
        let base_url = self.base_url.clone();
        let poll_timeout = self.config.poll_timeout_secs;
        let last_update_id = self.last_update_id.clone();

        info!(
            "Telegram channel starting long polling (token {})...",
            self.token_hint()
        );

        tokio::spawn(async move {
            loop {
                let last = last_update_id.lock().await;
                let offset = last.map(|id| id + 1);
                drop(last);

                let mut url = format!("{base_url}/getUpdates?timeout={poll_timeout}");
                if let Some(off) = offset {
                    url.push_str(&format!("&offset={off}"));
                }

                let resp = match client
                    .get(&url)
                    .timeout(Duration::from_secs(poll_timeout + 5))
                    .send()
                    .await
                {
                    Ok(r) => r,
                    Err(e) => {
                        error!("telegram poll error: {e}");
                        tokio::time::sleep(POLL_ERROR_DELAY).await;
                        continue;
                    }
                };

                let body: TgResponse<Vec<TgUpdate>> = match resp.json().await {
                    Ok(b) => b,
                    Err(e) => {
                        error!("telegram parse error: {e}");
                        tokio::time::sleep(POLL_ERROR_DELAY).await;
                        continue;
                    }
                };

                if !body.ok {
                    error!(
                        "telegram API error: {}",
                        body.description.unwrap_or_default()
                    );
                    tokio::time::sleep(POLL_ERROR_DELAY).await;
                    continue;
                }

                let updates = body.result.unwrap_or_default();

                if let Some(last_update) = updates.last() {
                    *last_update_id.lock().await = Some(last_update.update_id);
                }

                for update in updates {
                    let Some(msg) = update.message else {
                        continue;
                    };
                    let Some(incoming) = to_incoming(msg) else {
                        continue;
                    };

                    if tx.send(incoming).await.is_err() {
                        info!("telegram channel receiver dropped, stopping poll");
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), CamscoutError> {
        let chat_id_str = message
            .reply_target
            .as_deref()
            .ok_or_else(|| CamscoutError::Channel("no reply_target on outgoing message".into()))?;

        let chat_id: i64 = chat_id_str.parse().map_err(|e| {
            CamscoutError::Channel(format!("invalid telegram chat_id '{chat_id_str}': {e}"))
        })?;

        self.send_text(chat_id, &message.text, message.keyboard.as_deref())
            .await
    }

    async fn set_commands(&self, lang: &str, commands: &[BotCommand]) -> Result<(), CamscoutError> {
        self.register_commands(lang, commands).await
    }

    async fn stop(&self) -> Result<(), CamscoutError> {
        info!("Telegram channel stopped");
        Ok(())
    }
}

/// Convert a Telegram message into a channel-neutral update.
///
/// Returns `None` for messages the bot does not handle: no sender, or
/// neither text nor location (stickers, photos, service messages).
pub(crate) fn to_incoming(msg: TgMessage) -> Option<IncomingMessage> {
    let user = msg.from?;

    let payload = if let Some(loc) = msg.location {
        match GeoPoint::new(loc.latitude, loc.longitude) {
            Ok(point) => Payload::Location(point),
            Err(e) => {
                warn!("telegram: dropping location from {}: {e}", user.id);
                return None;
            }
        }
    } else if let Some(text) = msg.text {
        Payload::Text(text)
    } else {
        debug!("telegram: skipping non-text message {}", msg.message_id);
        return None;
    };

    let sender_name = if let Some(ref un) = user.username {
        format!("@{un}")
    } else if let Some(ref ln) = user.last_name {
        format!("{} {ln}", user.first_name)
    } else {
        user.first_name.clone()
    };

    Some(IncomingMessage {
        id: Uuid::new_v4(),
        channel: "telegram".to_string(),
        sender_id: user.id.to_string(),
        sender_name: Some(sender_name),
        payload,
        language_code: user.language_code,
        timestamp: chrono::Utc::now(),
        reply_target: Some(msg.chat.id.to_string()),
    })
}
