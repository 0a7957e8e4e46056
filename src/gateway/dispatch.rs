//! Per-update routing: location, typed coordinates, or a command.

use super::Gateway;
use crate::commands::{render_command_list, start_keyboard, Command};
use crate::i18n::{format_cameras, format_user_info, t, Lang, DEFAULT_LANG};
use camscout_backend::{models::UserResponse, SEARCH_RADIUS_METERS};
use camscout_core::{
    error::{BackendError, CamscoutError},
    geo::{parse_coordinates, GeoPoint},
    message::{IncomingMessage, OutgoingMessage, Payload},
};
use tracing::{debug, error, info};

impl Gateway {
    /// Produce the reply for one update.
    ///
    /// Returns `None` when the update failed and failures are not reported
    /// to users; the error is logged either way.
    pub async fn handle_message(&self, incoming: &IncomingMessage) -> Option<OutgoingMessage> {
        let profile = self.backend.user_info(&incoming.sender_id).await;
        if let Err(ref e) = profile {
            debug!("profile lookup for {} failed: {e}", incoming.sender_id);
        }
        let lang = detect_language(profile.as_deref().ok(), incoming.language_code.as_deref());

        let result = match &incoming.payload {
            Payload::Location(point) => {
                info!("location from {}: {point}", incoming.sender_id);
                self.cameras_near(incoming, *point, lang).await
            }
            Payload::Text(text) => match parse_coordinates(text) {
                Ok(point) => {
                    info!("coordinates from {}: {point}", incoming.sender_id);
                    self.cameras_near(incoming, point, lang).await
                }
                Err(e) => {
                    debug!("not coordinates ({e}), handling as command");
                    self.handle_command(incoming, text, lang, profile).await
                }
            },
        };

        match result {
            Ok(reply) => Some(reply),
            Err(e) => {
                error!(
                    "failed to handle message from {}: {e}",
                    incoming.sender_id
                );
                self.notify_failures
                    .then(|| OutgoingMessage::reply(incoming, t("request_failed", lang.code())))
            }
        }
    }

    async fn cameras_near(
        &self,
        incoming: &IncomingMessage,
        point: GeoPoint,
        lang: Lang,
    ) -> Result<OutgoingMessage, CamscoutError> {
        let body = self
            .backend
            .closest_cameras(point, SEARCH_RADIUS_METERS)
            .await?;
        let text = format_cameras(&body, lang.code())?;
        Ok(OutgoingMessage::reply(incoming, text))
    }

    async fn handle_command(
        &self,
        incoming: &IncomingMessage,
        text: &str,
        lang: Lang,
        profile: Result<String, BackendError>,
    ) -> Result<OutgoingMessage, CamscoutError> {
        let code = lang.code();
        let reply = match Command::parse(text, code) {
            Command::Start => OutgoingMessage::reply(incoming, t("choose_action", code))
                .with_keyboard(start_keyboard(code)),
            Command::Info => {
                let body = profile?;
                OutgoingMessage::reply(incoming, format_user_info(&body)?)
            }
            Command::Help => OutgoingMessage::reply(incoming, render_command_list(code)),
            Command::Unknown => OutgoingMessage::reply(incoming, t("unknown_cmd", code)),
        };
        Ok(reply)
    }
}

/// Pick the reply language.
///
/// A stored profile language always wins, even an unsupported one (which
/// resolves to the default). The client's hint only applies when there is no
/// profile or it stores no language.
pub(super) fn detect_language(profile_json: Option<&str>, hint: Option<&str>) -> Lang {
    profile_json
        .and_then(|body| serde_json::from_str::<UserResponse>(body).ok())
        .map(|resp| resp.user.settings.language)
        .filter(|code| !code.trim().is_empty())
        .map(|code| Lang::resolve(&code))
        .or_else(|| hint.and_then(Lang::from_code))
        .unwrap_or(DEFAULT_LANG)
}
