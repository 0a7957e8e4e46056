//! Render backend payloads as localized text.

use super::t;
use camscout_backend::models::{CamerasResponse, UserResponse};
use camscout_core::error::FormatError;
use chrono::DateTime;

/// Render an RFC 3339 timestamp as `DD.MM.YYYY HH:MM:SS` in its own offset.
/// Anything unparseable is shown as is.
pub fn format_date(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => dt.format("%d.%m.%Y %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Render a `GET /telegram/user` body.
///
/// Always in the language stored in the profile, whatever language the
/// request came in with.
pub fn format_user_info(user_json: &str) -> Result<String, FormatError> {
    let response: UserResponse =
        serde_json::from_str(user_json).map_err(|source| FormatError::MalformedPayload {
            what: "user info",
            source,
        })?;

    let user = response.user;
    let lang = user.settings.language.as_str();

    Ok(format!(
        "{}\n\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        t("user_info", lang),
        t("name", lang),
        user.name,
        t("email", lang),
        user.email,
        t("role", lang),
        user.role,
        t("language", lang),
        user.settings.language,
        t("telegram_id", lang),
        user.accounts.telegram_id,
        t("phone", lang),
        user.accounts.phone,
        t("last_update", lang),
        format_date(&user.updated_at),
    ))
}

/// Render a `POST /telegram/camera/closest` body in `lang`.
pub fn format_cameras(cameras_json: &str, lang: &str) -> Result<String, FormatError> {
    let response: CamerasResponse =
        serde_json::from_str(cameras_json).map_err(|source| FormatError::MalformedPayload {
            what: "cameras",
            source,
        })?;

    if response.cameras.is_empty() {
        return Ok(t("no_cameras", lang).to_string());
    }

    let meter = t("meter", lang);
    let lines = response
        .cameras
        .iter()
        .map(|camera| format!("{} ({:.2} {meter})\n", camera.display_name(), camera.distance));
    Ok(std::iter::once(format!("{}\n", t("cameras_list", lang)))
        .chain(lines)
        .collect())
}
