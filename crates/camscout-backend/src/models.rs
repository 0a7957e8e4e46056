//! Backend API wire models.
//!
//! Every field defaults when missing or `null`: the backend omits fields it
//! has no value for, and a sparse profile should still render.

use serde::{Deserialize, Deserializer, Serialize};

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    #[serde(deserialize_with = "nullable")]
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserAccounts {
    #[serde(rename = "telegramId", deserialize_with = "nullable")]
    pub telegram_id: i64,
    #[serde(deserialize_with = "nullable")]
    pub phone: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub email: String,
    #[serde(deserialize_with = "nullable")]
    pub role: String,
    #[serde(deserialize_with = "nullable")]
    pub settings: UserSettings,
    #[serde(deserialize_with = "nullable")]
    pub accounts: UserAccounts,
    /// ISO-8601 timestamp of the last profile change.
    #[serde(rename = "updatedAt", deserialize_with = "nullable")]
    pub updated_at: String,
}

/// Body of `GET /telegram/user/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserResponse {
    #[serde(deserialize_with = "nullable")]
    pub user: User,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Camera {
    #[serde(rename = "_id", deserialize_with = "nullable")]
    pub id: String,
    #[serde(deserialize_with = "nullable")]
    pub address: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    /// Meters from the queried point.
    #[serde(deserialize_with = "nullable")]
    pub distance: f64,
}

impl Camera {
    /// Address when known, title otherwise.
    pub fn display_name(&self) -> &str {
        if self.address.is_empty() {
            &self.title
        } else {
            &self.address
        }
    }
}

/// Body of `POST /telegram/camera/closest`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CamerasResponse {
    #[serde(deserialize_with = "nullable")]
    pub cameras: Vec<Camera>,
}

/// Request body of `POST /telegram/camera/closest`.
#[derive(Debug, Clone, Serialize)]
pub struct ClosestCamerasRequest {
    pub latitude: f64,
    pub longitude: f64,
    /// Search radius in meters.
    pub distance: f64,
}
