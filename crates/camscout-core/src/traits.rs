use crate::{
    error::{BackendError, CamscoutError},
    geo::GeoPoint,
    message::{BotCommand, IncomingMessage, OutgoingMessage},
};
use async_trait::async_trait;

/// Backend API trait: where user profiles and cameras live.
///
/// Responses are returned as raw JSON bodies; rendering them is the
/// formatter's job, so a malformed body surfaces as a format error rather
/// than a transport one.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the user profile for a platform user ID.
    async fn user_info(&self, user_id: &str) -> Result<String, BackendError>;

    /// Find cameras within `radius_m` meters of `point`.
    async fn closest_cameras(&self, point: GeoPoint, radius_m: f64)
        -> Result<String, BackendError>;
}

/// Messaging Channel trait.
///
/// Every messaging platform implements this trait to receive and send messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, CamscoutError>;

    /// Send a response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), CamscoutError>;

    /// Publish the command menu for users whose client language is `lang`.
    async fn set_commands(&self, _lang: &str, _commands: &[BotCommand]) -> Result<(), CamscoutError> {
        Ok(())
    }

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), CamscoutError>;
}
