//! Backend API client.
//!
//! Bearer-authenticated JSON over HTTP. Anything other than `200 OK` is a
//! failure; error bodies are logged but not decoded.

use crate::models::ClosestCamerasRequest;
use async_trait::async_trait;
use camscout_core::{config::ApiConfig, error::BackendError, geo::GeoPoint, traits::Backend};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, warn};

pub const USER_INFO_ENDPOINT: &str = "/telegram/user";
pub const CLOSEST_CAMERAS_ENDPOINT: &str = "/telegram/camera/closest";

/// Radius of every camera search, in meters. The localized texts quote it.
pub const SEARCH_RADIUS_METERS: f64 = 500.0;

/// Client for the camera backend.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl ApiClient {
    /// Create from config values. Requests time out after `timeout_secs`.
    pub fn from_config(config: &ApiConfig) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::TransportFailure(format!("http client init: {e}")))?;
        Ok(Self::with_client(
            client,
            config.base_url.clone(),
            config.secret_key.clone(),
        ))
    }

    /// Create around an existing `reqwest::Client`.
    pub fn with_client(client: reqwest::Client, base_url: String, secret_key: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Send a prepared request and return the body of a `200 OK` response.
    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, BackendError> {
        let resp = request
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| BackendError::TransportFailure(e.to_string()))?;

        let status = resp.status();
        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_default();
            warn!("backend returned {status}: {body}");
            return Err(BackendError::NonSuccessStatus(status.as_u16()));
        }

        resp.text()
            .await
            .map_err(|e| BackendError::TransportFailure(format!("error reading response: {e}")))
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn user_info(&self, user_id: &str) -> Result<String, BackendError> {
        let url = self.url(&format!("{USER_INFO_ENDPOINT}/{user_id}"));
        debug!("backend: GET {url}");
        self.execute(self.client.get(&url)).await
    }

    async fn closest_cameras(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> Result<String, BackendError> {
        let url = self.url(CLOSEST_CAMERAS_ENDPOINT);
        debug!("backend: POST {url} ({point}, r={radius_m}m)");
        let body = ClosestCamerasRequest {
            latitude: point.lat(),
            longitude: point.lng(),
            distance: radius_m,
        };
        self.execute(self.client.post(&url).json(&body)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Read one HTTP/1.1 request (headers plus `Content-Length` body).
    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).to_string()
    }

    /// Answer a single request with `status` and `body`; the handle yields the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (format!("http://{addr}/"), handle)
    }

    fn test_client(base_url: String) -> ApiClient {
        let client = reqwest::Client::builder().no_proxy().build().unwrap();
        ApiClient::with_client(client, base_url, "s3cret".into())
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let api = test_client("https://api.example.com/v1/".into());
        assert_eq!(
            api.url(USER_INFO_ENDPOINT),
            "https://api.example.com/v1/telegram/user"
        );
    }

    #[tokio::test]
    async fn test_user_info_sends_bearer_get() {
        let (base, server) = serve_once("200 OK", r#"{"user":{"name":"Anna"}}"#).await;
        let api = test_client(base);

        let body = api.user_info("42").await.unwrap();
        assert_eq!(body, r#"{"user":{"name":"Anna"}}"#);

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /telegram/user/42 HTTP/1.1"));
        assert!(request
            .to_lowercase()
            .contains("authorization: bearer s3cret"));
    }

    #[tokio::test]
    async fn test_closest_cameras_posts_json_body() {
        let (base, server) = serve_once("200 OK", r#"{"cameras":[]}"#).await;
        let api = test_client(base);
        let point = GeoPoint::new(55.75, 37.61).unwrap();

        let body = api
            .closest_cameras(point, SEARCH_RADIUS_METERS)
            .await
            .unwrap();
        assert_eq!(body, r#"{"cameras":[]}"#);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /telegram/camera/closest HTTP/1.1"));
        assert!(request
            .to_lowercase()
            .contains("content-type: application/json"));
        let json_start = request.find("\r\n\r\n").unwrap() + 4;
        let sent: serde_json::Value = serde_json::from_str(&request[json_start..]).unwrap();
        assert_eq!(
            sent,
            serde_json::json!({"latitude": 55.75, "longitude": 37.61, "distance": 500.0})
        );
    }

    #[tokio::test]
    async fn test_non_200_is_non_success_status() {
        let (base, server) = serve_once("404 Not Found", r#"{"error":"no user"}"#).await;
        let api = test_client(base);

        let err = api.user_info("7").await.unwrap_err();
        assert!(matches!(err, BackendError::NonSuccessStatus(404)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_created_is_still_a_failure() {
        let (base, server) = serve_once("201 Created", "{}").await;
        let api = test_client(base);

        let err = api.user_info("7").await.unwrap_err();
        assert!(matches!(err, BackendError::NonSuccessStatus(201)));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = test_client(format!("http://{addr}"));
        let err = api.user_info("7").await.unwrap_err();
        assert!(matches!(err, BackendError::TransportFailure(_)));
    }
}
