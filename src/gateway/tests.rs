use super::dispatch::detect_language;
use super::*;
use async_trait::async_trait;
use camscout_core::{
    error::{BackendError, CamscoutError},
    geo::GeoPoint,
    message::{BotCommand, Payload},
};
use std::sync::Mutex;

const PROFILE_EN: &str = r#"{"user": {
    "_id": "u1", "name": "Anna", "email": "anna@example.com", "role": "user",
    "settings": {"language": "en"},
    "accounts": {"telegramId": 42, "phone": "+100"},
    "updatedAt": "2024-03-01T10:20:30Z"
}}"#;

const TWO_CAMERAS: &str = r#"{"cameras": [
    {"_id": "c1", "address": "Main St 1", "title": "North", "distance": 10.5},
    {"_id": "c2", "address": "", "title": "Bridge cam", "distance": 250}
]}"#;

/// Backend double with canned bodies; `Err(status)` simulates a non-200 reply.
struct MockBackend {
    profile: Result<&'static str, u16>,
    cameras: Result<&'static str, u16>,
    camera_queries: Mutex<Vec<(GeoPoint, f64)>>,
}

impl MockBackend {
    fn new(profile: Result<&'static str, u16>, cameras: Result<&'static str, u16>) -> Self {
        Self {
            profile,
            cameras,
            camera_queries: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn user_info(&self, _user_id: &str) -> Result<String, BackendError> {
        self.profile
            .map(str::to_string)
            .map_err(BackendError::NonSuccessStatus)
    }

    async fn closest_cameras(
        &self,
        point: GeoPoint,
        radius_m: f64,
    ) -> Result<String, BackendError> {
        self.camera_queries.lock().unwrap().push((point, radius_m));
        self.cameras
            .map(str::to_string)
            .map_err(BackendError::NonSuccessStatus)
    }
}

/// Channel double that replays `inbox` and then closes.
struct MockChannel {
    inbox: Mutex<Vec<IncomingMessage>>,
    sent: Mutex<Vec<OutgoingMessage>>,
    menus: Mutex<Vec<(String, Vec<BotCommand>)>>,
}

impl MockChannel {
    fn new(inbox: Vec<IncomingMessage>) -> Self {
        Self {
            inbox: Mutex::new(inbox),
            sent: Mutex::new(Vec::new()),
            menus: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Channel for MockChannel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start(&self) -> Result<mpsc::Receiver<IncomingMessage>, CamscoutError> {
        let messages: Vec<IncomingMessage> = self.inbox.lock().unwrap().drain(..).collect();
        let (tx, rx) = mpsc::channel(messages.len().max(1));
        for msg in messages {
            tx.send(msg)
                .await
                .map_err(|e| CamscoutError::Channel(e.to_string()))?;
        }
        Ok(rx)
    }

    async fn send(&self, message: OutgoingMessage) -> Result<(), CamscoutError> {
        self.sent.lock().unwrap().push(message);
        Ok(())
    }

    async fn set_commands(&self, lang: &str, commands: &[BotCommand]) -> Result<(), CamscoutError> {
        self.menus
            .lock()
            .unwrap()
            .push((lang.to_string(), commands.to_vec()));
        Ok(())
    }

    async fn stop(&self) -> Result<(), CamscoutError> {
        Ok(())
    }
}

fn incoming(payload: Payload, hint: Option<&str>) -> IncomingMessage {
    IncomingMessage {
        id: uuid::Uuid::new_v4(),
        channel: "mock".to_string(),
        sender_id: "42".to_string(),
        sender_name: Some("Anna".to_string()),
        payload,
        language_code: hint.map(str::to_string),
        timestamp: chrono::Utc::now(),
        reply_target: Some("100".to_string()),
    }
}

fn text(s: &str) -> Payload {
    Payload::Text(s.to_string())
}

fn gateway(backend: Arc<MockBackend>) -> Gateway {
    Gateway::new(backend, HashMap::new(), false)
}

// --- detect_language ---

#[test]
fn test_detect_language_prefers_profile() {
    assert_eq!(detect_language(Some(PROFILE_EN), Some("ru")), Lang::En);
}

#[test]
fn test_detect_language_falls_back_to_hint() {
    assert_eq!(detect_language(None, Some("en")), Lang::En);
    assert_eq!(detect_language(Some("not json"), Some("en")), Lang::En);
    let no_language = r#"{"user": {"settings": {"language": ""}}}"#;
    assert_eq!(detect_language(Some(no_language), Some("en")), Lang::En);
}

#[test]
fn test_detect_language_unsupported_profile_language_beats_hint() {
    let german = r#"{"user": {"settings": {"language": "de"}}}"#;
    assert_eq!(detect_language(Some(german), Some("en")), Lang::Ru);
    let us = r#"{"user": {"settings": {"language": "en-US"}}}"#;
    assert_eq!(detect_language(Some(us), Some("ru")), Lang::En);
}

#[test]
fn test_detect_language_defaults_to_russian() {
    assert_eq!(detect_language(None, None), Lang::Ru);
    assert_eq!(detect_language(None, Some("fr")), Lang::Ru);
    assert_eq!(detect_language(Some(r#"{"user": {}}"#), None), Lang::Ru);
}

// --- handle_message ---

#[tokio::test]
async fn test_location_queries_cameras_with_fixed_radius() {
    let backend = Arc::new(MockBackend::new(Ok(PROFILE_EN), Ok(TWO_CAMERAS)));
    let gw = gateway(backend.clone());
    let point = GeoPoint::new(55.7558, 37.6173).unwrap();

    let reply = gw
        .handle_message(&incoming(Payload::Location(point), None))
        .await
        .unwrap();

    assert_eq!(
        reply.text,
        "📸 Cameras List in 500m radius\nMain St 1 (10.50 m)\nBridge cam (250.00 m)\n"
    );
    assert_eq!(reply.reply_target.as_deref(), Some("100"));
    assert!(reply.keyboard.is_none());
    assert_eq!(*backend.camera_queries.lock().unwrap(), vec![(point, 500.0)]);
}

#[tokio::test]
async fn test_typed_coordinates_query_cameras() {
    let backend = Arc::new(MockBackend::new(Err(404), Ok(r#"{"cameras": []}"#)));
    let gw = gateway(backend.clone());

    let reply = gw
        .handle_message(&incoming(text("55.7558, 37.6173"), Some("en")))
        .await
        .unwrap();

    assert_eq!(reply.text, "No cameras found in 500m radius");
    let queries = backend.camera_queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].0, GeoPoint::new(55.7558, 37.6173).unwrap());
}

#[tokio::test]
async fn test_out_of_range_coordinates_are_treated_as_text() {
    let backend = Arc::new(MockBackend::new(Err(404), Ok(TWO_CAMERAS)));
    let gw = gateway(backend.clone());

    let reply = gw
        .handle_message(&incoming(text("lat 95.0 long 30.0"), Some("en")))
        .await
        .unwrap();

    assert_eq!(reply.text, "Unknown command");
    assert!(backend.camera_queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_start_sends_keyboard() {
    let backend = Arc::new(MockBackend::new(Err(404), Ok(TWO_CAMERAS)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("/start"), Some("en")))
        .await
        .unwrap();

    assert_eq!(reply.text, "Choose action:");
    assert_eq!(
        reply.keyboard,
        Some(vec![vec![
            "📱 My Information".to_string(),
            "🆘 Help".to_string()
        ]])
    );
}

#[tokio::test]
async fn test_info_renders_profile() {
    let backend = Arc::new(MockBackend::new(Ok(PROFILE_EN), Ok(TWO_CAMERAS)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("/info"), Some("ru")))
        .await
        .unwrap();

    assert!(reply.text.starts_with("📱 User Information\n\n👤 Name: Anna\n"));
    assert!(reply.text.ends_with("🕒 Last Update: 01.03.2024 10:20:30"));
}

#[tokio::test]
async fn test_info_button_in_detected_language() {
    let backend = Arc::new(MockBackend::new(Ok(PROFILE_EN), Ok(TWO_CAMERAS)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("📱 My Information"), None))
        .await
        .unwrap();

    assert!(reply.text.contains("📧 Email: anna@example.com"));
}

#[tokio::test]
async fn test_info_failure_is_silent_by_default() {
    let backend = Arc::new(MockBackend::new(Err(500), Ok(TWO_CAMERAS)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("/info"), Some("en")))
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_info_failure_reported_when_enabled() {
    let backend = Arc::new(MockBackend::new(Err(500), Ok(TWO_CAMERAS)));
    let gw = Gateway::new(backend, HashMap::new(), true);

    let reply = gw
        .handle_message(&incoming(text("/info"), Some("en")))
        .await
        .unwrap();
    assert_eq!(
        reply.text,
        "⚠️ Could not complete the request, please try again later"
    );
}

#[tokio::test]
async fn test_camera_backend_failure_is_silent() {
    let backend = Arc::new(MockBackend::new(Ok(PROFILE_EN), Err(502)));
    let gw = gateway(backend);

    let point = GeoPoint::new(1.0, 2.0).unwrap();
    let reply = gw
        .handle_message(&incoming(Payload::Location(point), None))
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_malformed_camera_payload_is_silent() {
    let backend = Arc::new(MockBackend::new(Ok(PROFILE_EN), Ok("<html>oops</html>")));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("10, 20"), None))
        .await;
    assert!(reply.is_none());
}

#[tokio::test]
async fn test_help_lists_commands() {
    let backend = Arc::new(MockBackend::new(Err(404), Ok(TWO_CAMERAS)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("/help"), None))
        .await
        .unwrap();
    assert_eq!(reply.text, crate::commands::render_command_list("ru"));
}

#[tokio::test]
async fn test_unknown_text_always_answers() {
    let backend = Arc::new(MockBackend::new(Err(503), Err(503)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("what is this?"), Some("de")))
        .await
        .unwrap();
    assert_eq!(reply.text, "Неизвестная команда");
}

#[tokio::test]
async fn test_unsupported_profile_language_replies_in_default() {
    let german = r#"{"user": {"name": "Hans", "settings": {"language": "de"}}}"#;
    let backend = Arc::new(MockBackend::new(Ok(german), Ok(TWO_CAMERAS)));
    let gw = gateway(backend);

    let reply = gw
        .handle_message(&incoming(text("what?"), Some("en")))
        .await
        .unwrap();
    assert_eq!(reply.text, "Неизвестная команда");
}

// --- run loop ---

#[tokio::test]
async fn test_run_continues_after_failed_update() {
    let backend = Arc::new(MockBackend::new(Err(404), Err(500)));
    let channel = Arc::new(MockChannel::new(vec![
        incoming(text("/help"), Some("en")),
        incoming(text("10, 20"), Some("en")),
        incoming(text("nonsense"), Some("en")),
    ]));

    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
    channels.insert("mock".to_string(), channel.clone());
    let gw = Gateway::new(backend, channels, false);

    gw.run().await.unwrap();

    let sent = channel.sent.lock().unwrap();
    assert_eq!(sent.len(), 2, "the failed camera lookup sends nothing");
    assert!(sent[0].text.starts_with("/help - 🆘 Help\n"));
    assert_eq!(sent[1].text, "Unknown command");
}

#[tokio::test]
async fn test_run_registers_command_menus() {
    let backend = Arc::new(MockBackend::new(Err(404), Err(500)));
    let channel = Arc::new(MockChannel::new(Vec::new()));

    let mut channels: HashMap<String, Arc<dyn Channel>> = HashMap::new();
    channels.insert("mock".to_string(), channel.clone());
    let gw = Gateway::new(backend, channels, false);

    gw.run().await.unwrap();

    let menus = channel.menus.lock().unwrap();
    let langs: Vec<&str> = menus.iter().map(|(lang, _)| lang.as_str()).collect();
    assert_eq!(langs, vec!["", "ru", "en"]);
    assert_eq!(menus[2].1[0].description, "🆘 Help");
}
