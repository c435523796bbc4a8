use axum::http::StatusCode;
use axum::body::Body;
use http_body_util::BodyExt;
use mockito::Server;
use tower::ServiceExt;
use serde_json::{json, Value};
use voiceqa::api::{build_router, AppState};
use voiceqa::config::AppConfig;
use voiceqa::db::Database;
use voiceqa::speech::FALLBACK_TRANSCRIPT;

fn create_test_state() -> AppState {
    AppState::new(AppConfig::default(), Database::in_memory().unwrap())
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint() {
    let state = create_test_state();
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "voiceqa");
}

#[tokio::test]
async fn test_tts_echoes_text() {
    let state = create_test_state();
    let req = make_request("POST", "/api/tts", Some(json!({"text": "Hello there"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await, json!({"text": "Hello there"}));
}

#[tokio::test]
async fn test_tts_missing_text() {
    let state = create_test_state();
    let req = make_request("POST", "/api/tts", Some(json!({})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Missing text");

    let req = make_request("POST", "/api/tts", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Invalid JSON");
}

#[tokio::test]
async fn test_transcribe_without_key_returns_placeholder() {
    let state = create_test_state();
    let req = make_request("POST", "/api/transcribe", Some(json!({
        "audio": "aGVsbG8=",
        "mime": "audio/webm"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["transcript"], FALLBACK_TRANSCRIPT);
}

#[tokio::test]
async fn test_transcribe_requires_audio_and_mime() {
    let state = create_test_state();
    let req = make_request("POST", "/api/transcribe", Some(json!({"audio": "aGVsbG8="})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Missing audio or mime");
}

#[tokio::test]
async fn test_transcribe_rejects_bad_base64() {
    let state = create_test_state();
    let req = make_request("POST", "/api/transcribe", Some(json!({"audio": "%%%", "mime": "audio/wav"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Invalid base64 audio");
}

#[tokio::test]
async fn test_transcribe_upstream_failure_is_bad_gateway() {
    let mut server = Server::new_async().await;
    let stt = server
        .mock("POST", "/openai/whisper-large")
        .with_status(503)
        .with_body("whisper overloaded")
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.resolver.hf_key = Some("hf-key".into());
    config.resolver.hf_base_url = server.url();
    let state = AppState::new(config, Database::in_memory().unwrap());

    let req = make_request("POST", "/api/transcribe", Some(json!({"audio": "aGVsbG8=", "mime": "audio/webm"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = response_json(response).await;
    assert_eq!(body["error"], "STT upstream error");
    assert_eq!(body["details"], "whisper overloaded");
    stt.assert_async().await;
}

#[tokio::test]
async fn test_transcribe_accepts_long_recording() {
    // ~3 MB of base64, past axum's 2 MB default body limit
    let state = create_test_state();
    let req = make_request("POST", "/api/transcribe", Some(json!({
        "audio": "QUFB".repeat(750_000),
        "mime": "audio/webm"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["transcript"], FALLBACK_TRANSCRIPT);
}

#[tokio::test]
async fn test_oversized_body_is_json_413() {
    let config = AppConfig { max_body_bytes: 1024, ..AppConfig::default() };
    let state = AppState::new(config, Database::in_memory().unwrap());
    let req = make_request("POST", "/api/transcribe", Some(json!({
        "audio": "QUFB".repeat(1_000),
        "mime": "audio/webm"
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Payload too large");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_transcribe_connection_failure_is_internal_error() {
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut config = AppConfig::default();
    config.resolver.hf_key = Some("hf-key".into());
    config.resolver.hf_base_url = format!("http://{}", addr);
    let state = AppState::new(config, Database::in_memory().unwrap());

    let req = make_request("POST", "/api/transcribe", Some(json!({"audio": "aGVsbG8=", "mime": "audio/webm"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Internal transcribe error");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_nlu_upstream_failure_is_internal_error() {
    let mut server = Server::new_async().await;
    let nli = server
        .mock("POST", "/facebook/bart-large-mnli")
        .with_status(503)
        .with_body("model is loading")
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.resolver.hf_key = Some("hf-key".into());
    config.resolver.hf_base_url = server.url();
    let state = AppState::new(config, Database::in_memory().unwrap());

    let req = make_request("POST", "/api/nlu", Some(json!({"text": "what is this"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "NLU model error");
    assert_eq!(body["details"], "model is loading");
    nli.assert_async().await;
}

#[tokio::test]
async fn test_nlu_without_key() {
    let state = create_test_state();
    let req = make_request("POST", "/api/nlu", Some(json!({"text": "check my balance"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response_json(response).await["error"], "HF_API_KEY not configured");
}

#[tokio::test]
async fn test_nlu_classifies_through_model() {
    let mut server = Server::new_async().await;
    let nli = server
        .mock("POST", "/facebook/bart-large-mnli")
        .with_status(200)
        .with_body(r#"{"sequence":"I need help","labels":["support","faq"],"scores":[0.9,0.1]}"#)
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.resolver.hf_key = Some("hf-key".into());
    config.resolver.hf_base_url = server.url();
    let state = AppState::new(config, Database::in_memory().unwrap());

    let req = make_request("POST", "/api/nlu", Some(json!({"text": "I need help"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["nlu"], json!({"intent": "support", "entities": {}}));
    assert_eq!(body["raw"]["labels"][1], "faq");
    nli.assert_async().await;
}

#[tokio::test]
async fn test_record_and_list_metrics() {
    let state = create_test_state();

    let req = make_request("POST", "/api/analytics", Some(json!({
        "name": "question_asked",
        "metadata": {"provider": "fallback"}
    })));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["rec"]["name"], "question_asked");
    assert_eq!(body["rec"]["value"], 1.0);
    assert_eq!(body["rec"]["metadata"], r#"{"provider":"fallback"}"#);

    let req = make_request("POST", "/api/analytics", Some(json!({"name": "latency_ms", "value": 420})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let req = make_request("GET", "/api/analytics?limit=10", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["metrics"][0]["name"], "latency_ms");
    assert_eq!(body["metrics"][0]["value"], 420.0);
}

#[tokio::test]
async fn test_record_metric_missing_name() {
    let state = create_test_state();
    let req = make_request("POST", "/api/analytics", Some(json!({"value": 3})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Missing name");
}

#[tokio::test]
async fn test_api_token_enforced() {
    let config = AppConfig { api_token: Some("s3cret-token".into()), ..AppConfig::default() };
    let state = AppState::new(config, Database::in_memory().unwrap());

    let req = make_request("POST", "/api/tts", Some(json!({"text": "hi"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(response_json(response).await["error"], "Missing Authorization header");

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/tts")
        .header("content-type", "application/json")
        .header("authorization", "Bearer wrong")
        .body(Body::from(r#"{"text":"hi"}"#))
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/tts")
        .header("content-type", "application/json")
        .header("authorization", "Bearer s3cret-token")
        .body(Body::from(r#"{"text":"hi"}"#))
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // health stays open
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
