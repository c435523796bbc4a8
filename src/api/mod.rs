pub mod routes;
pub mod models;
pub mod errors;
pub mod auth;

use std::sync::Arc;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use reqwest::Client;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use crate::config::AppConfig;
use crate::db::Database;
use crate::errors::VoiceError;
use crate::llm::Resolver;
use crate::nlu::IntentClassifier;
use crate::speech::Transcriber;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub resolver: Arc<Resolver>,
    pub transcriber: Arc<Transcriber>,
    pub classifier: Arc<IntentClassifier>,
    pub db: Database,
}

impl AppState {
    /// Wire every upstream client from one config and a shared HTTP client.
    pub fn new(config: AppConfig, db: Database) -> Self {
        let client = Client::new();
        Self {
            resolver: Arc::new(Resolver::from_config(&config.resolver, client.clone())),
            transcriber: Arc::new(Transcriber::from_config(&config, client.clone())),
            classifier: Arc::new(IntentClassifier::from_config(&config, client)),
            config: Arc::new(config),
            db,
        }
    }
}

pub async fn create_app_state(config: AppConfig, db_path: &str) -> Result<AppState, VoiceError> {
    let db = Database::new(db_path)?;
    Ok(AppState::new(config, db))
}

pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/api/generate", post(routes::generate::generate))
        .route("/api/transcribe", post(routes::transcribe::transcribe))
        .route("/api/tts", post(routes::tts::speak))
        .route("/api/nlu", post(routes::nlu::classify))
        .route("/api/analytics", post(routes::analytics::record_metric).get(routes::analytics::list_metrics))
        .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth::api_auth_middleware));

    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .merge(protected)
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(CatchPanicLayer::custom(errors::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
