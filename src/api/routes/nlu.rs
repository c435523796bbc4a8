use axum::extract::rejection::BytesRejection;
use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use crate::api::models::{parse_body, TextRequest};
use crate::api::AppState;
use crate::errors::VoiceError;

pub async fn classify(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Value>, VoiceError> {
    let body = body?;
    let req: TextRequest = parse_body(&body, "Invalid JSON")?;
    let text = req.text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| VoiceError::invalid("Missing text"))?;

    let classification = state.classifier.classify(&text).await?;
    Ok(Json(json!({
        "nlu": { "intent": classification.intent, "entities": {} },
        "raw": classification.raw,
    })))
}
