use axum::extract::rejection::BytesRejection;
use axum::{body::Bytes, Json};
use serde_json::{json, Value};
use crate::api::models::{parse_body, TextRequest};
use crate::errors::VoiceError;

/// Speech synthesis happens in the browser; the text is echoed back for it.
pub async fn speak(body: Result<Bytes, BytesRejection>) -> Result<Json<Value>, VoiceError> {
    let body = body?;
    let req: TextRequest = parse_body(&body, "Invalid JSON")?;
    let text = req.text
        .filter(|t| !t.is_empty())
        .ok_or_else(|| VoiceError::invalid("Missing text"))?;
    Ok(Json(json!({ "text": text })))
}
