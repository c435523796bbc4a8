use axum::extract::rejection::BytesRejection;
use axum::{body::Bytes, extract::State, Json};
use crate::api::models::{parse_body, TranscribeRequest, TranscribeResponse};
use crate::api::AppState;
use crate::errors::VoiceError;
use crate::speech::decode_audio;

pub async fn transcribe(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<TranscribeResponse>, VoiceError> {
    let body = body?;
    let req: TranscribeRequest = parse_body(&body, "Invalid JSON")?;
    let (Some(audio), Some(mime)) = (
        req.audio.filter(|a| !a.is_empty()),
        req.mime.filter(|m| !m.is_empty()),
    ) else {
        return Err(VoiceError::invalid("Missing audio or mime"));
    };

    let bytes = decode_audio(&audio)?;
    let transcript = state.transcriber.transcribe(bytes, &mime).await?;
    Ok(Json(TranscribeResponse { transcript }))
}
