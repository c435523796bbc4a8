use axum::extract::rejection::BytesRejection;
use axum::{body::Bytes, extract::State, Json};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;
use crate::api::models::parse_body;
use crate::api::AppState;
use crate::errors::VoiceError;
use crate::llm::{GenerationRequest, GenerationResult};

pub async fn generate(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<GenerationResult>, VoiceError> {
    let body = body?;
    let req: GenerationRequest = parse_body(&body, "Missing JSON body")?;
    let prompt = req.prompt().ok_or_else(|| VoiceError::invalid("Missing prompt"))?;

    let span = info_span!("generate", request_id = %Uuid::new_v4());
    let resolution = state.resolver.resolve(prompt).instrument(span.clone()).await?;

    let mut result = resolution.result;
    span.in_scope(|| {
        info!(
            provider = %result.provider,
            model = result.model.as_deref().unwrap_or("-"),
            attempts = resolution.attempts.len(),
            "Generation resolved"
        );
    });

    result.file_url = req.file_url;
    Ok(Json(result))
}
