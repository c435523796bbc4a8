use std::time::Duration;

use data_encoding::BASE64;
use reqwest::Client;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::errors::VoiceError;
use crate::llm::catalog::model_url;
use crate::llm::response_parsing::value_to_text;
use crate::llm::transport::{send_and_decode, with_deadline};
use crate::utils::{truncate_for_log, truncate_for_response};

pub const FALLBACK_TRANSCRIPT: &str =
    "fallback: transcribed speech (HF_API_KEY not configured). Try typing or set HF_API_KEY.";
pub const STT_UPSTREAM_ERROR: &str = "STT upstream error";
pub const STT_INTERNAL_ERROR: &str = "Internal transcribe error";

/// Decode a base64 audio payload. A leading `data:<mime>;base64,` prefix, as
/// produced by browser `FileReader`s, is accepted.
pub fn decode_audio(audio: &str) -> Result<Vec<u8>, VoiceError> {
    let encoded = match audio.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => audio,
    };
    BASE64
        .decode(encoded.trim().as_bytes())
        .map_err(|_| VoiceError::invalid("Invalid base64 audio"))
}

/// Speech-to-text through the Hugging Face inference API.
pub struct Transcriber {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl Transcriber {
    pub fn from_config(config: &AppConfig, client: Client) -> Self {
        Self {
            client,
            api_key: config.hf_key().map(str::to_string),
            model: config.stt_model.clone(),
            base_url: config.hf_base_url().to_string(),
            timeout: config.resolver.attempt_timeout,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Transcribe raw audio bytes. Without an API key a fixed placeholder
    /// transcript is returned so the voice flow keeps working.
    pub async fn transcribe(&self, audio: Vec<u8>, mime: &str) -> Result<String, VoiceError> {
        let Some(api_key) = &self.api_key else {
            debug!("No Hugging Face key, returning placeholder transcript");
            return Ok(FALLBACK_TRANSCRIPT.to_string());
        };

        let request = self.client
            .post(model_url(&self.base_url, &self.model))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", mime)
            .body(audio);

        let label = format!("STT ({})", self.model);
        let data = with_deadline(&label, self.timeout, send_and_decode(request, "HF"))
            .await
            .map_err(|e| {
                warn!(model = %self.model, error = %truncate_for_log(&e.detail()), "Transcription failed");
                match e {
                    VoiceError::Upstream { body, .. } => {
                        VoiceError::gateway(STT_UPSTREAM_ERROR, truncate_for_response(&body))
                    }
                    other => VoiceError::service(STT_INTERNAL_ERROR, other.to_string()),
                }
            })?;

        Ok(match &data {
            serde_json::Value::String(s) => s.clone(),
            other if !other["text"].is_null() => value_to_text(&other["text"]),
            other => value_to_text(other),
        })
    }
}
