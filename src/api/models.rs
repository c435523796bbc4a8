use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::errors::VoiceError;

#[derive(Deserialize)]
pub struct TranscribeRequest {
    pub audio: Option<String>,
    pub mime: Option<String>,
}

#[derive(Serialize)]
pub struct TranscribeResponse {
    pub transcript: String,
}

/// Body shared by `/api/tts` and `/api/nlu`.
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    pub text: Option<String>,
}

#[derive(Deserialize)]
pub struct MetricRequest {
    pub name: Option<String>,
    pub value: Option<Value>,
    pub metadata: Option<Value>,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Parse a JSON request body. An empty body, invalid JSON or a JSON `null`
/// yields `missing`; a well-formed body of the wrong shape is also rejected.
pub fn parse_body<T: DeserializeOwned>(bytes: &[u8], missing: &str) -> Result<T, VoiceError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|_| VoiceError::invalid(missing))?;
    if value.is_null() {
        return Err(VoiceError::invalid(missing));
    }
    serde_json::from_value(value).map_err(|e| VoiceError::invalid(format!("Invalid request body: {}", e)))
}
