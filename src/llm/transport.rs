use std::future::Future;
use std::time::Duration;

use reqwest::RequestBuilder;
use serde_json::Value;

use crate::errors::VoiceError;

/// Send a request and decode the body as JSON, keeping the raw text when it
/// is not JSON. Non-2xx answers become [`VoiceError::Upstream`].
pub async fn send_and_decode(request: RequestBuilder, provider: &str) -> Result<Value, VoiceError> {
    let resp = request
        .send()
        .await
        .map_err(|e| VoiceError::Network(format!("{} request failed: {}", provider, e)))?;

    let status = resp.status();
    let text = resp
        .text()
        .await
        .map_err(|e| VoiceError::Network(format!("{} response could not be read: {}", provider, e)))?;

    if !status.is_success() {
        return Err(VoiceError::Upstream {
            provider: provider.to_string(),
            status: status.as_u16(),
            body: text,
        });
    }

    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}

/// Run `fut` with a deadline. The future is dropped on expiry, which aborts
/// any in-flight HTTP call it owns.
pub async fn with_deadline<T, F>(label: &str, limit: Duration, fut: F) -> Result<T, VoiceError>
where
    F: Future<Output = Result<T, VoiceError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(VoiceError::Timeout(format!("{} did not answer within {:?}", label, limit))),
    }
}
