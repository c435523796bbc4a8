use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::AppConfig;
use crate::errors::VoiceError;
use crate::llm::catalog::model_url;
use crate::llm::transport::{send_and_decode, with_deadline};
use crate::utils::truncate_for_log;

pub const CANDIDATE_LABELS: &[&str] = &["get_account", "support", "faq", "smalltalk", "other"];
pub const NLU_UPSTREAM_ERROR: &str = "NLU model error";

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Top-ranked label, or `Null` when the model answered in an unknown shape.
    pub intent: Value,
    pub raw: Value,
}

/// Zero-shot intent classification through the Hugging Face inference API.
pub struct IntentClassifier {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl IntentClassifier {
    pub fn from_config(config: &AppConfig, client: Client) -> Self {
        Self {
            client,
            api_key: config.hf_key().map(str::to_string),
            model: config.nlu_model.clone(),
            base_url: config.hf_base_url().to_string(),
            timeout: config.resolver.attempt_timeout,
        }
    }

    pub async fn classify(&self, text: &str) -> Result<Classification, VoiceError> {
        let api_key = self.api_key
            .as_deref()
            .ok_or_else(|| VoiceError::NotConfigured("HF_API_KEY not configured".into()))?;

        let request = self.client
            .post(model_url(&self.base_url, &self.model))
            .header("Authorization", format!("Bearer {}", api_key))
            .json(&json!({
                "inputs": text,
                "parameters": { "candidate_labels": CANDIDATE_LABELS },
            }));

        let label = format!("NLU ({})", self.model);
        let raw = with_deadline(&label, self.timeout, send_and_decode(request, "HF"))
            .await
            .map_err(|e| {
                let detail = e.detail();
                warn!(model = %self.model, error = %truncate_for_log(&detail), "Intent classification failed");
                VoiceError::service(NLU_UPSTREAM_ERROR, detail)
            })?;

        Ok(Classification { intent: top_label(&raw), raw })
    }
}

/// `labels[0]` of the classic zero-shot answer, or the first entry of the
/// list form (its `label` field when it has one).
pub fn top_label(raw: &Value) -> Value {
    if !raw["labels"][0].is_null() {
        return raw["labels"][0].clone();
    }
    match raw.as_array().and_then(|items| items.first()) {
        Some(first) if !first["label"].is_null() => first["label"].clone(),
        Some(first) => first.clone(),
        None => Value::Null,
    }
}
