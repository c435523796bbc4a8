use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use crate::errors::VoiceError;
use super::catalog::model_url;
use super::provider::LLMProvider;
use super::response_parsing::parse_generated_text;
use super::transport::send_and_decode;
use super::types::GenerationParams;
use tracing::debug;

/// Text generation through the Hugging Face inference API.
pub struct HuggingFaceProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    params: GenerationParams,
}

impl HuggingFaceProvider {
    pub fn new(client: Client, api_key: &str, model: &str, base_url: &str, params: GenerationParams) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.to_string(),
            params,
        }
    }
}

#[async_trait]
impl LLMProvider for HuggingFaceProvider {
    async fn complete(&self, prompt: &str) -> Result<String, VoiceError> {
        let body = json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": self.params.max_tokens,
                "temperature": self.params.temperature,
            }
        });

        debug!(model = %self.model, "Sending Hugging Face text generation");
        let request = self.client
            .post(model_url(&self.base_url, &self.model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
            .json(&body);

        let data = send_and_decode(request, "HF").await?;
        Ok(parse_generated_text(&data))
    }

    fn provider_name(&self) -> &str { "huggingface" }
    fn model_name(&self) -> &str { &self.model }
}
