use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use crate::errors::VoiceError;
use super::catalog::SYSTEM_INSTRUCTION;
use super::provider::LLMProvider;
use super::response_parsing::extract_chat_content;
use super::transport::send_and_decode;
use super::types::{GenerationParams, Message};
use tracing::debug;

pub struct OpenRouterProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    params: GenerationParams,
}

impl OpenRouterProvider {
    pub fn new(client: Client, api_key: &str, model: &str, base_url: &str, params: GenerationParams) -> Self {
        Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
            params,
        }
    }
}

#[async_trait]
impl LLMProvider for OpenRouterProvider {
    async fn complete(&self, prompt: &str) -> Result<String, VoiceError> {
        let body = json!({
            "model": self.model,
            "messages": [Message::system(SYSTEM_INSTRUCTION), Message::user(prompt)],
            "max_tokens": self.params.max_tokens,
            "temperature": self.params.temperature,
        });

        debug!(model = %self.model, "Sending OpenRouter chat completion");
        let request = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);

        let data = send_and_decode(request, "OpenRouter").await?;
        Ok(extract_chat_content(&data))
    }

    fn provider_name(&self) -> &str { "openrouter" }
    fn model_name(&self) -> &str { &self.model }
}
