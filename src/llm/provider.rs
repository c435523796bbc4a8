use async_trait::async_trait;
use crate::errors::VoiceError;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form text completion of a single user prompt
    async fn complete(&self, prompt: &str) -> Result<String, VoiceError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}
