use std::time::Duration;

use crate::errors::VoiceError;
use super::credentials::non_blank;
use super::types::AppConfig;

pub const ENV_OPENROUTER_KEY: &str = "OPENROUTER_API_KEY";
pub const ENV_OPENROUTER_MODEL: &str = "OPENROUTER_MODEL";
pub const ENV_OPENROUTER_BASE_URL: &str = "OPENROUTER_BASE_URL";
pub const ENV_HF_KEY: &str = "HF_API_KEY";
pub const ENV_HF_TEXT_MODEL: &str = "HF_TEXT_MODEL";
pub const ENV_HF_STT_MODEL: &str = "HF_STT_MODEL";
pub const ENV_HF_NLU_MODEL: &str = "HF_NLU_MODEL";
pub const ENV_HF_BASE_URL: &str = "HF_BASE_URL";
pub const ENV_MAX_TOKENS: &str = "GENERATE_MAX_TOKENS";
pub const ENV_TEMPERATURE: &str = "GENERATE_TEMPERATURE";
pub const ENV_TIMEOUT_SECS: &str = "GENERATE_TIMEOUT_SECS";
pub const ENV_API_TOKEN: &str = "VOICEQA_API_TOKEN";
pub const ENV_MAX_BODY_BYTES: &str = "VOICEQA_MAX_BODY_BYTES";

/// Process environment lookup; unset and blank values are both `None`.
pub fn process_env(name: &str) -> Option<String> {
    non_blank(std::env::var(name).ok())
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, VoiceError> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| VoiceError::Config(format!("{} must be a number, got '{}'", name, value)))
}

impl AppConfig {
    /// Overlay environment variables on top of the current values.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), VoiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| non_blank(lookup(name));
        let r = &mut self.resolver;

        if let Some(v) = get(ENV_OPENROUTER_KEY) { r.openrouter_key = Some(v); }
        if let Some(v) = get(ENV_OPENROUTER_MODEL) { r.openrouter_model = v; }
        if let Some(v) = get(ENV_OPENROUTER_BASE_URL) { r.openrouter_base_url = v; }
        if let Some(v) = get(ENV_HF_KEY) { r.hf_key = Some(v); }
        if let Some(v) = get(ENV_HF_TEXT_MODEL) { r.hf_model = v; }
        if let Some(v) = get(ENV_HF_BASE_URL) { r.hf_base_url = v; }
        if let Some(v) = get(ENV_MAX_TOKENS) { r.max_tokens = parse_number(ENV_MAX_TOKENS, &v)?; }
        if let Some(v) = get(ENV_TEMPERATURE) { r.temperature = parse_number(ENV_TEMPERATURE, &v)?; }
        if let Some(v) = get(ENV_TIMEOUT_SECS) {
            r.attempt_timeout = Duration::from_secs(parse_number(ENV_TIMEOUT_SECS, &v)?);
        }

        if let Some(v) = get(ENV_HF_STT_MODEL) { self.stt_model = v; }
        if let Some(v) = get(ENV_HF_NLU_MODEL) { self.nlu_model = v; }
        if let Some(v) = get(ENV_API_TOKEN) { self.api_token = Some(v); }
        if let Some(v) = get(ENV_MAX_BODY_BYTES) { self.max_body_bytes = parse_number(ENV_MAX_BODY_BYTES, &v)?; }

        self.validate()
    }

    pub fn validate(&self) -> Result<(), VoiceError> {
        let r = &self.resolver;
        if r.max_tokens == 0 {
            return Err(VoiceError::Config(format!("{} must be greater than 0", ENV_MAX_TOKENS)));
        }
        if !r.temperature.is_finite() || r.temperature < 0.0 {
            return Err(VoiceError::Config(format!("{} must be a non-negative number", ENV_TEMPERATURE)));
        }
        if r.attempt_timeout.is_zero() {
            return Err(VoiceError::Config(format!("{} must be greater than 0 seconds", ENV_TIMEOUT_SECS)));
        }
        if self.max_body_bytes == 0 {
            return Err(VoiceError::Config(format!("{} must be greater than 0", ENV_MAX_BODY_BYTES)));
        }
        Ok(())
    }
}
