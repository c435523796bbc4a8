use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::llm::catalog;

/// Settings consumed by the provider cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    pub openrouter_key: Option<String>,
    pub openrouter_model: String,
    pub openrouter_base_url: String,
    pub hf_key: Option<String>,
    pub hf_model: String,
    pub hf_base_url: String,
    pub max_tokens: u32,
    pub temperature: f64,
    /// Upper bound for a single upstream call.
    pub attempt_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            openrouter_key: None,
            openrouter_model: catalog::DEFAULT_OPENROUTER_MODEL.to_string(),
            openrouter_base_url: catalog::OPENROUTER_BASE_URL.to_string(),
            hf_key: None,
            hf_model: catalog::DEFAULT_HF_TEXT_MODEL.to_string(),
            hf_base_url: catalog::HF_BASE_URL.to_string(),
            max_tokens: catalog::DEFAULT_MAX_TOKENS,
            temperature: catalog::DEFAULT_TEMPERATURE,
            attempt_timeout: Duration::from_secs(catalog::DEFAULT_ATTEMPT_TIMEOUT_SECS),
        }
    }
}

pub const DEFAULT_MAX_BODY_BYTES: usize = 25 * 1024 * 1024;

/// Process-wide configuration, built once at startup and shared read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub resolver: ResolverConfig,
    pub stt_model: String,
    pub nlu_model: String,
    /// Bearer token required on API routes when set.
    pub api_token: Option<String>,
    /// Largest request body accepted by the API. Recorded audio arrives
    /// base64-encoded in a single JSON body.
    pub max_body_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            resolver: ResolverConfig::default(),
            stt_model: catalog::DEFAULT_HF_STT_MODEL.to_string(),
            nlu_model: catalog::DEFAULT_HF_NLU_MODEL.to_string(),
            api_token: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl AppConfig {
    pub fn hf_key(&self) -> Option<&str> {
        self.resolver.hf_key.as_deref()
    }

    pub fn hf_base_url(&self) -> &str {
        &self.resolver.hf_base_url
    }
}

/// Shape of the optional YAML configuration file.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct FileConfig {
    pub openrouter: Option<OpenRouterSection>,
    pub huggingface: Option<HuggingFaceSection>,
    pub generation: Option<GenerationSection>,
    pub server: Option<ServerSection>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OpenRouterSection {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HuggingFaceSection {
    pub api_key: Option<String>,
    pub text_model: Option<String>,
    pub stt_model: Option<String>,
    pub nlu_model: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct GenerationSection {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f64>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerSection {
    pub api_token: Option<String>,
    pub max_body_bytes: Option<usize>,
}
