//! Default endpoints and model identifiers.

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_OPENROUTER_MODEL: &str = "deepseek/deepseek-chat-v3-0324:free";

pub const HF_BASE_URL: &str = "https://api-inference.huggingface.co/models";
pub const DEFAULT_HF_TEXT_MODEL: &str = "google/flan-t5-small";
/// Model retried once when the configured Hugging Face model fails.
pub const HF_FALLBACK_MODEL: &str = "gpt2";
pub const DEFAULT_HF_STT_MODEL: &str = "openai/whisper-large";
pub const DEFAULT_HF_NLU_MODEL: &str = "facebook/bart-large-mnli";

pub const DEFAULT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;
pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 30;

pub const SYSTEM_INSTRUCTION: &str = "You are a helpful assistant. Answer concisely.";

/// Join an inference base URL and a model id (`org/name` paths are kept as-is).
pub fn model_url(base_url: &str, model: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), model.trim_start_matches('/'))
}
