use crate::utils::truncate_chars;
use crate::utils::truncation::MAX_ECHOED_PROMPT;

/// Placeholder reply used when no model-backed provider is available.
pub fn fallback_reply(prompt: &str) -> String {
    format!(
        "Fallback reply: I heard \"{}\". (No external model configured.)",
        truncate_chars(prompt, MAX_ECHOED_PROMPT)
    )
}
