/// Upper bound for upstream error text written to the log.
pub const MAX_LOG_DETAIL: usize = 800;
/// Upper bound for upstream error text returned to API callers.
pub const MAX_RESPONSE_DETAIL: usize = 1_000;
/// How much of the user's prompt is echoed by the local fallback reply.
pub const MAX_ECHOED_PROMPT: usize = 200;

/// Keep at most `max` characters of `text`, never splitting a character.
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn truncate_for_log(detail: &str) -> &str {
    truncate_chars(detail, MAX_LOG_DETAIL)
}

pub fn truncate_for_response(detail: &str) -> String {
    truncate_chars(detail, MAX_RESPONSE_DETAIL).to_string()
}
