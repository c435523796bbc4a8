use serde_json::Value;

/// Render a JSON value as reply text: strings verbatim, anything else as JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First non-null field among `keys`, rendered as text.
fn first_field(value: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .map(|k| &value[*k])
        .find(|v| !v.is_null())
        .map(value_to_text)
}

/// Reply text of a chat completion: `choices[0].message.content`, then
/// `choices[0].text`, then the payload itself.
pub fn extract_chat_content(data: &Value) -> String {
    let choice = &data["choices"][0];
    [&choice["message"]["content"], &choice["text"]]
        .into_iter()
        .find(|v| !v.is_null())
        .map(value_to_text)
        .unwrap_or_else(|| value_to_text(data))
}

/// Reply text of a Hugging Face text-generation call. The inference API
/// answers with a bare string, a list of `{generated_text}` objects, or a
/// single object depending on the model.
pub fn parse_generated_text(data: &Value) -> String {
    const FIELDS: &[&str] = &["generated_text", "text"];
    match data {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) => match items.first().filter(|first| !first.is_null()) {
            Some(first) => first_field(first, FIELDS).unwrap_or_else(|| value_to_text(first)),
            None => value_to_text(data),
        },
        other => first_field(other, FIELDS).unwrap_or_else(|| value_to_text(other)),
    }
}
