use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "additionalProperties": false,
        "properties": {
            "openrouter": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "api_key": { "type": "string" },
                    "model": { "type": "string", "minLength": 1 },
                    "base_url": { "type": "string", "format": "uri" }
                }
            },
            "huggingface": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "api_key": { "type": "string" },
                    "text_model": { "type": "string", "minLength": 1 },
                    "stt_model": { "type": "string", "minLength": 1 },
                    "nlu_model": { "type": "string", "minLength": 1 },
                    "base_url": { "type": "string", "format": "uri" }
                }
            },
            "generation": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "max_tokens": { "type": "integer", "minimum": 1 },
                    "temperature": { "type": "number", "minimum": 0 },
                    "timeout_secs": { "type": "integer", "minimum": 1 }
                }
            },
            "server": {
                "type": "object",
                "additionalProperties": false,
                "properties": {
                    "api_token": { "type": "string" },
                    "max_body_bytes": { "type": "integer", "minimum": 1 }
                }
            }
        }
    })
});
