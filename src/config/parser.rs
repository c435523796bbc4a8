use std::path::Path;
use std::time::Duration;
use crate::errors::VoiceError;
use super::credentials::{non_blank, resolve_credential};
use super::env::process_env;
use super::types::{AppConfig, FileConfig};
use super::schema::CONFIG_SCHEMA;
use tracing::debug;

pub async fn parse_config(path: &Path) -> Result<FileConfig, VoiceError> {
    if !path.exists() {
        return Err(VoiceError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VoiceError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let yaml: serde_yaml::Value = serde_yaml::from_str(&content)?;
    if yaml.is_null() {
        return Ok(FileConfig::default());
    }

    validate_schema(&yaml)?;

    Ok(serde_yaml::from_value(yaml)?)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), VoiceError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| VoiceError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| VoiceError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        let messages: Vec<String> = errors
            .map(|e| format!("{} at {}", e, e.instance_path))
            .collect();
        if !messages.is_empty() {
            return Err(VoiceError::Config(messages.join("; ")));
        }
    }

    Ok(())
}

impl AppConfig {
    /// Overlay values from a parsed config file. `$VAR` credentials are
    /// resolved from the environment.
    pub fn apply_file(&mut self, file: FileConfig) {
        let key = |v: Option<String>| non_blank(v.map(|k| resolve_credential(&k)));
        let r = &mut self.resolver;

        if let Some(or) = file.openrouter {
            if let Some(k) = key(or.api_key) { r.openrouter_key = Some(k); }
            if let Some(m) = or.model { r.openrouter_model = m; }
            if let Some(u) = or.base_url { r.openrouter_base_url = u; }
        }
        if let Some(hf) = file.huggingface {
            if let Some(k) = key(hf.api_key) { r.hf_key = Some(k); }
            if let Some(m) = hf.text_model { r.hf_model = m; }
            if let Some(u) = hf.base_url { r.hf_base_url = u; }
            if let Some(m) = hf.stt_model { self.stt_model = m; }
            if let Some(m) = hf.nlu_model { self.nlu_model = m; }
        }
        if let Some(generation) = file.generation {
            if let Some(n) = generation.max_tokens { r.max_tokens = n; }
            if let Some(t) = generation.temperature { r.temperature = t; }
            if let Some(s) = generation.timeout_secs { r.attempt_timeout = Duration::from_secs(s); }
        }
        if let Some(server) = file.server {
            if let Some(limit) = server.max_body_bytes { self.max_body_bytes = limit; }
            if let Some(token) = key(server.api_token) { self.api_token = Some(token); }
        }
    }
}

/// Build the process configuration: defaults, then the optional file, then
/// environment variables.
pub async fn load_config(path: Option<&Path>) -> Result<AppConfig, VoiceError> {
    let mut config = AppConfig::default();
    if let Some(path) = path {
        debug!(path = %path.display(), "Loading config file");
        config.apply_file(parse_config(path).await?);
    }
    config.apply_env(process_env)?;
    Ok(config)
}
