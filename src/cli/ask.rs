use reqwest::Client;
use serde_json::json;
use tracing::warn;
use crate::cli::commands::AskArgs;
use crate::config::AppConfig;
use crate::errors::VoiceError;
use crate::llm::Resolver;

pub async fn handle_ask(args: AskArgs, config: AppConfig) -> Result<(), VoiceError> {
    if args.prompt.is_empty() {
        return Err(VoiceError::invalid("Missing prompt"));
    }

    let resolver = Resolver::from_config(&config.resolver, Client::new());

    // Dropping the resolution future on Ctrl-C cancels any in-flight upstream call.
    let resolution = tokio::select! {
        res = resolver.resolve(&args.prompt) => res?,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted, abandoning request");
            return Err(VoiceError::Internal("Interrupted".into()));
        }
    };

    let mut result = resolution.result;
    result.file_url = args.file_url;

    let output = if args.attempts {
        json!({ "result": result, "attempts": resolution.attempts })
    } else {
        serde_json::to_value(&result)?
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
