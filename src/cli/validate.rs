use std::path::Path;
use crate::cli::commands::ValidateArgs;
use crate::config::{parse_config, AppConfig};
use crate::errors::VoiceError;

pub async fn handle_validate(args: ValidateArgs) -> Result<(), VoiceError> {
    let file = parse_config(Path::new(&args.path)).await?;
    let mut config = AppConfig::default();
    config.apply_file(file);
    config.validate()?;
    println!("Configuration is valid: {}", args.path);
    Ok(())
}
