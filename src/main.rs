use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use voiceqa::{cli, config, errors};

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.with_ansi(!cli.no_color).init();
    }

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let exit_code = match &e {
            errors::VoiceError::Config(_) => 2,
            errors::VoiceError::InvalidRequest(_) => 3,
            errors::VoiceError::Gateway { .. } => 4,
            _ => 1,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: cli::Cli) -> Result<(), errors::VoiceError> {
    match cli.command {
        cli::Commands::Validate(args) => cli::validate::handle_validate(args).await,
        cli::Commands::Serve(args) => {
            let config = config::load_config(cli.config.as_deref().map(Path::new)).await?;
            cli::serve::handle_serve(args, config).await
        }
        cli::Commands::Ask(args) => {
            let config = config::load_config(cli.config.as_deref().map(Path::new)).await?;
            cli::ask::handle_ask(args, config).await
        }
    }
}
