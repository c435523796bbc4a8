use clap::{Parser, Subcommand, Args};

#[derive(Parser)]
#[command(name = "voiceqa", version, about = "Voice question-answering backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// YAML configuration file (environment variables take precedence)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Increase log verbosity (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),
    /// Answer a single prompt through the provider cascade
    Ask(AskArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[derive(Args, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(long, default_value = "3000")]
    pub port: u16,

    /// Listen address
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// SQLite database path for analytics
    #[arg(long, default_value = "./data/voiceqa.db")]
    pub db: String,
}

#[derive(Args, Clone)]
pub struct AskArgs {
    /// Prompt to answer
    pub prompt: String,

    /// Opaque file reference echoed back in the result
    #[arg(long)]
    pub file_url: Option<String>,

    /// Also print every provider attempt
    #[arg(long)]
    pub attempts: bool,
}

#[derive(Args, Clone)]
pub struct ValidateArgs {
    /// Config file to validate
    #[arg(value_name = "FILE")]
    pub path: String,
}
