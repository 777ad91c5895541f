//! AI Mentor CLI entry point.

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use ai_mentor::cli::Cli;
use ai_mentor::commands;

#[tokio::main]
async fn main() {
    // Load .env.local if it exists (for HUGGING_FACE_API_KEY etc.)
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();

    if let Err(e) = commands::execute(cli.command).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
