//! Main entry point for the doctran CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod core;
mod processors;

use cli::commands::Commands;

/// doctran - Batch documentation translator
#[derive(Parser, Debug)]
#[command(name = "doctran", version, about, long_about = None)]
struct Args {
    /// API key for the translation provider (defaults to TRANSLATE_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    let log_level = if std::env::var("RUST_LOG").is_ok() {
        std::env::var("RUST_LOG").unwrap()
    } else {
        "info".to_string()
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_PKG_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Override config with CLI args if provided
    if let Some(api_key) = args.api_key {
        std::env::set_var("TRANSLATE_API_KEY", api_key);
    }

    if args.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }

    // Execute command
    match args.command {
        Some(Commands::Run {
            root,
            target_lang,
            glossary,
        }) => {
            cli::commands::handle_run(root, target_lang, glossary).await?;
        }
        Some(Commands::File {
            file,
            output,
            target_lang,
            glossary,
        }) => {
            cli::commands::handle_file(file, output, target_lang, glossary).await?;
        }
        Some(Commands::Json {
            file,
            output,
            target_lang,
            glossary,
        }) => {
            cli::commands::handle_json(file, output, target_lang, glossary).await?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
