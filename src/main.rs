// Triagem - Hybrid PII Detection Engine
// Copyright (c) 2026 Triagem Contributors
// Licensed under the MIT License

use clap::Parser;
use std::path::Path;
use std::process;
use triagem::cli::{Cli, Commands};
use triagem::config::TriagemConfig;
use triagem::logging::init_logging;

fn main() {
    // Load environment variables from .env file if present
    // This is optional - if .env doesn't exist, it's silently ignored
    let _ = dotenvy::dotenv();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration; a missing file falls back to defaults so the CLI
    // works out of the box.
    let mut config = if Path::new(&cli.config).exists() {
        match TriagemConfig::from_file(&cli.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load configuration: {e}");
                process::exit(2);
            }
        }
    } else {
        TriagemConfig::default()
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }

    let _guard = match init_logging(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(5);
        }
    };

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Triagem - Hybrid PII Detection"
    );

    let result = match cli.command {
        Commands::Train(args) => args.execute(&config),
        Commands::Evaluate(args) => args.execute(&config),
        Commands::Detect(args) => args.execute(&config),
        Commands::Init(args) => args.execute(),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            tracing::error!(error = ?e, "Command failed");
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}
