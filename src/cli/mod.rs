//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Triagem using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Triagem - Hybrid PII detection for public-records requests
#[derive(Parser, Debug)]
#[command(name = "triagem")]
#[command(version, about, long_about = None)]
#[command(author = "Triagem Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "triagem.toml", env = "TRIAGEM_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "TRIAGEM_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the statistical classifier on a labeled corpus
    Train(commands::train::TrainArgs),

    /// Evaluate the detector against a labeled corpus
    Evaluate(commands::evaluate::EvaluateArgs),

    /// Classify a single text record
    Detect(commands::detect::DetectArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
