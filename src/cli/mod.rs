//! CLI module for RAG Gateway
//!
//! Subcommands:
//! - `serve`: HTTP query API
//! - `ingest`: load a corpus directory into the vector store
//! - `query`: answer a single question from the terminal

pub mod ingest;
pub mod query;
pub mod serve;

use clap::{Args, Parser, Subcommand};

use crate::config::{AppConfig, DEFAULT_CONFIG_PATH};
use crate::infrastructure::logging;

/// RAG Gateway - retrieval-augmented answers with guardrails
#[derive(Parser)]
#[command(name = "rag-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP query API
    Serve(ConfigArgs),

    /// Chunk, embed and store a corpus directory
    Ingest(ingest::IngestArgs),

    /// Answer one question and print the result
    Query(query::QueryArgs),
}

/// Configuration file selection shared by every subcommand
#[derive(Args, Clone, Debug)]
pub struct ConfigArgs {
    /// Configuration file, without extension
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

/// Load `.env`, the configuration and logging
fn bootstrap(args: &ConfigArgs) -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load(&args.config)
        .map_err(|e| anyhow::anyhow!("Failed to load configuration '{}': {}", args.config, e))?;

    logging::init_logging(&config.logging)?;
    Ok(config)
}
