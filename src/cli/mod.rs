//! CLI module for the Respondo console
//!
//! Subcommands:
//! - `serve`: HTTP API for the web console
//! - `migrate`: apply (or revert) database migrations
//! - `keys`: manage the operator's API keys from the terminal
//! - `openai`: send one request to the OpenAI REST API

pub mod keys;
pub mod migrate;
pub mod openai;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::logging;

/// Respondo console - API key management
#[derive(Parser)]
#[command(name = "respondo-console")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Apply pending database migrations
    Migrate(migrate::MigrateArgs),

    /// Manage API keys
    Keys(keys::KeysArgs),

    /// Call the OpenAI REST API
    Openai(openai::OpenAiArgs),
}

/// Load `.env` and configuration, then install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    Ok(config)
}
