//! CLI command definitions and dispatch.

pub mod config;
pub mod embed;
pub mod folder;
pub mod integration;
pub mod replay;
pub mod source;
pub mod stats;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_worker::KnowledgeSession;

/// SupportAI knowledge base: folders, sources and simulated sync
#[derive(Debug, Parser)]
#[command(name = "kbase", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Folder management
    Folder(folder::FolderArgs),
    /// Knowledge source management
    Source(source::SourceArgs),
    /// External integrations
    Integration(integration::IntegrationArgs),
    /// Source counters
    Stats,
    /// Chat widget embed snippet
    Embed(embed::EmbedArgs),
    /// Configuration management
    Config(config::ConfigArgs),
    /// Apply a scripted sequence of actions to a fresh session
    Replay(replay::ReplayArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Folder(args) => folder::execute(args, config, self.format).await,
            Commands::Source(args) => source::execute(args, config, self.format).await,
            Commands::Integration(args) => integration::execute(args, config, self.format).await,
            Commands::Stats => stats::execute(config, self.format).await,
            Commands::Embed(args) => embed::execute(args, config, self.format),
            Commands::Config(args) => config::execute(args, &self.config, config, self.format).await,
            Commands::Replay(args) => replay::execute(args, config, self.format).await,
        }
    }
}

/// Helper: open a fresh session from config
pub fn open_session(config: &AppConfig) -> Result<KnowledgeSession, AppError> {
    KnowledgeSession::from_config(config)
}
