//! Integration CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_entity::integration::Integration;
use kbase_service::IntegrationStats;

/// Arguments for integration commands
#[derive(Debug, Args)]
pub struct IntegrationArgs {
    /// Integration subcommand
    #[command(subcommand)]
    pub command: IntegrationCommand,
}

/// Integration subcommands
#[derive(Debug, Subcommand)]
pub enum IntegrationCommand {
    /// List integrations with their counters
    List,
    /// Connect or reconnect an integration
    Connect {
        /// Integration id or name
        integration: String,
        /// Wait until the connection is active
        #[arg(short, long)]
        wait: bool,
    },
    /// Switch auto-learn on a connected integration
    AutoLearn {
        /// Integration id or name
        integration: String,
        /// on | off
        #[arg(value_parser = ["on", "off"])]
        state: String,
    },
}

/// Integration display row
#[derive(Debug, Serialize, Tabled)]
pub struct IntegrationRow {
    /// Integration ID
    id: String,
    /// Display name
    name: String,
    /// Status badge
    status: String,
    /// Auto-learn switch
    #[tabled(rename = "auto-learn")]
    auto_learn: String,
    /// Card description
    description: String,
}

impl From<&Integration> for IntegrationRow {
    fn from(item: &Integration) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            status: item.status.label().to_string(),
            auto_learn: if item.auto_learn { "on" } else { "off" }.to_string(),
            description: item.description.clone(),
        }
    }
}

#[derive(Serialize)]
struct IntegrationListing<'a> {
    integrations: &'a [Integration],
    stats: IntegrationStats,
}

/// Execute integration commands
pub async fn execute(
    args: &IntegrationArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::open_session(config)?;

    match &args.command {
        IntegrationCommand::List => {}
        IntegrationCommand::Connect { integration, wait } => {
            let id = session.snapshot(|s| s.find_integration(integration)).await?;
            let item = session.connect_integration(&id).await?;
            if format == OutputFormat::Table {
                output::print_success(&format!("Connecting {}...", item.name));
            }
            if *wait {
                session.wait_idle().await;
            }
        }
        IntegrationCommand::AutoLearn { integration, state } => {
            let id = session.snapshot(|s| s.find_integration(integration)).await?;
            let enabled = state == "on";
            let item = session.set_auto_learn(&id, enabled).await?;
            if format == OutputFormat::Table {
                output::print_success(&format!(
                    "{} will {} automatically sync new content",
                    item.name,
                    if enabled { "now" } else { "no longer" }
                ));
            }
        }
    }

    let integrations = session.integrations().await;
    let stats = session.integration_stats().await;
    session.shutdown();

    match format {
        OutputFormat::Table => {
            let rows: Vec<IntegrationRow> = integrations.iter().map(IntegrationRow::from).collect();
            output::print_list(&rows, format);
            output::print_kv("Connected", &stats.connected.to_string());
            output::print_kv("Auto-learning", &stats.auto_learn.to_string());
            output::print_kv("Currently syncing", &stats.syncing.to_string());
        }
        OutputFormat::Json => output::print_json(&IntegrationListing {
            integrations: &integrations,
            stats,
        }),
    }

    Ok(())
}
