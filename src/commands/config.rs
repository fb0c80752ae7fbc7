//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_entity::widget::WidgetConfig;

/// Default configuration shipped with the binary
const DEFAULT_CONFIG: &str = include_str!("../../config/default.toml");

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration and print a summary
    Validate,
    /// Generate a default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => match format {
            OutputFormat::Table => println!("{:#?}", config),
            OutputFormat::Json => output::print_json(config),
        },
        ConfigCommand::Validate => {
            let checked = config
                .validate()
                .and_then(|_| WidgetConfig::from_studio(&config.studio));
            if let Err(e) = checked {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
            output::print_success(&format!("Configuration '{}' is valid", config_path));
            output::print_kv(
                "Accepted extensions",
                &config.knowledge.accepted_extensions.join(", "),
            );
            output::print_kv("Seed demo data", &config.knowledge.seed_demo_data.to_string());
            output::print_kv(
                "Upload sync",
                &format!(
                    "+{} every {}ms",
                    config.sync.upload.step, config.sync.upload.interval_ms
                ),
            );
            output::print_kv(
                "Resync",
                &format!(
                    "+{} every {}ms",
                    config.sync.resync.step, config.sync.resync.interval_ms
                ),
            );
            output::print_kv(
                "Integration connect",
                &format!("{}ms", config.sync.connect_delay_ms),
            );
            output::print_kv("Log level", &config.logging.level);
        }
        ConfigCommand::Generate { output: out_path } => {
            AppConfig::from_toml(DEFAULT_CONFIG)?;

            if let Some(parent) = std::path::Path::new(out_path).parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(out_path, DEFAULT_CONFIG).await?;

            output::print_success(&format!("Default config written to '{}'", out_path));
        }
    }

    Ok(())
}
