//! Replay a JSON action script against a fresh session.

use clap::Args;
use serde::Serialize;

use crate::commands::source::{SourceRow, source_rows};
use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_entity::folder::FolderNode;
use kbase_service::RegistryStats;
use kbase_worker::{ScriptReport, parse_script, run_script};

/// Arguments for the replay command
#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Path to a JSON array of actions
    pub script: String,
    /// Wait for every running sync to finish before printing
    #[arg(short, long)]
    pub settle: bool,
    /// Also drive seeded sources that start out syncing
    #[arg(long)]
    pub resume_seeded: bool,
}

/// Full replay result for JSON output
#[derive(Debug, Serialize)]
struct ReplayOutput {
    report: ScriptReport,
    folders: Vec<FolderNode>,
    sources: Vec<SourceRow>,
    stats: RegistryStats,
}

/// Execute the replay command
pub async fn execute(
    args: &ReplayArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let raw = tokio::fs::read_to_string(&args.script).await?;
    let actions = parse_script(&raw)?;

    let session = super::open_session(config)?;
    if args.resume_seeded {
        session.resume_pending().await?;
    }

    let report = run_script(&session, &actions, args.settle).await;
    session.shutdown();

    let (folders, sources, stats) = session
        .snapshot(|store| {
            (
                store.forest(),
                source_rows(store, &store.visible_sources()),
                store.stats(),
            )
        })
        .await;

    match format {
        OutputFormat::Table => {
            output::print_success(&format!(
                "Applied {} of {} action(s)",
                report.applied,
                actions.len()
            ));
            for failure in &report.failures {
                output::print_error(&format!("step {}: {}", failure.step, failure.message));
            }
            if report.events_dropped > 0 {
                output::print_warning(&format!("{} event(s) dropped", report.events_dropped));
            }

            println!("\nEvents");
            output::print_events(&report.events, format);
            println!("\nFolders");
            output::print_tree(&folders, format);
            println!("\nSources");
            output::print_list(&sources, format);
            println!();
            output::print_kv("Total sources", &stats.total.to_string());
            output::print_kv("Synced", &stats.synced.to_string());
            output::print_kv("Processing", &stats.syncing.to_string());
        }
        OutputFormat::Json => output::print_json(&ReplayOutput {
            report,
            folders,
            sources,
            stats,
        }),
    }

    Ok(())
}
