//! Source counters.

use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;

/// Print total, synced, processing and failed source counts
pub async fn execute(config: &AppConfig, format: OutputFormat) -> Result<(), AppError> {
    let session = super::open_session(config)?;
    let stats = session.stats().await;

    match format {
        OutputFormat::Table => {
            println!("Knowledge base");
            output::print_kv("Total sources", &stats.total.to_string());
            output::print_kv("Synced", &stats.synced.to_string());
            output::print_kv("Processing", &stats.syncing.to_string());
            output::print_kv("Failed", &stats.error.to_string());
        }
        OutputFormat::Json => output::print_json(&stats),
    }

    Ok(())
}
