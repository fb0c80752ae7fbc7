//! Folder management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_entity::folder::FolderOption;

/// Arguments for folder commands
#[derive(Debug, Args)]
pub struct FolderArgs {
    /// Folder subcommand
    #[command(subcommand)]
    pub command: FolderCommand,
}

/// Folder subcommands
#[derive(Debug, Subcommand)]
pub enum FolderCommand {
    /// Show the folder tree
    Tree,
    /// List folders with their full labels
    List,
    /// Create a folder and show the resulting tree
    Create {
        /// Folder name
        name: String,
        /// Parent folder id or label (omit for root)
        #[arg(short, long)]
        parent: Option<String>,
    },
    /// Delete a folder with its subfolders and show what was removed
    Delete {
        /// Folder id or label
        folder: String,
    },
}

/// Folder display row
#[derive(Debug, Serialize, Tabled)]
struct FolderRow {
    /// Folder ID
    id: String,
    /// Full label
    label: String,
    /// Static file count
    files: u64,
}

/// Execute folder commands
pub async fn execute(
    args: &FolderArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::open_session(config)?;

    match &args.command {
        FolderCommand::Tree => {
            output::print_tree(&session.forest().await, format);
        }
        FolderCommand::List => {
            let rows = session
                .snapshot(|store| {
                    store
                        .folder_options()
                        .into_iter()
                        .map(|FolderOption { id, label }| FolderRow {
                            files: store.folders().get(&id).map_or(0, |node| node.file_count),
                            id: id.into_inner(),
                            label,
                        })
                        .collect::<Vec<_>>()
                })
                .await;
            output::print_list(&rows, format);
        }
        FolderCommand::Create { name, parent } => {
            let parent_id = match parent {
                Some(reference) => Some(session.snapshot(|s| s.find_folder(reference)).await?),
                None => None,
            };
            let folder = session.create_folder(name, parent_id.as_ref()).await?;

            if format == OutputFormat::Table {
                output::print_success(&format!(
                    "Folder '{}' created (id: {})",
                    folder.name, folder.id
                ));
            }
            output::print_tree(&session.forest().await, format);
        }
        FolderCommand::Delete { folder } => {
            let folder_id = session.snapshot(|s| s.find_folder(folder)).await?;
            let deletion = session.delete_folder(&folder_id).await?;

            match format {
                OutputFormat::Table => {
                    output::print_success(&format!(
                        "Deleted {} folder(s) and {} source(s)",
                        deletion.removed_folders.len(),
                        deletion.removed_sources.len()
                    ));
                    output::print_tree(&session.forest().await, format);
                }
                OutputFormat::Json => output::print_json(&deletion),
            }
        }
    }

    Ok(())
}
