//! Knowledge source CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use kbase_core::config::AppConfig;
use kbase_core::error::AppError;
use kbase_entity::file::FileItem;
use kbase_service::{KnowledgeStore, SourceInput};
use kbase_worker::KnowledgeSession;

/// Arguments for source commands
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Source subcommand
    #[command(subcommand)]
    pub command: SourceCommand,
}

/// Source subcommands
#[derive(Debug, Subcommand)]
pub enum SourceCommand {
    /// List sources, newest first
    List {
        /// Only sources filed directly under this folder (id or label)
        #[arg(long)]
        folder: Option<String>,
        /// Case-insensitive name search
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Add a source and start processing it
    Add {
        /// Folder to file the source under (id or label)
        #[arg(long, global = true)]
        folder: Option<String>,
        /// Wait until processing finishes
        #[arg(short, long, global = true)]
        wait: bool,
        /// What to add
        #[command(subcommand)]
        input: AddInput,
    },
    /// Delete a source
    Delete {
        /// Source id or exact name
        source: String,
    },
    /// Reprocess a source
    Resync {
        /// Source id or exact name
        source: String,
        /// Wait until processing finishes
        #[arg(short, long)]
        wait: bool,
    },
}

/// Source input variants
#[derive(Debug, Subcommand)]
pub enum AddInput {
    /// A document by file name
    File {
        /// File name including extension
        file_name: String,
    },
    /// A web page
    Url {
        /// Absolute URL
        url: String,
    },
    /// Pasted text
    Text {
        /// Source title
        #[arg(short, long)]
        title: String,
        /// Text content
        body: String,
    },
}

impl From<&AddInput> for SourceInput {
    fn from(input: &AddInput) -> Self {
        match input {
            AddInput::File { file_name } => SourceInput::File {
                file_name: file_name.clone(),
            },
            AddInput::Url { url } => SourceInput::Url { url: url.clone() },
            AddInput::Text { title, body } => SourceInput::Text {
                title: title.clone(),
                body: body.clone(),
            },
        }
    }
}

/// Source display row
#[derive(Debug, Serialize, Tabled)]
pub struct SourceRow {
    /// Source ID
    id: String,
    /// Display name
    name: String,
    /// Source kind
    #[tabled(rename = "type")]
    #[serde(rename = "type")]
    kind: String,
    /// Sync status
    status: String,
    /// Progress shown in the card
    progress: String,
    /// Folder label
    folder: String,
}

/// Build display rows, resolving folder ids to labels
pub fn source_rows(store: &KnowledgeStore, items: &[FileItem]) -> Vec<SourceRow> {
    items
        .iter()
        .map(|item| SourceRow {
            id: item.id.to_string(),
            name: item.name.clone(),
            kind: item.kind.to_string(),
            status: item.status.to_string(),
            progress: format!("{}%", item.display_progress()),
            folder: match &item.folder_id {
                Some(id) => store
                    .folders()
                    .label(id)
                    .unwrap_or_else(|| format!("{id} (deleted)")),
                None => "-".to_string(),
            },
        })
        .collect()
}

/// Execute source commands
pub async fn execute(
    args: &SourceArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let session = super::open_session(config)?;

    match &args.command {
        SourceCommand::List { folder, search } => {
            if let Some(reference) = folder {
                let folder_id = session.snapshot(|s| s.find_folder(reference)).await?;
                session.select_folder(Some(folder_id)).await?;
            }
            session.set_search(search.as_str()).await;
            print_visible(&session, format).await;
        }
        SourceCommand::Add {
            folder,
            wait,
            input,
        } => {
            if let Some(reference) = folder {
                let folder_id = session.snapshot(|s| s.find_folder(reference)).await?;
                session.select_folder(Some(folder_id)).await?;
            }
            let item = session.add_source(input.into()).await?;
            if format == OutputFormat::Table {
                output::print_success(&format!("{} is being processed", item.name));
            }
            finish(&session, &item, *wait, format).await?;
        }
        SourceCommand::Delete { source } => {
            let file_id = session.snapshot(|s| s.find_source(source)).await?;
            let removed = session.delete_source(&file_id).await?;
            if format == OutputFormat::Table {
                output::print_success(&format!("Source '{}' deleted", removed.name));
            }
            print_visible(&session, format).await;
        }
        SourceCommand::Resync { source, wait } => {
            let file_id = session.snapshot(|s| s.find_source(source)).await?;
            let item = session.resync_source(&file_id).await?;
            if format == OutputFormat::Table {
                output::print_success(&format!("Resyncing {}", item.name));
            }
            finish(&session, &item, *wait, format).await?;
        }
    }

    session.shutdown();
    Ok(())
}

/// Optionally wait for processing, then print the item's current state
async fn finish(
    session: &KnowledgeSession,
    item: &FileItem,
    wait: bool,
    format: OutputFormat,
) -> Result<(), AppError> {
    if wait {
        session.wait_idle().await;
    }
    let rows = session
        .snapshot(|store| {
            store
                .source(&item.id)
                .map(|current| source_rows(store, std::slice::from_ref(current)))
        })
        .await
        .ok_or_else(|| AppError::not_found(format!("Source '{}' not found", item.id)))?;
    output::print_list(&rows, format);
    Ok(())
}

async fn print_visible(session: &KnowledgeSession, format: OutputFormat) {
    let rows = session
        .snapshot(|store| source_rows(store, &store.visible_sources()))
        .await;
    output::print_list(&rows, format);
}
