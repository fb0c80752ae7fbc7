//! Scripted sessions: a JSON list of dashboard actions applied in order.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast::error::TryRecvError;

use kbase_core::error::AppError;
use kbase_core::events::DomainEvent;
use kbase_service::SourceInput;

use crate::session::KnowledgeSession;

/// One user action. References accept an id or a display name: a full
/// folder label, an exact source name, or an integration name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    /// Create a folder at the root or under `parent`
    CreateFolder {
        /// Folder name
        name: String,
        /// Parent folder reference
        #[serde(default)]
        parent: Option<String>,
    },
    /// Delete a folder subtree
    DeleteFolder {
        /// Folder reference
        folder: String,
    },
    /// Select a folder, or "All Files" when omitted
    SelectFolder {
        /// Folder reference
        #[serde(default)]
        folder: Option<String>,
    },
    /// Set the search text
    Search {
        /// Search text
        text: String,
    },
    /// Add a source to the selected folder
    AddSource {
        /// Raw source input
        source: SourceInput,
    },
    /// Delete a source
    DeleteSource {
        /// Source reference
        source: String,
    },
    /// Reprocess a source
    ResyncSource {
        /// Source reference
        source: String,
    },
    /// Start connecting an integration
    ConnectIntegration {
        /// Integration reference
        integration: String,
    },
    /// Switch auto-learn on a connected integration
    SetAutoLearn {
        /// Integration reference
        integration: String,
        /// New setting
        enabled: bool,
    },
    /// Wait until every running sync and connection has finished
    WaitForSync,
    /// Let time pass
    Sleep {
        /// Milliseconds
        ms: u64,
    },
}

/// A step that failed; the script continues after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptFailure {
    /// Zero-based step index
    pub step: usize,
    /// The failing action
    pub action: ScriptAction,
    /// Error message
    pub message: String,
}

/// What a script run did
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptReport {
    /// Steps that succeeded
    pub applied: usize,
    /// Steps that failed
    pub failures: Vec<ScriptFailure>,
    /// Events published while the script ran
    pub events: Vec<DomainEvent>,
    /// Events lost because the channel overflowed
    pub events_dropped: u64,
}

/// Parse a script from JSON
pub fn parse_script(json: &str) -> Result<Vec<ScriptAction>, AppError> {
    Ok(serde_json::from_str(json)?)
}

/// Apply actions to a session in order
pub async fn run_script(
    session: &KnowledgeSession,
    actions: &[ScriptAction],
    settle: bool,
) -> ScriptReport {
    let mut rx = session.subscribe();
    let mut report = ScriptReport::default();

    for (step, action) in actions.iter().enumerate() {
        match apply(session, action).await {
            Ok(()) => report.applied += 1,
            Err(e) => {
                tracing::warn!("Script step {} ({:?}) failed: {}", step, action, e);
                report.failures.push(ScriptFailure {
                    step,
                    action: action.clone(),
                    message: e.to_string(),
                });
            }
        }
    }

    if settle {
        session.wait_idle().await;
    }

    loop {
        match rx.try_recv() {
            Ok(event) => report.events.push(event),
            Err(TryRecvError::Lagged(n)) => report.events_dropped += n,
            Err(TryRecvError::Empty | TryRecvError::Closed) => break,
        }
    }

    tracing::info!(
        "Script finished: {} applied, {} failed, {} events",
        report.applied,
        report.failures.len(),
        report.events.len()
    );

    report
}

async fn apply(session: &KnowledgeSession, action: &ScriptAction) -> Result<(), AppError> {
    match action {
        ScriptAction::CreateFolder { name, parent } => {
            let parent_id = match parent {
                Some(reference) => Some(session.snapshot(|s| s.find_folder(reference)).await?),
                None => None,
            };
            session.create_folder(name, parent_id.as_ref()).await?;
        }
        ScriptAction::DeleteFolder { folder } => {
            let folder_id = session.snapshot(|s| s.find_folder(folder)).await?;
            session.delete_folder(&folder_id).await?;
        }
        ScriptAction::SelectFolder { folder } => {
            let folder_id = match folder {
                Some(reference) => Some(session.snapshot(|s| s.find_folder(reference)).await?),
                None => None,
            };
            session.select_folder(folder_id).await?;
        }
        ScriptAction::Search { text } => session.set_search(text.as_str()).await,
        ScriptAction::AddSource { source } => {
            session.add_source(source.clone()).await?;
        }
        ScriptAction::DeleteSource { source } => {
            let file_id = session.snapshot(|s| s.find_source(source)).await?;
            session.delete_source(&file_id).await?;
        }
        ScriptAction::ResyncSource { source } => {
            let file_id = session.snapshot(|s| s.find_source(source)).await?;
            session.resync_source(&file_id).await?;
        }
        ScriptAction::ConnectIntegration { integration } => {
            let id = session.snapshot(|s| s.find_integration(integration)).await?;
            session.connect_integration(&id).await?;
        }
        ScriptAction::SetAutoLearn {
            integration,
            enabled,
        } => {
            let id = session.snapshot(|s| s.find_integration(integration)).await?;
            session.set_auto_learn(&id, *enabled).await?;
        }
        ScriptAction::WaitForSync => session.wait_idle().await,
        ScriptAction::Sleep { ms } => tokio::time::sleep(Duration::from_millis(*ms)).await,
    }
    Ok(())
}
