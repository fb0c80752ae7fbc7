//! Knowledge base domain events.

use serde::{Deserialize, Serialize};

use crate::types::{FileId, FolderId, IntegrationId};

/// Events related to folder and source operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KnowledgeEvent {
    /// A folder was created.
    FolderCreated {
        /// The new folder ID.
        folder_id: FolderId,
        /// The parent folder (None for root level).
        parent_id: Option<FolderId>,
        /// The folder name.
        name: String,
    },
    /// A folder and its subtree were deleted.
    FolderDeleted {
        /// The folder the delete was requested for.
        folder_id: FolderId,
        /// Every folder removed, including descendants.
        removed_folders: Vec<FolderId>,
        /// Sources removed by the cascade.
        removed_sources: Vec<FileId>,
    },
    /// A source was added and is being processed.
    SourceAdded {
        /// The source ID.
        file_id: FileId,
        /// Display name.
        name: String,
        /// Folder the source was filed under.
        folder_id: Option<FolderId>,
    },
    /// A source was removed.
    SourceDeleted {
        /// The source ID.
        file_id: FileId,
        /// Display name (for messages after removal).
        name: String,
    },
    /// A source was sent back through processing.
    SourceResyncing {
        /// The source ID.
        file_id: FileId,
    },
    /// A source finished processing.
    SourceSynced {
        /// The source ID.
        file_id: FileId,
    },
    /// An integration started connecting.
    IntegrationConnecting {
        /// The integration ID.
        integration_id: IntegrationId,
    },
    /// An integration finished connecting and is active.
    IntegrationConnected {
        /// The integration ID.
        integration_id: IntegrationId,
    },
    /// Auto-learn was switched on or off for a connected integration.
    AutoLearnChanged {
        /// The integration ID.
        integration_id: IntegrationId,
        /// Display name.
        name: String,
        /// The new setting.
        enabled: bool,
    },
}

impl KnowledgeEvent {
    /// Short title, matching the dashboard toast headline.
    pub fn title(&self) -> &'static str {
        match self {
            Self::FolderCreated { .. } => "Folder created",
            Self::FolderDeleted { .. } => "Folder deleted",
            Self::SourceAdded { .. } => "Source added",
            Self::SourceDeleted { .. } => "Source deleted",
            Self::SourceResyncing { .. } => "Resyncing",
            Self::SourceSynced { .. } => "Source synced",
            Self::IntegrationConnecting { .. } => "Connecting...",
            Self::IntegrationConnected { .. } => "Connected!",
            Self::AutoLearnChanged { enabled: true, .. } => "Auto-learn enabled",
            Self::AutoLearnChanged { enabled: false, .. } => "Auto-learn disabled",
        }
    }

    /// One-line description, matching the dashboard toast body.
    pub fn description(&self) -> String {
        match self {
            Self::FolderCreated { name, .. } => {
                format!("{name} has been added to your knowledge base")
            }
            Self::FolderDeleted { .. } => "The folder and its contents have been removed".to_string(),
            Self::SourceAdded { name, .. } => format!("{name} is being processed"),
            Self::SourceDeleted { .. } => {
                "The source has been removed from your knowledge base".to_string()
            }
            Self::SourceResyncing { .. } => "The source is being reprocessed".to_string(),
            Self::SourceSynced { file_id } => format!("{file_id} is ready to answer questions"),
            Self::IntegrationConnecting { .. } => "Setting up integration".to_string(),
            Self::IntegrationConnected { .. } => "Integration is now active".to_string(),
            Self::AutoLearnChanged { name, enabled, .. } => format!(
                "{name} will {} automatically sync new content",
                if *enabled { "now" } else { "no longer" }
            ),
        }
    }
}
