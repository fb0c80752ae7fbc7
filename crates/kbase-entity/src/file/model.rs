//! Knowledge source entity model.

use serde::{Deserialize, Serialize};

use kbase_core::types::{FileId, FolderId};

use super::status::{SourceKind, SyncStatus};

/// A knowledge source: an uploaded file, a URL, or a pasted text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileItem {
    /// Unique source identifier.
    pub id: FileId,
    /// Display name (file name, URL host, or text title).
    pub name: String,
    /// Where the source came from.
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Processing state.
    pub status: SyncStatus,
    /// Progress in percent while syncing. Not clamped, may exceed 100 on
    /// the final tick.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u32>,
    /// The folder holding this source (None = unfiled).
    pub folder_id: Option<FolderId>,
}

impl FileItem {
    /// Build a source that has just entered processing.
    pub fn syncing(
        id: FileId,
        name: impl Into<String>,
        kind: SourceKind,
        folder_id: Option<FolderId>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            status: SyncStatus::Syncing,
            progress: Some(0),
            folder_id,
        }
    }

    /// Progress for display, clamped to `0..=100`.
    ///
    /// Sources that are not syncing report 100 the way the source card
    /// treats a missing progress value.
    pub fn display_progress(&self) -> u32 {
        match self.status {
            SyncStatus::Syncing => self.progress.unwrap_or(0).min(100),
            _ => 100,
        }
    }

    /// Whether the source sits directly in the given folder.
    pub fn is_in(&self, folder_id: &FolderId) -> bool {
        self.folder_id.as_ref() == Some(folder_id)
    }
}

/// Input for a new source after intake validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSource {
    /// Where the source came from.
    #[serde(rename = "type")]
    pub kind: SourceKind,
    /// Raw content: file name, URL, or text body.
    pub content: String,
    /// Display name derived from the content.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_progress_clamps() {
        let mut item = FileItem::syncing(FileId::new("7"), "doc.pdf", SourceKind::File, None);
        item.progress = Some(105);
        assert_eq!(item.display_progress(), 100);
        item.progress = Some(40);
        assert_eq!(item.display_progress(), 40);
        item.status = SyncStatus::Synced;
        assert_eq!(item.display_progress(), 100);
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let item = FileItem::syncing(FileId::new("7"), "Pricing FAQ", SourceKind::Text, None);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["status"], "syncing");
        assert_eq!(json["progress"], 0);
    }
}
