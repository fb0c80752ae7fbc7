//! Filter applied to the source listing.

use serde::{Deserialize, Serialize};

use super::id::FolderId;

/// Folder and free-text filter for knowledge sources.
///
/// `folder_id = None` means "All Files". The folder match is exact: sources
/// in child folders of the selected folder are not included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFilter {
    /// Folder to restrict to, if any.
    pub folder_id: Option<FolderId>,
    /// Case-insensitive substring matched against the source name.
    pub search: String,
}

impl SourceFilter {
    /// Create a new filter.
    pub fn new(folder_id: Option<FolderId>, search: impl Into<String>) -> Self {
        Self {
            folder_id,
            search: search.into(),
        }
    }

    /// Check whether a source with the given folder and name passes.
    pub fn matches(&self, folder_id: Option<&FolderId>, name: &str) -> bool {
        let folder_ok = match &self.folder_id {
            None => true,
            Some(wanted) => folder_id == Some(wanted),
        };
        folder_ok && name.to_lowercase().contains(&self.search.to_lowercase())
    }
}
