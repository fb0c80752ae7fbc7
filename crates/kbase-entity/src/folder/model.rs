//! Folder entity model.

use serde::{Deserialize, Serialize};

use kbase_core::types::FolderId;

/// A folder in the knowledge base, with its nested children.
///
/// This is the snapshot shape handed to presentation code. The owning
/// hierarchy keeps folders in an indexed arena and rebuilds nodes on
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderNode {
    /// Folder ID.
    pub id: FolderId,
    /// Display name (non-empty, trimmed).
    pub name: String,
    /// Child folders in insertion order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FolderNode>,
    /// Static file count shown next to the folder name.
    ///
    /// Display hint only: it is set when the folder is created or seeded
    /// and is not recomputed when sources are added or removed.
    pub file_count: u64,
}

impl FolderNode {
    /// Create a leaf folder node.
    pub fn leaf(id: FolderId, name: impl Into<String>, file_count: u64) -> Self {
        Self {
            id,
            name: name.into(),
            children: Vec::new(),
            file_count,
        }
    }

    /// Whether this folder has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of folders in this subtree, including this one.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(FolderNode::subtree_len).sum::<usize>()
    }
}

/// One entry of the flattened folder list used by parent-folder pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderOption {
    /// Folder ID.
    pub id: FolderId,
    /// Ancestor names and the folder name joined with `" / "`.
    pub label: String,
}
