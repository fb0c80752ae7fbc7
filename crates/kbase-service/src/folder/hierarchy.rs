//! Folder hierarchy stored as an indexed arena.
//!
//! Folders live in one map keyed by id. Each record carries its parent id
//! and its ordered child ids, and an ordered root list holds the top level.
//! Inserts and subtree deletes touch only the affected entries;
//! [`FolderHierarchy::forest`] rebuilds the nested snapshot on request.

use std::collections::HashMap;

use tracing::info;

use kbase_core::error::AppError;
use kbase_core::types::FolderId;
use kbase_entity::folder::{FolderNode, FolderOption};

/// Separator placed between ancestor names in flattened labels.
pub const LABEL_SEPARATOR: &str = " / ";

/// One folder with its parent and child links.
#[derive(Debug, Clone)]
struct FolderRecord {
    name: String,
    file_count: u64,
    parent_id: Option<FolderId>,
    children: Vec<FolderId>,
}

/// Owns the folder forest of one knowledge base session.
#[derive(Debug, Clone, Default)]
pub struct FolderHierarchy {
    /// All folders by id.
    records: HashMap<FolderId, FolderRecord>,
    /// Root-level folders in insertion order.
    roots: Vec<FolderId>,
}

impl FolderHierarchy {
    /// Creates an empty hierarchy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hierarchy from a nested forest, keeping ids, names, file
    /// counts, and sibling order.
    pub fn from_forest(forest: &[FolderNode]) -> Result<Self, AppError> {
        let mut hierarchy = Self::new();
        for node in forest {
            hierarchy.insert_subtree(node, None)?;
        }
        Ok(hierarchy)
    }

    fn insert_subtree(
        &mut self,
        node: &FolderNode,
        parent_id: Option<&FolderId>,
    ) -> Result<(), AppError> {
        self.insert(node.id.clone(), &node.name, parent_id, node.file_count)?;
        for child in &node.children {
            self.insert_subtree(child, Some(&node.id))?;
        }
        Ok(())
    }

    /// Creates a folder with a freshly generated id.
    ///
    /// `parent_id = None` appends a root-level folder; otherwise the folder
    /// is appended to the end of the parent's children.
    pub fn create(
        &mut self,
        name: &str,
        parent_id: Option<&FolderId>,
    ) -> Result<FolderNode, AppError> {
        let node = self.insert(FolderId::generate(), name, parent_id, 0)?;

        info!(
            folder_id = %node.id,
            parent_id = ?parent_id.map(FolderId::as_str),
            name = %node.name,
            "Folder created"
        );

        Ok(node)
    }

    /// Inserts a folder with a caller-chosen id.
    pub fn insert(
        &mut self,
        id: FolderId,
        name: &str,
        parent_id: Option<&FolderId>,
        file_count: u64,
    ) -> Result<FolderNode, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name cannot be empty"));
        }
        if self.records.contains_key(&id) {
            return Err(AppError::validation(format!(
                "A folder with id '{id}' already exists"
            )));
        }

        match parent_id {
            Some(parent) => {
                let parent_record = self.records.get_mut(parent).ok_or_else(|| {
                    AppError::parent_not_found(format!("Parent folder '{parent}' not found"))
                })?;
                parent_record.children.push(id.clone());
            }
            None => self.roots.push(id.clone()),
        }

        self.records.insert(
            id.clone(),
            FolderRecord {
                name: name.to_string(),
                file_count,
                parent_id: parent_id.cloned(),
                children: Vec::new(),
            },
        );

        Ok(FolderNode::leaf(id, name, file_count))
    }

    /// Deletes a folder together with its whole subtree.
    ///
    /// Returns every removed id, the requested folder first followed by its
    /// descendants in pre-order.
    pub fn delete(&mut self, folder_id: &FolderId) -> Result<Vec<FolderId>, AppError> {
        let parent_id = self
            .records
            .get(folder_id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{folder_id}' not found")))?
            .parent_id
            .clone();

        let removed = self.subtree_ids(folder_id);

        let siblings = match &parent_id {
            Some(parent) => match self.records.get_mut(parent) {
                Some(record) => &mut record.children,
                None => {
                    return Err(AppError::internal(format!(
                        "Folder '{folder_id}' references missing parent '{parent}'"
                    )));
                }
            },
            None => &mut self.roots,
        };
        siblings.retain(|id| id != folder_id);

        for id in &removed {
            self.records.remove(id);
        }

        info!(
            folder_id = %folder_id,
            removed = removed.len(),
            "Folder subtree deleted"
        );

        Ok(removed)
    }

    /// Ids of a folder and all its descendants in pre-order. Empty if the
    /// folder does not exist.
    pub fn subtree_ids(&self, folder_id: &FolderId) -> Vec<FolderId> {
        let mut out = Vec::new();
        if !self.records.contains_key(folder_id) {
            return out;
        }
        let mut stack = vec![folder_id.clone()];
        while let Some(id) = stack.pop() {
            if let Some(record) = self.records.get(&id) {
                stack.extend(record.children.iter().rev().cloned());
            }
            out.push(id);
        }
        out
    }

    /// The parent of a folder, if the folder exists and is not a root.
    pub fn parent_of(&self, folder_id: &FolderId) -> Option<&FolderId> {
        self.records.get(folder_id)?.parent_id.as_ref()
    }

    /// Whether a folder with this id exists.
    pub fn contains(&self, folder_id: &FolderId) -> bool {
        self.records.contains_key(folder_id)
    }

    /// Total number of folders.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the hierarchy has no folders.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Snapshot of one folder and its subtree.
    pub fn get(&self, folder_id: &FolderId) -> Option<FolderNode> {
        self.records.get(folder_id)?;
        Some(self.build_node(folder_id))
    }

    /// Nested snapshot of the entire forest.
    pub fn forest(&self) -> Vec<FolderNode> {
        self.roots.iter().map(|id| self.build_node(id)).collect()
    }

    fn build_node(&self, folder_id: &FolderId) -> FolderNode {
        let record = &self.records[folder_id];
        FolderNode {
            id: folder_id.clone(),
            name: record.name.clone(),
            children: record
                .children
                .iter()
                .map(|child| self.build_node(child))
                .collect(),
            file_count: record.file_count,
        }
    }

    /// Flattens the forest for a parent-folder picker.
    ///
    /// Pre-order, depth-first. Each label is the chain of ancestor names and
    /// the folder's own name joined with [`LABEL_SEPARATOR`].
    pub fn flatten(&self) -> Vec<FolderOption> {
        let mut out = Vec::with_capacity(self.records.len());
        for root in &self.roots {
            self.flatten_into(root, "", &mut out);
        }
        out
    }

    fn flatten_into(&self, folder_id: &FolderId, prefix: &str, out: &mut Vec<FolderOption>) {
        let record = &self.records[folder_id];
        let label = format!("{prefix}{}", record.name);
        let child_prefix = format!("{label}{LABEL_SEPARATOR}");
        out.push(FolderOption {
            id: folder_id.clone(),
            label,
        });
        for child in &record.children {
            self.flatten_into(child, &child_prefix, out);
        }
    }

    /// Full label of a single folder (`"Parent / Child"`).
    pub fn label(&self, folder_id: &FolderId) -> Option<String> {
        let mut names = vec![self.records.get(folder_id)?.name.as_str()];
        let mut current = self.parent_of(folder_id);
        while let Some(id) = current {
            names.push(self.records[id].name.as_str());
            current = self.parent_of(id);
        }
        names.reverse();
        Some(names.join(LABEL_SEPARATOR))
    }
}
