//! Flat registry of knowledge sources, most recent first.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use kbase_core::error::AppError;
use kbase_core::types::{FileId, FolderId, SourceFilter};
use kbase_entity::file::{FileItem, NewSource, SyncStatus};

use super::progress::{SyncProgress, Tick};

/// Source counters shown above the source grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// All sources.
    pub total: usize,
    /// Sources ready to answer questions.
    pub synced: usize,
    /// Sources still processing.
    pub syncing: usize,
    /// Sources that failed processing.
    pub error: usize,
}

/// Owns every knowledge source of a session.
#[derive(Debug, Clone, Default)]
pub struct FileRegistry {
    /// Sources, newest at the front.
    items: VecDeque<FileItem>,
}

impl FileRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from existing sources, keeping their order.
    pub fn from_items(items: impl IntoIterator<Item = FileItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// Adds a new source at the front with status `Syncing` and progress 0.
    pub fn add(&mut self, source: NewSource, folder_id: Option<FolderId>) -> FileItem {
        let item = FileItem::syncing(FileId::generate(), source.name, source.kind, folder_id);
        self.items.push_front(item.clone());

        info!(
            file_id = %item.id,
            kind = %item.kind,
            folder_id = ?item.folder_id.as_ref().map(FolderId::as_str),
            "Source added"
        );

        item
    }

    /// Removes exactly one source.
    pub fn delete(&mut self, file_id: &FileId) -> Result<FileItem, AppError> {
        let index = self.position(file_id)?;
        let removed = self
            .items
            .remove(index)
            .ok_or_else(|| AppError::internal("Source index out of bounds"))?;

        info!(file_id = %file_id, name = %removed.name, "Source deleted");

        Ok(removed)
    }

    /// Puts a source back into processing: status `Syncing`, progress 0.
    pub fn resync(&mut self, file_id: &FileId) -> Result<FileItem, AppError> {
        let index = self.position(file_id)?;
        let item = &mut self.items[index];
        item.status = SyncStatus::Syncing;
        item.progress = Some(0);

        info!(file_id = %file_id, "Source resync requested");

        Ok(item.clone())
    }

    /// Applies one progress tick to the source with this id.
    ///
    /// Returns `None` when the source is gone or no longer syncing, which
    /// tells the driver to stop.
    pub fn apply_tick(&mut self, file_id: &FileId, step: u32) -> Option<Tick> {
        let item = self.items.iter_mut().find(|item| &item.id == file_id)?;
        if item.status.is_terminal() {
            return None;
        }

        let tick = SyncProgress::resume(item.progress.unwrap_or(0), step).tick();
        item.progress = Some(tick.progress);
        item.status = tick.status;

        debug!(
            file_id = %file_id,
            progress = tick.progress,
            status = %tick.status,
            "Source progress tick"
        );

        Some(tick)
    }

    /// Removes every source filed directly under `folder_id`.
    ///
    /// Exact match only: sources in descendant folders are left in place.
    pub fn remove_in_folder(&mut self, folder_id: &FolderId) -> Vec<FileItem> {
        let (removed, kept): (Vec<FileItem>, Vec<FileItem>) =
            self.items.drain(..).partition(|item| item.is_in(folder_id));
        self.items = kept.into();
        removed
    }

    /// Sources passing the folder and search filter, in registry order.
    pub fn filter(&self, filter: &SourceFilter) -> Vec<FileItem> {
        self.items
            .iter()
            .filter(|item| filter.matches(item.folder_id.as_ref(), &item.name))
            .cloned()
            .collect()
    }

    /// Looks up a source by id.
    pub fn get(&self, file_id: &FileId) -> Option<&FileItem> {
        self.items.iter().find(|item| &item.id == file_id)
    }

    /// All sources, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &FileItem> {
        self.items.iter()
    }

    /// Number of sources.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counts sources by status.
    pub fn stats(&self) -> RegistryStats {
        let mut stats = RegistryStats {
            total: self.items.len(),
            ..Default::default()
        };
        for item in &self.items {
            match item.status {
                SyncStatus::Synced => stats.synced += 1,
                SyncStatus::Syncing => stats.syncing += 1,
                SyncStatus::Error => stats.error += 1,
            }
        }
        stats
    }

    fn position(&self, file_id: &FileId) -> Result<usize, AppError> {
        self.items
            .iter()
            .position(|item| &item.id == file_id)
            .ok_or_else(|| AppError::not_found(format!("Source '{file_id}' not found")))
    }
}
