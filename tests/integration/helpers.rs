//! Shared test helpers for integration tests.

#![allow(dead_code)]

use kbase_core::config::{KnowledgeConfig, SyncConfig};
use kbase_core::types::{FileId, FolderId};
use kbase_entity::file::SyncStatus;
use kbase_service::{KnowledgeStore, SourceInput};
use kbase_worker::KnowledgeSession;

/// Store with the demo folders and sources
pub fn seeded_store() -> KnowledgeStore {
    KnowledgeStore::seeded(KnowledgeConfig::default()).expect("Failed to seed store")
}

/// Store with no folders or sources
pub fn empty_store() -> KnowledgeStore {
    KnowledgeStore::new(KnowledgeConfig::default())
}

/// Session over the seeded store with the default sync profiles
pub fn seeded_session() -> KnowledgeSession {
    KnowledgeSession::new(seeded_store(), SyncConfig::default()).expect("Default sync config is valid")
}

/// Pasted-text source input
pub fn text(title: &str) -> SourceInput {
    SourceInput::Text {
        title: title.to_string(),
        body: format!("{title} body"),
    }
}

/// Folder ids in flattened (pre-order) order
pub fn flattened_ids(store: &KnowledgeStore) -> Vec<FolderId> {
    store.folder_options().into_iter().map(|o| o.id).collect()
}

/// Status and stored progress of a source in a session
pub async fn progress_of(session: &KnowledgeSession, id: &FileId) -> (SyncStatus, Option<u32>) {
    session
        .snapshot(|s| s.source(id).map(|item| (item.status, item.progress)))
        .await
        .expect("Source not found")
}
