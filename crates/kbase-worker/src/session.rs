//! A knowledge base session: shared store, timers and events.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast};

use kbase_core::config::{AppConfig, SyncConfig};
use kbase_core::error::AppError;
use kbase_core::events::{DomainEvent, KnowledgeEvent};
use kbase_core::traits::Service;
use kbase_core::types::{FileId, FolderId, IntegrationId};
use kbase_entity::file::{FileItem, NewSource, SyncStatus};
use kbase_entity::folder::{FolderNode, FolderOption};
use kbase_entity::integration::Integration;
use kbase_service::{FolderDeletion, IntegrationStats, KnowledgeStore, RegistryStats, SourceInput};

use crate::connector::IntegrationConnector;
use crate::driver::{ProgressDriver, SharedStore};

/// Owns one [`KnowledgeStore`] and the timers that advance its sources and
/// integrations.
///
/// Every mutation that starts or stops processing goes through here so the
/// driver registry always matches the registry contents. Driver starts
/// happen while the store lock is held.
#[derive(Debug, Clone)]
pub struct KnowledgeSession {
    store: SharedStore,
    driver: ProgressDriver,
    connector: IntegrationConnector,
    events: broadcast::Sender<DomainEvent>,
    sync: SyncConfig,
}

impl Service for KnowledgeSession {}

impl KnowledgeSession {
    /// Create a session over an existing store.
    ///
    /// Fails when a sync profile could never bring a source to completion.
    pub fn new(store: KnowledgeStore, sync: SyncConfig) -> Result<Self, AppError> {
        sync.validate()?;
        let (events, _) = broadcast::channel(sync.event_buffer);
        let store = Arc::new(Mutex::new(store));
        let driver = ProgressDriver::new(Arc::clone(&store), events.clone());
        let connector = IntegrationConnector::new(Arc::clone(&store), events.clone());
        Ok(Self {
            store,
            driver,
            connector,
            events,
            sync,
        })
    }

    /// Create a session from the application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let store = KnowledgeStore::from_config(config.knowledge.clone())?;
        Self::new(store, config.sync.clone())
    }

    /// Subscribe to the session's domain events.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.events.subscribe()
    }

    /// The shared store.
    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    /// The progress driver.
    pub fn driver(&self) -> &ProgressDriver {
        &self.driver
    }

    /// Run a read-only closure against the store.
    pub async fn snapshot<T>(&self, f: impl FnOnce(&KnowledgeStore) -> T) -> T {
        let store = self.store.lock().await;
        f(&store)
    }

    // ── Folders ─────────────────────────────────────────────────────

    /// Create a folder at the root or under `parent_id`.
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&FolderId>,
    ) -> Result<FolderNode, AppError> {
        let folder = self.store.lock().await.create_folder(name, parent_id)?;
        self.publish(KnowledgeEvent::FolderCreated {
            folder_id: folder.id.clone(),
            parent_id: parent_id.cloned(),
            name: folder.name.clone(),
        });
        Ok(folder)
    }

    /// Delete a folder subtree and stop the drivers of cascaded sources.
    pub async fn delete_folder(&self, folder_id: &FolderId) -> Result<FolderDeletion, AppError> {
        let deletion = {
            let mut store = self.store.lock().await;
            let deletion = store.delete_folder(folder_id)?;
            for source in &deletion.removed_sources {
                self.driver.cancel(&source.id);
            }
            deletion
        };

        self.publish(KnowledgeEvent::FolderDeleted {
            folder_id: deletion.folder_id.clone(),
            removed_folders: deletion.removed_folders.clone(),
            removed_sources: deletion
                .removed_sources
                .iter()
                .map(|source| source.id.clone())
                .collect(),
        });
        Ok(deletion)
    }

    // ── Sources ─────────────────────────────────────────────────────

    /// Validate raw input, file it under the selected folder and start
    /// processing it.
    pub async fn add_source(&self, input: SourceInput) -> Result<FileItem, AppError> {
        let item = {
            let mut store = self.store.lock().await;
            let item = store.add_source(input)?;
            self.driver.start(item.id.clone(), self.sync.upload)?;
            item
        };
        self.publish_added(&item);
        Ok(item)
    }

    /// Add a validated source to an explicit folder and start processing it.
    pub async fn add_source_to(
        &self,
        source: NewSource,
        folder_id: Option<FolderId>,
    ) -> Result<FileItem, AppError> {
        let item = {
            let mut store = self.store.lock().await;
            let item = store.add_source_to(source, folder_id)?;
            self.driver.start(item.id.clone(), self.sync.upload)?;
            item
        };
        self.publish_added(&item);
        Ok(item)
    }

    /// Remove a source and stop its driver.
    pub async fn delete_source(&self, file_id: &FileId) -> Result<FileItem, AppError> {
        let removed = {
            let mut store = self.store.lock().await;
            let removed = store.delete_source(file_id)?;
            self.driver.cancel(file_id);
            removed
        };
        self.publish(KnowledgeEvent::SourceDeleted {
            file_id: removed.id.clone(),
            name: removed.name.clone(),
        });
        Ok(removed)
    }

    /// Restart processing of a source, replacing any running driver.
    pub async fn resync_source(&self, file_id: &FileId) -> Result<FileItem, AppError> {
        let item = {
            let mut store = self.store.lock().await;
            let item = store.resync_source(file_id)?;
            self.driver.start(item.id.clone(), self.sync.resync)?;
            item
        };
        self.publish(KnowledgeEvent::SourceResyncing {
            file_id: item.id.clone(),
        });
        Ok(item)
    }

    /// Start drivers for sources that are syncing but have none, continuing
    /// from their stored progress. Returns the number of drivers started.
    pub async fn resume_pending(&self) -> Result<usize, AppError> {
        let store = self.store.lock().await;
        let pending: Vec<FileId> = store
            .sources()
            .iter()
            .filter(|item| item.status == SyncStatus::Syncing)
            .filter(|item| !self.driver.is_running(&item.id))
            .map(|item| item.id.clone())
            .collect();

        for file_id in &pending {
            self.driver.start(file_id.clone(), self.sync.upload)?;
        }

        if !pending.is_empty() {
            tracing::info!("Resumed {} pending source syncs", pending.len());
        }
        Ok(pending.len())
    }

    // ── Integrations ────────────────────────────────────────────────

    /// Start connecting an integration; it becomes active after the
    /// configured delay.
    pub async fn connect_integration(&self, id: &IntegrationId) -> Result<Integration, AppError> {
        let item = {
            let mut store = self.store.lock().await;
            let item = store.connect_integration(id)?;
            self.connector.start(item.id.clone(), self.sync.connect_delay());
            item
        };
        self.publish(KnowledgeEvent::IntegrationConnecting {
            integration_id: item.id.clone(),
        });
        Ok(item)
    }

    /// Switch auto-learn on a connected integration.
    pub async fn set_auto_learn(
        &self,
        id: &IntegrationId,
        enabled: bool,
    ) -> Result<Integration, AppError> {
        let item = self.store.lock().await.set_auto_learn(id, enabled)?;
        self.publish(KnowledgeEvent::AutoLearnChanged {
            integration_id: item.id.clone(),
            name: item.name.clone(),
            enabled,
        });
        Ok(item)
    }

    /// Integrations in display order.
    pub async fn integrations(&self) -> Vec<Integration> {
        self.snapshot(|s| s.integrations().to_vec()).await
    }

    /// Integration counters.
    pub async fn integration_stats(&self) -> IntegrationStats {
        self.snapshot(KnowledgeStore::integration_stats).await
    }

    // ── View state ──────────────────────────────────────────────────

    /// Select a folder, or "All Files" with `None`.
    pub async fn select_folder(&self, folder_id: Option<FolderId>) -> Result<(), AppError> {
        self.store.lock().await.select_folder(folder_id)
    }

    /// Set the free-text search.
    pub async fn set_search(&self, text: impl Into<String>) {
        self.store.lock().await.set_search(text);
    }

    /// Sources matching the current selection and search.
    pub async fn visible_sources(&self) -> Vec<FileItem> {
        self.snapshot(KnowledgeStore::visible_sources).await
    }

    /// Source counters.
    pub async fn stats(&self) -> RegistryStats {
        self.snapshot(KnowledgeStore::stats).await
    }

    /// Nested folder forest.
    pub async fn forest(&self) -> Vec<FolderNode> {
        self.snapshot(KnowledgeStore::forest).await
    }

    /// Flattened folder list.
    pub async fn folder_options(&self) -> Vec<FolderOption> {
        self.snapshot(KnowledgeStore::folder_options).await
    }

    /// Wait until every running driver and pending connection has finished.
    pub async fn wait_idle(&self) {
        self.driver.wait_idle().await;
        self.connector.wait_idle().await;
    }

    /// Stop every driver and pending connection.
    pub fn shutdown(&self) {
        self.driver.shutdown();
        self.connector.shutdown();
    }

    fn publish_added(&self, item: &FileItem) {
        self.publish(KnowledgeEvent::SourceAdded {
            file_id: item.id.clone(),
            name: item.name.clone(),
            folder_id: item.folder_id.clone(),
        });
    }

    fn publish(&self, event: KnowledgeEvent) {
        // No subscribers is fine
        let _ = self.events.send(DomainEvent::new(event));
    }
}
