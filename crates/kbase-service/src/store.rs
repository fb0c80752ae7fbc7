//! The knowledge base session state.

use serde::{Deserialize, Serialize};
use tracing::info;

use kbase_core::config::KnowledgeConfig;
use kbase_core::error::AppError;
use kbase_core::traits::Service;
use kbase_core::types::{FileId, FolderId, IntegrationId, SourceFilter};
use kbase_entity::file::{FileItem, NewSource};
use kbase_entity::folder::{FolderNode, FolderOption};
use kbase_entity::integration::Integration;

use crate::file::{FileRegistry, RegistryStats, SourceInput, SourceIntake, Tick};
use crate::folder::FolderHierarchy;
use crate::integration::{IntegrationCatalog, IntegrationStats};
use crate::seed;

/// Outcome of deleting a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderDeletion {
    /// The folder the delete was requested for.
    pub folder_id: FolderId,
    /// Every removed folder, requested folder first, then descendants.
    pub removed_folders: Vec<FolderId>,
    /// Sources removed by the cascade.
    pub removed_sources: Vec<FileItem>,
    /// Whether the folder selection was reset to "All Files".
    pub selection_cleared: bool,
}

/// Folders, sources, selection, and search text of one dashboard session.
///
/// Cross-entity rules live here and nowhere else:
///
/// - deleting a folder removes its whole subtree, but only sources filed
///   directly under the deleted folder are cascaded; sources in its
///   descendant folders stay in the registry with a dangling folder id
/// - the selection is cleared only when the selected folder is the one
///   named in the delete, not when it is a descendant of it
#[derive(Debug, Clone, Default)]
pub struct KnowledgeStore {
    folders: FolderHierarchy,
    sources: FileRegistry,
    integrations: IntegrationCatalog,
    intake: SourceIntake,
    selected_folder: Option<FolderId>,
    search: String,
}

impl Service for KnowledgeStore {}

impl KnowledgeStore {
    /// Creates an empty store.
    pub fn new(config: KnowledgeConfig) -> Self {
        Self {
            intake: SourceIntake::new(config),
            ..Default::default()
        }
    }

    /// Creates a store holding the demo folders, sources, and integrations.
    pub fn seeded(config: KnowledgeConfig) -> Result<Self, AppError> {
        let mut store = Self::with_content(config, &seed::demo_folders(), seed::demo_sources())?;
        store.integrations = IntegrationCatalog::from_items(seed::demo_integrations());
        Ok(store)
    }

    /// Creates a store from the configuration, seeding it if enabled.
    pub fn from_config(config: KnowledgeConfig) -> Result<Self, AppError> {
        if config.seed_demo_data {
            Self::seeded(config)
        } else {
            Ok(Self::new(config))
        }
    }

    /// Creates a store from existing folders and sources.
    pub fn with_content(
        config: KnowledgeConfig,
        folders: &[FolderNode],
        sources: Vec<FileItem>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            folders: FolderHierarchy::from_forest(folders)?,
            sources: FileRegistry::from_items(sources),
            integrations: IntegrationCatalog::default(),
            intake: SourceIntake::new(config),
            selected_folder: None,
            search: String::new(),
        })
    }

    // ── Folders ─────────────────────────────────────────────────────

    /// Creates a folder at the root or under an existing parent.
    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<&FolderId>,
    ) -> Result<FolderNode, AppError> {
        self.folders.create(name, parent_id)
    }

    /// Deletes a folder with its subtree and cascades its direct sources.
    pub fn delete_folder(&mut self, folder_id: &FolderId) -> Result<FolderDeletion, AppError> {
        let removed_folders = self.folders.delete(folder_id)?;
        let removed_sources = self.sources.remove_in_folder(folder_id);

        let selection_cleared = self.selected_folder.as_ref() == Some(folder_id);
        if selection_cleared {
            self.selected_folder = None;
        }

        info!(
            folder_id = %folder_id,
            removed_folders = removed_folders.len(),
            removed_sources = removed_sources.len(),
            selection_cleared,
            "Folder deleted"
        );

        Ok(FolderDeletion {
            folder_id: folder_id.clone(),
            removed_folders,
            removed_sources,
            selection_cleared,
        })
    }

    /// Nested snapshot of the folder forest.
    pub fn forest(&self) -> Vec<FolderNode> {
        self.folders.forest()
    }

    /// Flattened folder list for parent pickers.
    pub fn folder_options(&self) -> Vec<FolderOption> {
        self.folders.flatten()
    }

    /// Read access to the folder hierarchy.
    pub fn folders(&self) -> &FolderHierarchy {
        &self.folders
    }

    /// Resolves a folder by id or by its full label (`Product Documentation / API Reference`).
    ///
    /// Labels compare case-insensitively.
    pub fn find_folder(&self, reference: &str) -> Result<FolderId, AppError> {
        let reference = reference.trim();
        let by_id = FolderId::new(reference);
        if self.folders.contains(&by_id) {
            return Ok(by_id);
        }
        self.folders
            .flatten()
            .into_iter()
            .find(|option| option.label.eq_ignore_ascii_case(reference))
            .map(|option| option.id)
            .ok_or_else(|| AppError::not_found(format!("Folder '{reference}' not found")))
    }

    // ── Sources ─────────────────────────────────────────────────────

    /// Validates raw input and files the new source under the selected
    /// folder.
    pub fn add_source(&mut self, input: SourceInput) -> Result<FileItem, AppError> {
        let source = self.intake.prepare(input)?;
        let folder_id = self.selected_folder.clone();
        self.add_source_to(source, folder_id)
    }

    /// Adds an already validated source to an explicit folder.
    pub fn add_source_to(
        &mut self,
        source: NewSource,
        folder_id: Option<FolderId>,
    ) -> Result<FileItem, AppError> {
        if let Some(folder) = &folder_id {
            if !self.folders.contains(folder) {
                return Err(AppError::not_found(format!("Folder '{folder}' not found")));
            }
        }
        Ok(self.sources.add(source, folder_id))
    }

    /// Removes one source.
    pub fn delete_source(&mut self, file_id: &FileId) -> Result<FileItem, AppError> {
        self.sources.delete(file_id)
    }

    /// Sends a source back into processing.
    pub fn resync_source(&mut self, file_id: &FileId) -> Result<FileItem, AppError> {
        self.sources.resync(file_id)
    }

    /// Applies one progress tick to a syncing source.
    pub fn apply_tick(&mut self, file_id: &FileId, step: u32) -> Option<Tick> {
        self.sources.apply_tick(file_id, step)
    }

    /// Looks up a source.
    pub fn source(&self, file_id: &FileId) -> Option<&FileItem> {
        self.sources.get(file_id)
    }

    /// Resolves a source by id or by exact name. The newest source wins on
    /// duplicate names.
    pub fn find_source(&self, reference: &str) -> Result<FileId, AppError> {
        let reference = reference.trim();
        self.sources
            .iter()
            .find(|item| item.id.as_str() == reference)
            .or_else(|| self.sources.iter().find(|item| item.name == reference))
            .map(|item| item.id.clone())
            .ok_or_else(|| AppError::not_found(format!("Source '{reference}' not found")))
    }

    /// Read access to the source registry.
    pub fn sources(&self) -> &FileRegistry {
        &self.sources
    }

    /// Sources matching an explicit filter.
    pub fn filter(&self, filter: &SourceFilter) -> Vec<FileItem> {
        self.sources.filter(filter)
    }

    /// Sources matching the current selection and search text.
    pub fn visible_sources(&self) -> Vec<FileItem> {
        self.sources.filter(&self.current_filter())
    }

    /// Source counters.
    pub fn stats(&self) -> RegistryStats {
        self.sources.stats()
    }

    // ── Integrations ────────────────────────────────────────────────

    /// Moves a disconnected or failed integration to `Syncing`.
    pub fn connect_integration(&mut self, id: &IntegrationId) -> Result<Integration, AppError> {
        self.integrations.begin_connect(id)
    }

    /// Marks a pending connection as active. `None` if it is no longer pending.
    pub fn complete_connection(&mut self, id: &IntegrationId) -> Option<Integration> {
        self.integrations.finish_connect(id)
    }

    /// Switches auto-learn on a connected integration.
    pub fn set_auto_learn(
        &mut self,
        id: &IntegrationId,
        enabled: bool,
    ) -> Result<Integration, AppError> {
        self.integrations.set_auto_learn(id, enabled)
    }

    /// Resolves an integration by id or name.
    pub fn find_integration(&self, reference: &str) -> Result<IntegrationId, AppError> {
        self.integrations.find(reference)
    }

    /// Read access to the integrations.
    pub fn integrations(&self) -> &IntegrationCatalog {
        &self.integrations
    }

    /// Integration counters.
    pub fn integration_stats(&self) -> IntegrationStats {
        self.integrations.stats()
    }

    // ── View state ──────────────────────────────────────────────────

    /// Selects a folder, or "All Files" with `None`.
    pub fn select_folder(&mut self, folder_id: Option<FolderId>) -> Result<(), AppError> {
        if let Some(folder) = &folder_id {
            if !self.folders.contains(folder) {
                return Err(AppError::not_found(format!("Folder '{folder}' not found")));
            }
        }
        self.selected_folder = folder_id;
        Ok(())
    }

    /// The selected folder (None = "All Files").
    pub fn selected_folder(&self) -> Option<&FolderId> {
        self.selected_folder.as_ref()
    }

    /// Sets the free-text search.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    /// The free-text search.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Filter built from the current selection and search text.
    pub fn current_filter(&self) -> SourceFilter {
        SourceFilter::new(self.selected_folder.clone(), self.search.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbase_core::error::ErrorKind;
    use kbase_entity::file::SyncStatus;

    fn store() -> KnowledgeStore {
        KnowledgeStore::seeded(KnowledgeConfig::default()).unwrap()
    }

    fn text(title: &str) -> SourceInput {
        SourceInput::Text {
            title: title.to_string(),
            body: "body".to_string(),
        }
    }

    #[test]
    fn test_seeded_state() {
        let s = store();
        assert_eq!(s.forest().len(), 3);
        assert_eq!(s.folder_options().len(), 5);
        assert_eq!(
            s.stats(),
            RegistryStats { total: 6, synced: 4, syncing: 1, error: 1 }
        );
    }

    #[test]
    fn test_add_source_uses_selected_folder() {
        let mut s = store();
        s.select_folder(Some("2".into())).unwrap();
        let item = s.add_source(text("Refund policy")).unwrap();
        assert_eq!(item.folder_id.as_ref().map(FolderId::as_str), Some("2"));
        assert_eq!(item.status, SyncStatus::Syncing);
        assert_eq!(s.visible_sources()[0].id, item.id);
    }

    #[test]
    fn test_add_source_to_missing_folder() {
        let mut s = store();
        let source = NewSource {
            kind: kbase_entity::file::SourceKind::Text,
            content: "x".into(),
            name: "x".into(),
        };
        let err = s.add_source_to(source, Some("404".into())).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_invalid_url_leaves_registry_untouched() {
        let mut s = store();
        let err = s
            .add_source(SourceInput::Url {
                url: "example.com/help".into(),
            })
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::InvalidUrl);
        assert_eq!(s.sources().len(), 6);
    }

    #[test]
    fn test_delete_folder_cascades_exact_match() {
        let mut s = store();
        s.select_folder(Some("2".into())).unwrap();
        s.add_source(text("Pricing FAQ v2")).unwrap();

        let deletion = s.delete_folder(&"2".into()).unwrap();
        assert_eq!(deletion.removed_folders.len(), 1);
        assert_eq!(deletion.removed_sources.len(), 2);
        assert!(deletion.selection_cleared);
        assert!(s.selected_folder().is_none());
        assert!(s.filter(&SourceFilter::new(None, "pricing")).is_empty());
    }

    #[test]
    fn test_delete_parent_leaves_descendant_sources() {
        let mut s = store();
        s.select_folder(Some("1-1".into())).unwrap();

        let deletion = s.delete_folder(&"1".into()).unwrap();
        assert_eq!(deletion.removed_folders.len(), 3);
        // Sources in 1-1 and 1-2 are not cascaded, only those filed under "1".
        assert!(deletion.removed_sources.is_empty());
        assert_eq!(s.sources().len(), 6);
        // A selected descendant is not cleared either.
        assert!(!deletion.selection_cleared);
        assert_eq!(s.selected_folder().map(FolderId::as_str), Some("1-1"));
    }

    #[test]
    fn test_search_and_selection_filter() {
        let mut s = store();
        s.set_search("GUIDE");
        assert_eq!(s.visible_sources().len(), 1);
        s.select_folder(Some("3".into())).unwrap();
        assert!(s.visible_sources().is_empty());
        s.set_search("");
        assert_eq!(s.visible_sources().len(), 2);
        s.select_folder(None).unwrap();
        assert_eq!(s.visible_sources().len(), 6);
    }

    #[test]
    fn test_select_unknown_folder() {
        let mut s = store();
        assert_eq!(
            s.select_folder(Some("9".into())).unwrap_err().kind,
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_file_count_is_static() {
        let mut s = store();
        s.select_folder(Some("2".into())).unwrap();
        s.add_source(text("Shipping FAQ")).unwrap();
        let faqs = s.folders().get(&"2".into()).unwrap();
        assert_eq!(faqs.file_count, 8);
    }

    #[test]
    fn test_find_by_reference() {
        let s = store();
        assert_eq!(s.find_folder("1-2").unwrap().as_str(), "1-2");
        assert_eq!(
            s.find_folder("product documentation / api reference").unwrap().as_str(),
            "1-2"
        );
        assert_eq!(s.find_folder("Nope").unwrap_err().kind, ErrorKind::NotFound);

        assert_eq!(s.find_source("3").unwrap().as_str(), "3");
        assert_eq!(s.find_source("Pricing FAQ").unwrap().as_str(), "4");
        assert_eq!(s.find_source("pricing faq").unwrap_err().kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_from_config_without_seed() {
        let config = KnowledgeConfig {
            seed_demo_data: false,
            ..Default::default()
        };
        let s = KnowledgeStore::from_config(config).unwrap();
        assert!(s.forest().is_empty());
        assert!(s.sources().is_empty());
        assert!(s.integrations().is_empty());
    }

    #[test]
    fn test_seeded_integrations() {
        let mut s = store();
        assert_eq!(s.integrations().len(), 6);
        let id = s.find_integration("Zoho Desk").unwrap();
        s.connect_integration(&id).unwrap();
        assert_eq!(s.integration_stats().syncing, 2);
        assert!(s.complete_connection(&id).is_some());
        assert_eq!(s.integration_stats().connected, 3);
    }
}
