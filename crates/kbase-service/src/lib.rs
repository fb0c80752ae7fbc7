//! # kbase-service
//!
//! Business logic for the knowledge base. The [`KnowledgeStore`] owns the
//! folder hierarchy, the source registry, and the integrations of one
//! session and is the only place where rules spanning them are applied.
//!
//! Everything in this crate is synchronous and single-owner; sharing and
//! timers are layered on top by `kbase-worker`.

pub mod file;
pub mod folder;
pub mod integration;
pub mod seed;
pub mod store;
pub mod studio;

pub use file::{FileRegistry, RegistryStats, SourceInput, SourceIntake, SyncProgress, Tick};
pub use folder::FolderHierarchy;
pub use integration::{IntegrationCatalog, IntegrationStats};
pub use store::{FolderDeletion, KnowledgeStore};
pub use studio::{EmbedTarget, render_snippet};
