//! External integrations and their connection lifecycle.

pub mod catalog;

pub use catalog::{IntegrationCatalog, IntegrationStats};
