//! Folder hierarchy management.

pub mod hierarchy;

pub use hierarchy::FolderHierarchy;
