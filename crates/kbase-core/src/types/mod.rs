//! Core type definitions used across the kbase workspace.

pub mod filter;
pub mod id;

pub use filter::SourceFilter;
pub use id::*;
