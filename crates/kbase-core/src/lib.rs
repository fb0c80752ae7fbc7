//! # kbase-core
//!
//! Core crate for the SupportAI knowledge base. Contains configuration
//! schemas, typed identifiers, domain events, filter types, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other kbase crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
