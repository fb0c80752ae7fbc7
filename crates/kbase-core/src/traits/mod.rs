//! Core traits defined in `kbase-core` and implemented by other crates.

pub mod service;

pub use service::Service;
