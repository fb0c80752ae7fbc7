//! Simulated processing for the knowledge base.
//!
//! This crate provides:
//! - A progress driver that runs one cancellable timer task per source
//! - A connector that completes integration connections after a delay
//! - A session that shares a store between callers and the drivers and
//!   publishes domain events for every mutation
//! - A script runner that replays JSON action lists against a session

pub mod connector;
pub mod driver;
pub mod script;
pub mod session;

pub use connector::IntegrationConnector;
pub use driver::{DriverExit, ProgressDriver, SharedStore};
pub use script::{ScriptAction, ScriptFailure, ScriptReport, parse_script, run_script};
pub use session::KnowledgeSession;
