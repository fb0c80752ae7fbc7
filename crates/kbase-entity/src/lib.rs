//! # kbase-entity
//!
//! Domain entity models for the SupportAI knowledge base. Every struct in
//! this crate is a plain value object: folders as displayed, sources with
//! their sync state, external integrations, and the chat widget
//! configuration. All entities derive `Debug`, `Clone`, `Serialize`, and
//! `Deserialize`.

pub mod file;
pub mod folder;
pub mod integration;
pub mod widget;
