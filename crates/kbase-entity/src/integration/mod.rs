//! External integration entities.

pub mod model;

pub use model::{Integration, IntegrationStatus};
