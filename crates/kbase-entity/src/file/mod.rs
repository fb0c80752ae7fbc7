//! Knowledge source entities.

pub mod model;
pub mod status;

pub use model::{FileItem, NewSource};
pub use status::{SourceKind, SyncStatus};
