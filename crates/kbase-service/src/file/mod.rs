//! Knowledge source registry, intake, and sync progress stepping.

pub mod intake;
pub mod progress;
pub mod registry;

pub use intake::{SourceInput, SourceIntake};
pub use progress::{SyncProgress, Tick};
pub use registry::{FileRegistry, RegistryStats};
