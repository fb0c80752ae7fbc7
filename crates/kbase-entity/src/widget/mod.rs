//! Chat widget configuration.

pub mod model;

pub use model::{WidgetConfig, WidgetPosition};
