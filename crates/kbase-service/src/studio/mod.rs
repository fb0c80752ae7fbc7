//! Chat widget ("studio") helpers.

pub mod embed;

pub use embed::{EmbedTarget, render_snippet};
