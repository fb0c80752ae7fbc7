//! Service marker trait.

/// Marker trait for long-lived session components.
///
/// The knowledge store and the progress driver implement this trait so
/// they can be shared across tasks behind an `Arc`.
pub trait Service: Send + Sync + 'static {}
