//! Component trait

/// Marker trait for component types stored in a [`Registry`](super::Registry)
pub trait Component: 'static + Send + Sync {}
