//! Filesystem utilities for nginx-3scale.
//!
//! Rendered configuration is written atomically so nginx never reads a
//! half-written file.

pub mod atomic;

pub use atomic::{OUTPUT_MODE, atomic_write};
