//! bug-tracker/crates/bt-core/src/lib.rs
//!
//! The central domain logic and interface definitions for the bug tracker.

pub mod models;
pub mod traits;
pub mod error;
pub mod lifecycle;
pub mod validate;

// Re-exporting for easier access in other crates
pub use models::*;
pub use traits::*;
pub use error::*;
pub use lifecycle::*;
pub use validate::*;
