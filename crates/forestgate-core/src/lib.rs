//! forestgate Core
//!
//! Core types shared across forestgate components.
//!
//! This crate provides:
//! - The error type and result alias used by every library crate
//! - Class labels as returned by classifiers

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::Label;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::types::Label;
}
