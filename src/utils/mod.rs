//! Utility functions shared across the crate.
//!
//! ## Modules
//!
//! - [`prefix`] - common-prefix measurement on byte strings
//! - [`progress`] - progress bars (no-op without the `progress` feature)

pub mod prefix;
pub mod progress;

pub use prefix::*;
