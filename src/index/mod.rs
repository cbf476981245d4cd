//! Text & index store
//!
//! The store owns the text, the suffix array and the optional LCP array.
//! It is validated once at load time and never mutated afterwards.
//!
//! ## Architecture
//!
//! - `types`: positions, ranks, sentinels and the alphabet
//! - `store`: the validated, read-only store
//! - `dataset`: reading datasets (line format or JSON)
//! - `writer`: writing datasets
//! - `builder`: reference suffix array / LCP construction for fixtures

pub mod builder;
pub mod dataset;
pub mod store;
pub mod types;
pub mod writer;

pub use builder::DatasetBuilder;
pub use dataset::{Dataset, Workload};
pub use store::{StoreOptions, TextIndexStore};
pub use types::*;
pub use writer::DatasetWriter;
