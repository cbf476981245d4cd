//! # sacount - exact pattern counting over suffix arrays
//!
//! Counts the occurrences of each pattern in a text, given the text's
//! precomputed suffix array (and optionally its LCP array). Three counters
//! answer the same question at increasing levels of sophistication:
//!
//! 1. **Brute force** - test every suffix, the correctness oracle
//! 2. **Binary search** - two sentinel searches over the suffix array
//! 3. **LCP-accelerated** - the same searches, skipping characters already
//!    known to match both bracket endpoints
//!
//! ## Architecture
//!
//! - [`index`] - the validated, read-only text and suffix array store
//! - [`search`] - the three counters and the benchmarking harness
//! - [`config`] - JSON configuration
//! - [`output`] - result streams and run summary
//! - [`utils`] - prefix helpers and progress bars
//!
//! ## Quick Start
//!
//! ```
//! use sacount::index::TextIndexStore;
//! use sacount::search::{LcpCounter, PatternCounter};
//!
//! let store = TextIndexStore::new(
//!     b"banana".to_vec(),
//!     vec![5, 3, 1, 0, 4, 2],
//!     None,
//! ).unwrap();
//!
//! let counter = LcpCounter::new(&store);
//! assert_eq!(counter.count(b"ana").unwrap(), 2);
//! ```

pub mod config;
pub mod error;
pub mod index;
pub mod output;
pub mod search;
pub mod utils;

pub use error::{Result, SearchError};
