//! Exact pattern counting over a suffix array
//!
//! Three counters share one read-only [`TextIndexStore`]:
//!
//! - [`BruteForceCounter`] - scans every suffix, O(n · |P|); the oracle
//! - [`BinarySearchCounter`] - two sentinel binary searches, O(|P| log n)
//! - [`LcpCounter`] - the same searches, skipping characters already known
//!   to match both bracket endpoints
//!
//! Each counter answers one pattern at a time and never mutates the store,
//! so they may run concurrently (see [`runner`]).

pub mod binary;
pub mod bracket;
pub mod brute;
pub mod lcp;
pub mod runner;
pub mod types;

pub use binary::BinarySearchCounter;
pub use bracket::{Bracket, BracketObserver, BracketStep, Sentinel};
pub use brute::BruteForceCounter;
pub use lcp::LcpCounter;
pub use runner::{
    CounterRun, CounterTiming, Disagreement, RunReport, Runner, RunnerOptions, find_disagreements,
};
pub use types::*;

use crate::error::{Result, SearchError};
use crate::index::TextIndexStore;

/// A strategy that counts the occurrences of a pattern in the store's text
pub trait PatternCounter: Sync {
    fn kind(&self) -> CounterKind;

    /// Count occurrences of `pattern`, adding the work done to `stats`
    fn count_with_stats(&self, pattern: &[u8], stats: &mut SearchStats) -> Result<usize>;

    fn count(&self, pattern: &[u8]) -> Result<usize> {
        let mut stats = SearchStats::default();
        self.count_with_stats(pattern, &mut stats)
    }

    /// Count every pattern, in order
    fn count_all(&self, patterns: &[Vec<u8>]) -> Result<Vec<usize>> {
        patterns.iter().map(|p| self.count(p)).collect()
    }
}

impl CounterKind {
    /// Instantiate this counter over `store`
    pub fn counter<'a>(
        self,
        store: &'a TextIndexStore,
        options: &SearchOptions,
    ) -> Box<dyn PatternCounter + 'a> {
        match self {
            CounterKind::Brute => Box::new(
                BruteForceCounter::new(store)
                    .with_window(options.brute_window)
                    .with_empty_pattern(options.empty_pattern),
            ),
            CounterKind::Binary => Box::new(
                BinarySearchCounter::new(store).with_empty_pattern(options.empty_pattern),
            ),
            CounterKind::Lcp => Box::new(
                LcpCounter::new(store)
                    .with_maintenance(options.lcp_maintenance)
                    .with_empty_pattern(options.empty_pattern),
            ),
        }
    }
}

/// Apply the empty-pattern policy before searching
#[inline]
pub(crate) fn check_empty(pattern: &[u8], policy: EmptyPatternPolicy) -> Result<()> {
    if pattern.is_empty() && policy == EmptyPatternPolicy::Reject {
        return Err(SearchError::EmptyPattern);
    }
    Ok(())
}
