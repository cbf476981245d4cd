//! Brute-force counter
//!
//! Tests the pattern against every suffix in rank order. Used as the
//! correctness oracle for the two binary-search counters.

use super::types::*;
use super::{PatternCounter, check_empty};
use crate::error::Result;
use crate::index::TextIndexStore;
use crate::utils::common_prefix_len;

pub struct BruteForceCounter<'a> {
    store: &'a TextIndexStore,
    window: BruteWindow,
    empty_pattern: EmptyPatternPolicy,
}

impl<'a> BruteForceCounter<'a> {
    pub fn new(store: &'a TextIndexStore) -> Self {
        Self {
            store,
            window: BruteWindow::default(),
            empty_pattern: EmptyPatternPolicy::default(),
        }
    }

    pub fn with_window(mut self, window: BruteWindow) -> Self {
        self.window = window;
        self
    }

    pub fn with_empty_pattern(mut self, policy: EmptyPatternPolicy) -> Self {
        self.empty_pattern = policy;
        self
    }

    /// The part of a suffix the pattern is tested against
    #[inline]
    fn window<'s>(&self, suffix: &'s [u8]) -> &'s [u8] {
        match self.window {
            BruteWindow::Full => suffix,
            // Suffixes are never empty, the last one is a single character
            BruteWindow::ExcludeLast => &suffix[..suffix.len() - 1],
        }
    }
}

impl PatternCounter for BruteForceCounter<'_> {
    fn kind(&self) -> CounterKind {
        CounterKind::Brute
    }

    fn count_with_stats(&self, pattern: &[u8], stats: &mut SearchStats) -> Result<usize> {
        check_empty(pattern, self.empty_pattern)?;
        stats.searches += 1;

        let mut count = 0;
        for rank in 0..self.store.len() {
            let window = self.window(self.store.suffix_at_rank(rank));
            let matched = common_prefix_len(pattern, window);

            stats.comparisons += 1;
            stats.chars_compared += (matched + 1).min(pattern.len().max(1)) as u64;

            if matched == pattern.len() {
                count += 1;
            }
        }

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;

    #[test]
    fn test_full_window() {
        let store = banana();
        let counter = BruteForceCounter::new(&store);
        assert_eq!(counter.count(b"ana").unwrap(), 2);
        assert_eq!(counter.count(b"a").unwrap(), 3);
        assert_eq!(counter.count(b"na").unwrap(), 2);
    }

    #[test]
    fn test_exclude_last_window_drops_final_character() {
        let store = banana();
        let counter = BruteForceCounter::new(&store).with_window(BruteWindow::ExcludeLast);

        // The 'a' at position 5 is the final character and falls outside
        assert_eq!(counter.count(b"a").unwrap(), 2);
        // "na" at position 4 ends on the final character
        assert_eq!(counter.count(b"na").unwrap(), 1);
        // Occurrences that end before the final character are unaffected
        assert_eq!(counter.count(b"ban").unwrap(), 1);
        assert_eq!(counter.count(b"banana").unwrap(), 0);
    }

    #[test]
    fn test_exclude_last_is_harmless_with_terminator() {
        let store = store_for("banana$");
        let full = BruteForceCounter::new(&store);
        let legacy = BruteForceCounter::new(&store).with_window(BruteWindow::ExcludeLast);
        for pattern in [&b"a"[..], b"na", b"ana", b"banana", b"n"] {
            assert_eq!(full.count(pattern).unwrap(), legacy.count(pattern).unwrap());
        }
    }

    #[test]
    fn test_stats() {
        let store = banana();
        let counter = BruteForceCounter::new(&store);
        let mut stats = SearchStats::default();
        counter.count_with_stats(b"ana", &mut stats).unwrap();
        assert_eq!(stats.searches, 1);
        assert_eq!(stats.comparisons, 6);
        assert_eq!(stats.iterations, 0);
    }
}
