//! Binary-search counter
//!
//! Finds the rank range of suffixes that start with the pattern using two
//! independent bracket searches, one per sentinel. Every comparison starts
//! from the first character.

use super::bracket::*;
use super::types::*;
use super::{PatternCounter, check_empty};
use crate::error::Result;
use crate::index::{Rank, TextIndexStore};
use std::cmp::Ordering;
use std::ops::Range;

pub struct BinarySearchCounter<'a> {
    store: &'a TextIndexStore,
    empty_pattern: EmptyPatternPolicy,
}

impl<'a> BinarySearchCounter<'a> {
    pub fn new(store: &'a TextIndexStore) -> Self {
        Self {
            store,
            empty_pattern: EmptyPatternPolicy::default(),
        }
    }

    pub fn with_empty_pattern(mut self, policy: EmptyPatternPolicy) -> Self {
        self.empty_pattern = policy;
        self
    }

    /// First rank whose suffix sorts at or above `pattern · sentinel`
    pub fn boundary(&self, pattern: &[u8], sentinel: Sentinel) -> Rank {
        self.boundary_traced(pattern, sentinel, &mut SearchStats::default(), &mut ())
    }

    /// [`Self::boundary`], reporting work to `stats` and steps to `observer`
    pub fn boundary_traced<O: BracketObserver>(
        &self,
        pattern: &[u8],
        sentinel: Sentinel,
        stats: &mut SearchStats,
        observer: &mut O,
    ) -> Rank {
        let mut bracket = Bracket::new(self.store.len());
        stats.searches += 1;

        while !bracket.is_terminal() {
            let mid = bracket.midpoint();
            let suffix = self.store.suffix_at_rank(slot_rank(mid));
            let (ordering, matched) = compare_augmented(pattern, sentinel, suffix, 0);
            record_comparison(stats, 0, matched);

            let before = bracket;
            bracket.narrow(mid, ordering == Ordering::Less);
            observer.observe(&BracketStep {
                sentinel,
                before,
                mid,
                after: bracket,
                skipped: 0,
            });
        }

        bracket.boundary()
    }

    /// Ranks of all suffixes that start with `pattern`
    pub fn range(&self, pattern: &[u8]) -> Result<Range<Rank>> {
        self.range_with_stats(pattern, &mut SearchStats::default())
    }

    fn range_with_stats(&self, pattern: &[u8], stats: &mut SearchStats) -> Result<Range<Rank>> {
        check_empty(pattern, self.empty_pattern)?;
        let lo = self.boundary_traced(pattern, Sentinel::Low, stats, &mut ());
        let hi = self.boundary_traced(pattern, Sentinel::High, stats, &mut ());
        debug_assert!(lo <= hi);
        Ok(lo..hi)
    }
}

impl PatternCounter for BinarySearchCounter<'_> {
    fn kind(&self) -> CounterKind {
        CounterKind::Binary
    }

    fn count_with_stats(&self, pattern: &[u8], stats: &mut SearchStats) -> Result<usize> {
        let range = self.range_with_stats(pattern, stats)?;
        Ok(range.len())
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_banana_range() {
        let store = banana();
        let counter = BinarySearchCounter::new(&store);

        // Ranks 1 and 2 are "ana" and "anana"
        assert_eq!(counter.range(b"ana").unwrap(), 1..3);
        assert_eq!(counter.range(b"a").unwrap(), 0..3);
        assert_eq!(counter.range(b"n").unwrap(), 4..6);
        // Absent pattern: empty range at its insertion point
        assert_eq!(counter.range(b"z").unwrap(), 6..6);
        assert_eq!(counter.range(b"b").unwrap(), 3..4);
    }

    #[test]
    fn test_range_positions_are_occurrences() {
        let store = store_for("mississippi");
        let counter = BinarySearchCounter::new(&store);
        let mut positions: Vec<_> = counter
            .range(b"ssi")
            .unwrap()
            .map(|rank| store.order_of(rank))
            .collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![2, 5]);
    }

    #[test]
    fn test_steps_follow_the_state_machine() {
        let store = banana();
        let counter = BinarySearchCounter::new(&store);
        let mut steps: Vec<BracketStep> = Vec::new();
        let rank = counter.boundary_traced(b"ana", Sentinel::Low, &mut SearchStats::default(), &mut steps);

        assert_eq!(rank, 1);
        assert_eq!(steps[0].before, Bracket::new(6));
        for pair in steps.windows(2) {
            assert_eq!(pair[0].after, pair[1].before);
        }
        assert_eq!(steps.last().unwrap().after.width(), 1);
        assert!(steps.iter().all(|s| s.skipped == 0));
    }

    #[test]
    fn test_stats() {
        let store = banana();
        let counter = BinarySearchCounter::new(&store);
        let mut stats = SearchStats::default();
        counter.count_with_stats(b"ana", &mut stats).unwrap();
        assert_eq!(stats.searches, 2);
        assert_eq!(stats.iterations, stats.comparisons);
        // ceil(log2(7)) steps per search at most
        assert!(stats.iterations <= 6);
        assert_eq!(stats.chars_skipped, 0);
    }

    proptest! {
        #[test]
        fn bracket_strictly_narrows(
            text in "[acgt]{0,60}",
            pattern in "[acgt]{0,4}",
        ) {
            let store = store_for(&text);
            let counter = BinarySearchCounter::new(&store);
            for sentinel in [Sentinel::Low, Sentinel::High] {
                let mut steps: Vec<BracketStep> = Vec::new();
                counter.boundary_traced(pattern.as_bytes(), sentinel, &mut SearchStats::default(), &mut steps);
                for step in &steps {
                    prop_assert!(step.after.width() < step.before.width());
                    prop_assert!(step.after.l >= step.before.l);
                    prop_assert!(step.after.r <= step.before.r);
                }
            }
        }

        #[test]
        fn low_boundary_never_exceeds_high(
            text in "[acgt]{0,60}",
            pattern in "[acgt]{0,4}",
        ) {
            let store = store_for(&text);
            let counter = BinarySearchCounter::new(&store);
            let lo = counter.boundary(pattern.as_bytes(), Sentinel::Low);
            let hi = counter.boundary(pattern.as_bytes(), Sentinel::High);
            prop_assert!(lo <= hi);
        }
    }
}
