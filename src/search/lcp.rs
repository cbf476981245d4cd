//! LCP-accelerated counter
//!
//! Same two bracket searches as [`super::binary`], but the search also
//! tracks `lcp_l` and `lcp_r`: how many leading characters of the
//! augmented pattern are shared with the suffixes at the two endpoints.
//! Every suffix ranked between the endpoints shares at least
//! `k = min(lcp_l, lcp_r)` of them, so the decisive comparison at the
//! midpoint starts at offset `k`.
//!
//! A virtual endpoint is measured against the nearest real suffix: slot 0
//! against rank 0, slot `n + 1` against rank `n - 1`. Both still bound
//! every midpoint, so the skip stays sound.

use super::bracket::*;
use super::types::*;
use super::{PatternCounter, check_empty};
use crate::error::Result;
use crate::index::{Rank, TextIndexStore};
use crate::utils::common_prefix_len;
use std::cmp::Ordering;
use std::ops::Range;

pub struct LcpCounter<'a> {
    store: &'a TextIndexStore,
    maintenance: LcpMaintenance,
    empty_pattern: EmptyPatternPolicy,
}

impl<'a> LcpCounter<'a> {
    pub fn new(store: &'a TextIndexStore) -> Self {
        Self {
            store,
            maintenance: LcpMaintenance::default(),
            empty_pattern: EmptyPatternPolicy::default(),
        }
    }

    pub fn with_maintenance(mut self, maintenance: LcpMaintenance) -> Self {
        self.maintenance = maintenance;
        self
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
        let mut lcp_l = 0usize;
        let mut lcp_r = 0usize;
        stats.searches += 1;

        while !bracket.is_terminal() {
            let mid = bracket.midpoint();
            let k = lcp_l.min(lcp_r);
            let suffix = self.store.suffix_at_rank(slot_rank(mid));
            let (ordering, matched) = compare_augmented(pattern, sentinel, suffix, k);
            record_comparison(stats, k, matched);

            let before = bracket;
            let moved_right_end = ordering == Ordering::Less;
            bracket.narrow(mid, moved_right_end);
            observer.observe(&BracketStep {
                sentinel,
                before,
                mid,
                after: bracket,
                skipped: k,
            });

            match self.maintenance {
                LcpMaintenance::Recompute => {
                    lcp_l = self.endpoint_lcp(pattern, bracket.l);
                    lcp_r = self.endpoint_lcp(pattern, bracket.r);
                    stats.lcp_chars += (lcp_l + lcp_r + 2) as u64;
                }
                LcpMaintenance::Incremental => {
                    if moved_right_end {
                        lcp_r = matched;
                    } else {
                        lcp_l = matched;
                    }
                }
            }
        }

        bracket.boundary()
    }

    /// Common prefix of the pattern and the suffix at an endpoint slot
    fn endpoint_lcp(&self, pattern: &[u8], slot: usize) -> usize {
        let rank = slot.saturating_sub(1).min(self.store.len() - 1);
        common_prefix_len(pattern, self.store.suffix_at_rank(rank))
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

impl PatternCounter for LcpCounter<'_> {
    fn kind(&self) -> CounterKind {
        CounterKind::Lcp
    }

    fn count_with_stats(&self, pattern: &[u8], stats: &mut SearchStats) -> Result<usize> {
        let range = self.range_with_stats(pattern, stats)?;
        Ok(range.len())
    }
}

#[cfg(test)]
mod tests {
    use super::super::BinarySearchCounter;
    use super::super::fixtures::*;
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_banana() {
        let store = banana();
        for maintenance in [LcpMaintenance::Recompute, LcpMaintenance::Incremental] {
            let counter = LcpCounter::new(&store).with_maintenance(maintenance);
            assert_eq!(counter.count(b"ana").unwrap(), 2);
            assert_eq!(counter.count(b"z").unwrap(), 0);
            assert_eq!(counter.range(b"ana").unwrap(), 1..3);
        }
    }

    #[test]
    fn test_skips_shared_prefix() {
        // Long runs of a shared prefix give the skip something to do
        let text = "abcabcabcabcabcabcabcabcabcabd";
        let store = store_for(text);
        let counter = LcpCounter::new(&store);

        let mut stats = SearchStats::default();
        let count = counter.count_with_stats(b"abcabcabc", &mut stats).unwrap();

        assert_eq!(count, naive_count(text.as_bytes(), b"abcabcabc"));
        assert!(stats.chars_skipped > 0);
    }

    #[test]
    fn test_compares_fewer_characters_than_binary() {
        let text = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaab";
        let store = store_for(text);
        let pattern = b"aaaaaaaaaaaaaaaaaaaa";

        let mut lcp_stats = SearchStats::default();
        let lcp = LcpCounter::new(&store).count_with_stats(pattern, &mut lcp_stats).unwrap();

        let mut binary_stats = SearchStats::default();
        let binary = BinarySearchCounter::new(&store)
            .count_with_stats(pattern, &mut binary_stats)
            .unwrap();

        assert_eq!(lcp, binary);
        assert_eq!(lcp_stats.iterations, binary_stats.iterations);
        assert!(lcp_stats.chars_compared < binary_stats.chars_compared);
    }

    #[test]
    fn test_first_step_skips_nothing() {
        let store = banana();
        let counter = LcpCounter::new(&store);
        let mut steps: Vec<BracketStep> = Vec::new();
        counter.boundary_traced(b"ana", Sentinel::High, &mut SearchStats::default(), &mut steps);
        assert_eq!(steps[0].skipped, 0);
        assert_eq!(steps.last().unwrap().after.width(), 1);
    }

    proptest! {
        #[test]
        fn boundaries_match_binary_search(
            text in "[ab]{0,80}",
            pattern in "[ab]{0,6}",
            incremental in any::<bool>(),
        ) {
            let store = store_for(&text);
            let maintenance = if incremental { LcpMaintenance::Incremental } else { LcpMaintenance::Recompute };
            let lcp = LcpCounter::new(&store).with_maintenance(maintenance);
            let binary = BinarySearchCounter::new(&store);
            for sentinel in [Sentinel::Low, Sentinel::High] {
                prop_assert_eq!(
                    lcp.boundary(pattern.as_bytes(), sentinel),
                    binary.boundary(pattern.as_bytes(), sentinel)
                );
            }
        }

        #[test]
        fn bracket_strictly_narrows(
            text in "[ab]{0,80}",
            pattern in "[ab]{0,6}",
            incremental in any::<bool>(),
        ) {
            let store = store_for(&text);
            let maintenance = if incremental { LcpMaintenance::Incremental } else { LcpMaintenance::Recompute };
            let counter = LcpCounter::new(&store).with_maintenance(maintenance);
            for sentinel in [Sentinel::Low, Sentinel::High] {
                let mut steps: Vec<BracketStep> = Vec::new();
                counter.boundary_traced(pattern.as_bytes(), sentinel, &mut SearchStats::default(), &mut steps);
                for pair in steps.windows(2) {
                    prop_assert_eq!(pair[0].after, pair[1].before);
                }
                for step in &steps {
                    prop_assert!(step.after.width() < step.before.width());
                }
            }
        }

        #[test]
        fn low_boundary_never_exceeds_high(
            text in "[ab]{0,80}",
            pattern in "[ab]{0,6}",
        ) {
            let store = store_for(&text);
            let counter = LcpCounter::new(&store);
            prop_assert!(
                counter.boundary(pattern.as_bytes(), Sentinel::Low)
                    <= counter.boundary(pattern.as_bytes(), Sentinel::High)
            );
        }
    }
}
