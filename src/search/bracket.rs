//! Bracket state machine shared by the binary and LCP-accelerated counters
//!
//! A boundary search runs over `n + 1` slots. Slot 0 stands for a virtual
//! suffix below every real one; slot `s >= 1` is rank `s - 1`. The bracket
//! `(l, r)` keeps two invariants:
//!
//! - the suffix at slot `l` sorts strictly below the augmented pattern
//! - the suffix at slot `r` (slot `n + 1` is a virtual top) sorts at or
//!   above it
//!
//! Starting from `(0, n + 1)`, every step moves one endpoint to the
//! midpoint until `r - l == 1`. The final `l` is then the number of ranks
//! below the augmented pattern, i.e. the first rank at or above it.

use super::types::*;
use crate::index::types::Rank;
use std::cmp::Ordering;

/// Sentinel appended to the pattern for one boundary search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentinel {
    /// Sorts below every symbol and below end-of-suffix
    Low,
    /// Sorts above every symbol
    High,
}

/// Current `(l, r)` pair of a boundary search, in slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub l: usize,
    pub r: usize,
}

impl Bracket {
    /// Initial bracket for a text of length `n`
    pub fn new(n: usize) -> Self {
        Self { l: 0, r: n + 1 }
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.l + 1 >= self.r
    }

    #[inline]
    pub fn midpoint(&self) -> usize {
        (self.l + self.r) / 2
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.r - self.l
    }

    /// Move one endpoint to `mid`: `r` when the augmented pattern sorts at
    /// or below the suffix at `mid`, `l` otherwise
    #[inline]
    pub fn narrow(&mut self, mid: usize, pattern_at_or_below: bool) {
        debug_assert!(self.l < mid && mid < self.r);
        if pattern_at_or_below {
            self.r = mid;
        } else {
            self.l = mid;
        }
    }

    /// The answer of a finished search
    #[inline]
    pub fn boundary(&self) -> Rank {
        self.l
    }
}

/// Rank of the real suffix at a midpoint slot
#[inline]
pub fn slot_rank(slot: usize) -> Rank {
    slot - 1
}

/// One narrowing step, reported to a [`BracketObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BracketStep {
    pub sentinel: Sentinel,
    pub before: Bracket,
    pub mid: usize,
    pub after: Bracket,
    /// Characters skipped in the decisive comparison
    pub skipped: usize,
}

/// Receives every step of a boundary search
pub trait BracketObserver {
    fn observe(&mut self, step: &BracketStep);
}

impl BracketObserver for () {
    #[inline]
    fn observe(&mut self, _step: &BracketStep) {}
}

impl BracketObserver for Vec<BracketStep> {
    fn observe(&mut self, step: &BracketStep) {
        self.push(*step);
    }
}

/// Compare `pattern · sentinel` against `suffix`, assuming the first `from`
/// characters are already known to match
///
/// Returns the ordering of the augmented pattern relative to the suffix
/// (never `Equal`) and the common prefix length of `pattern` and `suffix`.
pub fn compare_augmented(
    pattern: &[u8],
    sentinel: Sentinel,
    suffix: &[u8],
    from: usize,
) -> (Ordering, usize) {
    let start = from.min(pattern.len()).min(suffix.len());
    let matched = start
        + pattern[start..]
            .iter()
            .zip(&suffix[start..])
            .take_while(|(p, s)| p == s)
            .count();

    let ordering = if matched < pattern.len() {
        match suffix.get(matched) {
            Some(&s) => pattern[matched].cmp(&s),
            // Suffix is a proper prefix of the pattern
            None => Ordering::Greater,
        }
    } else {
        match sentinel {
            Sentinel::Low => Ordering::Less,
            Sentinel::High => Ordering::Greater,
        }
    };

    (ordering, matched)
}

/// Characters examined by a comparison that started at `from` and matched
/// `matched` characters (the deciding position included)
#[inline]
pub(crate) fn examined(from: usize, matched: usize) -> u64 {
    (matched.saturating_sub(from) + 1) as u64
}

/// Record one comparison in `stats`
#[inline]
pub(crate) fn record_comparison(stats: &mut SearchStats, from: usize, matched: usize) {
    stats.iterations += 1;
    stats.comparisons += 1;
    stats.chars_compared += examined(from, matched);
    stats.chars_skipped += from as u64;
}
