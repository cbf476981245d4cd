//! Text & index store
//!
//! Immutable holder of the text, its suffix array and the optional LCP
//! array. Every input contract is checked once in the constructor so that
//! the counters can index into the arrays without further checks.

use super::builder::build_lcp;
use super::types::*;
use crate::error::{Result, SearchError};
use std::cmp::Ordering;

/// Load-time validation switches
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Bytes allowed in the text and in patterns
    pub alphabet: Alphabet,
    /// Check that adjacent suffixes are in strictly increasing order
    pub validate_order: bool,
    /// Check every LCP entry against the suffixes it describes (implies the
    /// order check when an LCP array is present)
    pub validate_lcp: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            alphabet: Alphabet::default(),
            validate_order: true,
            validate_lcp: true,
        }
    }
}

/// Read-only text with its precomputed suffix array
///
/// `Sync` by construction, so any number of counters may share one store
/// across threads.
#[derive(Debug, Clone)]
pub struct TextIndexStore {
    text: Vec<u8>,
    suffix_array: Vec<TextPosition>,
    lcp: Option<Vec<usize>>,
    alphabet: Alphabet,
}

impl TextIndexStore {
    /// Build a store with the default validation options
    pub fn new(
        text: Vec<u8>,
        suffix_array: Vec<TextPosition>,
        lcp: Option<Vec<usize>>,
    ) -> Result<Self> {
        Self::with_options(text, suffix_array, lcp, &StoreOptions::default())
    }

    /// Build a store, failing with [`SearchError::MalformedInput`] on any
    /// contract violation
    pub fn with_options(
        text: Vec<u8>,
        suffix_array: Vec<TextPosition>,
        lcp: Option<Vec<usize>>,
        options: &StoreOptions,
    ) -> Result<Self> {
        let n = text.len();

        if let Some((pos, byte)) = options.alphabet.first_invalid(&text) {
            return Err(SearchError::malformed(format!(
                "text byte {:#04x} at position {} is outside the alphabet",
                byte, pos
            )));
        }

        if suffix_array.len() != n {
            return Err(SearchError::malformed(format!(
                "suffix array has {} entries but the text has {} characters",
                suffix_array.len(),
                n
            )));
        }

        check_permutation(&suffix_array)?;

        // The LCP rebuild relies on sorted input
        let lcp_checked = options.validate_lcp && lcp.is_some();
        if options.validate_order || lcp_checked {
            check_order(&text, &suffix_array)?;
        }

        if let Some(lcp) = &lcp {
            if lcp.len() != n {
                return Err(SearchError::malformed(format!(
                    "LCP array has {} entries but the text has {} characters",
                    lcp.len(),
                    n
                )));
            }
            if options.validate_lcp {
                check_lcp(&text, &suffix_array, lcp)?;
            }
        }

        Ok(Self {
            text,
            suffix_array,
            lcp,
            alphabet: options.alphabet.clone(),
        })
    }

    /// Text length `n` (also the number of suffixes)
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The suffix starting at text position `pos`
    #[inline]
    pub fn suffix_starting_at(&self, pos: TextPosition) -> &[u8] {
        &self.text[pos..]
    }

    /// Text position of the suffix with the given rank (`SA[rank]`)
    #[inline]
    pub fn order_of(&self, rank: Rank) -> TextPosition {
        self.suffix_array[rank]
    }

    /// The suffix with the given rank
    #[inline]
    pub fn suffix_at_rank(&self, rank: Rank) -> &[u8] {
        self.suffix_starting_at(self.order_of(rank))
    }

    /// Precomputed LCP array, if one was supplied
    #[inline]
    pub fn lcp(&self) -> Option<&[usize]> {
        self.lcp.as_deref()
    }

    /// Check that a pattern only uses alphabet symbols
    pub fn validate_pattern(&self, index: usize, pattern: &[u8]) -> Result<()> {
        match self.alphabet.first_invalid(pattern) {
            Some((pos, byte)) => Err(SearchError::malformed(format!(
                "pattern {} has byte {:#04x} at offset {} outside the alphabet",
                index, byte, pos
            ))),
            None => Ok(()),
        }
    }

    /// Summary statistics for this store and a pattern list
    pub fn meta(&self, patterns: &[Vec<u8>]) -> DatasetMeta {
        let (max_lcp, mean_lcp) = match &self.lcp {
            Some(lcp) if lcp.len() > 1 => {
                let tail = &lcp[1..];
                let max = tail.iter().copied().max().unwrap_or(0);
                let sum: usize = tail.iter().sum();
                (max, sum as f64 / tail.len() as f64)
            }
            _ => (0, 0.0),
        };

        let mut seen = [false; 256];
        for &b in &self.text {
            seen[b as usize] = true;
        }

        DatasetMeta {
            text_len: self.len(),
            pattern_count: patterns.len(),
            has_lcp: self.lcp.is_some(),
            max_lcp,
            mean_lcp,
            max_pattern_len: patterns.iter().map(Vec::len).max().unwrap_or(0),
            distinct_symbols: seen.iter().filter(|&&s| s).count(),
        }
    }
}

fn check_permutation(sa: &[TextPosition]) -> Result<()> {
    let n = sa.len();
    let mut seen = vec![false; n];

    for (rank, &pos) in sa.iter().enumerate() {
        if pos >= n {
            return Err(SearchError::malformed(format!(
                "suffix array entry {} at rank {} is out of range [0, {})",
                pos, rank, n
            )));
        }
        if seen[pos] {
            return Err(SearchError::malformed(format!(
                "suffix array repeats position {} (rank {})",
                pos, rank
            )));
        }
        seen[pos] = true;
    }

    Ok(())
}

/// Linear-time order check
///
/// Given a valid permutation, the array is sorted iff every adjacent pair
/// either differs in its first byte in the right direction, or shares it and
/// the suffixes one position later are already ranked in the same order. The
/// empty suffix past the end ranks below everything.
fn check_order(text: &[u8], sa: &[TextPosition]) -> Result<()> {
    let n = text.len();
    let mut rank = vec![0usize; n + 1];
    for (r, &pos) in sa.iter().enumerate() {
        rank[pos] = r + 1;
    }

    for r in 1..n {
        let (prev, cur) = (sa[r - 1], sa[r]);
        let in_order = match text[prev].cmp(&text[cur]) {
            Ordering::Less => true,
            Ordering::Greater => false,
            Ordering::Equal => rank[prev + 1] < rank[cur + 1],
        };
        if !in_order {
            return Err(SearchError::malformed(format!(
                "suffixes at ranks {} and {} are out of order",
                r - 1,
                r
            )));
        }
    }
    Ok(())
}

/// Compare the supplied LCP array with one rebuilt by Kasai's algorithm
///
/// Requires a sorted suffix array.
fn check_lcp(text: &[u8], sa: &[TextPosition], lcp: &[usize]) -> Result<()> {
    let expected = build_lcp(text, sa);
    // Entry 0 has no predecessor; any value is accepted there
    for rank in 1..sa.len() {
        if lcp[rank] != expected[rank] {
            return Err(SearchError::malformed(format!(
                "LCP entry {} is {} but the suffixes share {} characters",
                rank, lcp[rank], expected[rank]
            )));
        }
    }
    Ok(())
}
