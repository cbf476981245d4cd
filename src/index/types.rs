//! Types for the text and suffix array store
//!
//! Positions index into the text, ranks index into the suffix array. Both
//! are plain `usize` aliases so the two can be told apart in signatures.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};

/// Position in the text (start of a suffix)
pub type TextPosition = usize;

/// Index into the suffix array (position in sorted-suffix order)
pub type Rank = usize;

/// Sentinel appended to a pattern to find the lower edge of its match range
pub const LOW_SENTINEL: u8 = b'#';

/// Sentinel appended to a pattern to find the upper edge of its match range
pub const HIGH_SENTINEL: u8 = b'~';

/// Set of bytes allowed in the text and in patterns.
///
/// Every member must sort strictly between [`LOW_SENTINEL`] and
/// [`HIGH_SENTINEL`], otherwise the sentinel searches could stop inside a
/// match range.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    allowed: [bool; 256],
}

impl Alphabet {
    /// Every byte strictly between the two sentinels (`$` through `}`)
    pub fn between_sentinels() -> Self {
        let mut allowed = [false; 256];
        for b in (LOW_SENTINEL + 1)..HIGH_SENTINEL {
            allowed[b as usize] = true;
        }
        Self { allowed }
    }

    /// Build an alphabet from an explicit list of symbols
    pub fn from_symbols(symbols: &str) -> Result<Self> {
        if symbols.is_empty() {
            return Err(SearchError::malformed("alphabet must not be empty"));
        }

        let mut allowed = [false; 256];
        for &b in symbols.as_bytes() {
            if b <= LOW_SENTINEL || b >= HIGH_SENTINEL {
                return Err(SearchError::malformed(format!(
                    "alphabet symbol {:?} does not sort between the sentinels {:?} and {:?}",
                    b as char, LOW_SENTINEL as char, HIGH_SENTINEL as char
                )));
            }
            allowed[b as usize] = true;
        }
        Ok(Self { allowed })
    }

    #[inline]
    pub fn contains(&self, b: u8) -> bool {
        self.allowed[b as usize]
    }

    /// Position and value of the first byte outside the alphabet
    pub fn first_invalid(&self, bytes: &[u8]) -> Option<(usize, u8)> {
        bytes
            .iter()
            .position(|&b| !self.contains(b))
            .map(|i| (i, bytes[i]))
    }

    /// Number of symbols in the alphabet
    pub fn len(&self) -> usize {
        self.allowed.iter().filter(|&&a| a).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Symbols as a string, in byte order
    pub fn symbols(&self) -> String {
        (0u8..=255)
            .filter(|&b| self.contains(b))
            .map(|b| b as char)
            .collect()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::between_sentinels()
    }
}

impl std::fmt::Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Alphabet").field(&self.symbols()).finish()
    }
}

/// Summary of a loaded dataset, printed by `sacount check`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DatasetMeta {
    /// Text length (equals number of suffixes)
    pub text_len: usize,
    /// Number of patterns
    pub pattern_count: usize,
    /// Whether an LCP array was supplied
    pub has_lcp: bool,
    /// Largest LCP value (0 without an LCP array)
    pub max_lcp: usize,
    /// Mean LCP value (0 without an LCP array)
    pub mean_lcp: f64,
    /// Length of the longest pattern
    pub max_pattern_len: usize,
    /// Distinct bytes occurring in the text
    pub distinct_symbols: usize,
}
