//! Reference dataset builder
//!
//! Builds a [`Dataset`] from a plain text by sorting all suffixes and
//! deriving the LCP array with Kasai's algorithm. This is fixture tooling
//! for tests, benchmarks and fuzzing; it makes no attempt at linear-time
//! construction.

use super::dataset::Dataset;
use super::types::TextPosition;
use crate::utils::common_prefix_len;
use rayon::prelude::*;

/// Texts above this size are sorted in parallel
const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// Builder for self-consistent datasets
pub struct DatasetBuilder {
    text: String,
    patterns: Vec<String>,
    with_lcp: bool,
}

impl DatasetBuilder {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            patterns: Vec::new(),
            with_lcp: true,
        }
    }

    /// Append one pattern
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Append several patterns, keeping their order
    pub fn patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Leave the LCP array out of the dataset
    pub fn without_lcp(mut self) -> Self {
        self.with_lcp = false;
        self
    }

    pub fn build(self) -> Dataset {
        let bytes = self.text.as_bytes();
        let suffix_array = build_suffix_array(bytes);
        let lcp = self.with_lcp.then(|| build_lcp(bytes, &suffix_array));

        Dataset {
            text: self.text,
            suffix_array,
            lcp,
            patterns: self.patterns,
        }
    }
}

/// Sort all suffix positions by the suffixes they start
///
/// Time: O(n log n) comparisons, each up to O(n) on repetitive text
pub fn build_suffix_array(text: &[u8]) -> Vec<TextPosition> {
    let n = text.len();
    let mut sa: Vec<TextPosition> = (0..n).collect();

    if n > PARALLEL_SORT_THRESHOLD {
        sa.par_sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    } else {
        sa.sort_unstable_by(|&a, &b| text[a..].cmp(&text[b..]));
    }

    sa
}

/// LCP array for a suffix array (Kasai et al., O(n))
///
/// Entry `i` is the common prefix length of the suffixes at ranks `i - 1`
/// and `i`; entry 0 is 0.
pub fn build_lcp(text: &[u8], sa: &[TextPosition]) -> Vec<usize> {
    let n = text.len();
    let mut lcp = vec![0; n];
    let mut rank = vec![0; n];
    for (r, &pos) in sa.iter().enumerate() {
        rank[pos] = r;
    }

    let mut h = 0usize;
    for pos in 0..n {
        let r = rank[pos];
        if r == 0 {
            h = 0;
            continue;
        }
        let prev = sa[r - 1];
        h += common_prefix_len(&text[pos + h..], &text[prev + h..]);
        lcp[r] = h;
        h = h.saturating_sub(1);
    }

    lcp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::store::{StoreOptions, TextIndexStore};

    #[test]
    fn test_banana() {
        let dataset = DatasetBuilder::new("banana").pattern("ana").build();
        assert_eq!(dataset.suffix_array, vec![5, 3, 1, 0, 4, 2]);
        assert_eq!(dataset.lcp, Some(vec![0, 1, 3, 0, 0, 2]));
        assert_eq!(dataset.patterns, vec!["ana"]);
    }

    #[test]
    fn test_with_terminator() {
        let sa = build_suffix_array(b"banana$");
        // '$' sorts before the letters
        assert_eq!(sa, vec![6, 5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_without_lcp() {
        let dataset = DatasetBuilder::new("mississippi").without_lcp().build();
        assert!(dataset.lcp.is_none());
        assert_eq!(dataset.suffix_array.len(), 11);
    }

    #[test]
    fn test_built_datasets_validate() {
        for text in ["", "a", "aaaaaaaa", "mississippi", "ACGTACGTTTGACA$", "abracadabra"] {
            let dataset = DatasetBuilder::new(text).build();
            let store = TextIndexStore::with_options(
                dataset.text.into_bytes(),
                dataset.suffix_array,
                dataset.lcp,
                &StoreOptions::default(),
            );
            assert!(store.is_ok(), "dataset for {:?} failed validation", text);
        }
    }
}
