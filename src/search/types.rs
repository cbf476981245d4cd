//! Types shared by the counters

use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// The three counting strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CounterKind {
    /// Scan every suffix (correctness oracle)
    Brute,
    /// Two plain binary searches
    Binary,
    /// Two binary searches that skip already-matched prefixes
    Lcp,
}

impl CounterKind {
    pub const ALL: [CounterKind; 3] = [CounterKind::Brute, CounterKind::Binary, CounterKind::Lcp];

    pub fn name(self) -> &'static str {
        match self {
            CounterKind::Brute => "brute",
            CounterKind::Binary => "binary",
            CounterKind::Lcp => "lcp",
        }
    }

    /// File name of this counter's result stream
    pub fn output_file(self) -> &'static str {
        match self {
            CounterKind::Brute => "brute.out",
            CounterKind::Binary => "binary.out",
            CounterKind::Lcp => "lcp.out",
        }
    }
}

impl std::fmt::Display for CounterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// What to do with an empty pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum EmptyPatternPolicy {
    /// Every suffix has the empty prefix: the count is `n`
    #[default]
    MatchAll,
    /// Fail with [`crate::SearchError::EmptyPattern`]
    Reject,
}

/// Window the brute-force counter tests each suffix against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BruteWindow {
    /// The whole suffix
    #[default]
    Full,
    /// The suffix without the text's final character. Occurrences that end
    /// on the last character are not counted.
    ExcludeLast,
}

/// How the LCP-accelerated counter refreshes its endpoint prefix lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LcpMaintenance {
    /// Recompute both lengths from offset 0 after every step
    #[default]
    Recompute,
    /// Reuse the match length found at the midpoint for the side that moved
    Incremental,
}

/// Policies applied by the counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    #[serde(default)]
    pub empty_pattern: EmptyPatternPolicy,
    #[serde(default)]
    pub brute_window: BruteWindow,
    #[serde(default)]
    pub lcp_maintenance: LcpMaintenance,
}

/// Work counters collected during a search
///
/// Returned to the caller instead of being accumulated in globals, so that
/// concurrent runs never interfere.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Boundary searches (brute force: one per pattern)
    pub searches: u64,
    /// Bracket narrowing steps
    pub iterations: u64,
    /// Pattern-versus-suffix comparisons
    pub comparisons: u64,
    /// Character positions examined by those comparisons
    pub chars_compared: u64,
    /// Character positions skipped thanks to a known common prefix
    pub chars_skipped: u64,
    /// Character positions examined while refreshing endpoint prefix lengths
    pub lcp_chars: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: Self) {
        self.searches += other.searches;
        self.iterations += other.iterations;
        self.comparisons += other.comparisons;
        self.chars_compared += other.chars_compared;
        self.chars_skipped += other.chars_skipped;
        self.lcp_chars += other.lcp_chars;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_add_assign() {
        let mut total = SearchStats {
            searches: 1,
            comparisons: 4,
            ..Default::default()
        };
        total += SearchStats {
            searches: 2,
            chars_skipped: 7,
            ..Default::default()
        };
        assert_eq!(total.searches, 3);
        assert_eq!(total.comparisons, 4);
        assert_eq!(total.chars_skipped, 7);
    }

    #[test]
    fn test_policy_serde_names() {
        assert_eq!(
            serde_json::to_string(&EmptyPatternPolicy::MatchAll).unwrap(),
            "\"match-all\""
        );
        assert_eq!(
            serde_json::from_str::<BruteWindow>("\"exclude-last\"").unwrap(),
            BruteWindow::ExcludeLast
        );
        assert_eq!(serde_json::to_string(&CounterKind::Lcp).unwrap(), "\"lcp\"");
    }

    #[test]
    fn test_output_files_are_distinct() {
        let files: std::collections::HashSet<_> =
            CounterKind::ALL.iter().map(|k| k.output_file()).collect();
        assert_eq!(files.len(), 3);
    }
}
