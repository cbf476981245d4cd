//! Benchmarking harness
//!
//! Runs counters over a pattern list, measures them and cross-checks their
//! answers. Timings and work counters are returned as values; nothing is
//! accumulated in globals.
//!
//! With more than one thread the pattern list is sharded across a rayon
//! pool. The store is only read, so no locking is involved, and results are
//! collected in input order.

use super::types::*;
use super::PatternCounter;
use crate::index::Workload;
use crate::utils::progress::pattern_bar;
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Harness settings
#[derive(Debug, Clone, Default)]
pub struct RunnerOptions {
    pub search: SearchOptions,
    /// Worker threads; 1 runs inline, 0 uses every core
    pub threads: usize,
    /// Draw a progress bar per counter
    pub show_progress: bool,
}

/// Output of one counter over the whole pattern list
#[derive(Debug, Clone)]
pub struct CounterRun {
    pub kind: CounterKind,
    /// One count per pattern, in input order
    pub counts: Vec<usize>,
    pub stats: SearchStats,
    pub elapsed: Duration,
}

/// Timing and work summary of one counter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterTiming {
    pub counter: CounterKind,
    pub elapsed_secs: f64,
    pub stats: SearchStats,
}

/// A pattern on which counters returned different counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Disagreement {
    pub pattern_index: usize,
    pub counts: Vec<(CounterKind, usize)>,
}

/// Everything measured in one run, written as `report.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub text_len: usize,
    pub pattern_count: usize,
    pub threads: usize,
    pub options: SearchOptions,
    pub counters: Vec<CounterTiming>,
    pub disagreements: Vec<Disagreement>,
}

pub struct Runner {
    options: RunnerOptions,
    pool: Option<rayon::ThreadPool>,
}

impl Runner {
    pub fn new(options: RunnerOptions) -> Result<Self> {
        let pool = if options.threads == 1 {
            None
        } else {
            Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(options.threads)
                    .build()
                    .context("Failed to build worker pool")?,
            )
        };

        Ok(Self { options, pool })
    }

    /// Effective number of worker threads
    pub fn threads(&self) -> usize {
        self.pool
            .as_ref()
            .map(|pool| pool.current_num_threads())
            .unwrap_or(1)
    }

    /// Run each requested counter over every pattern
    pub fn run(&self, workload: &Workload, kinds: &[CounterKind]) -> Result<Vec<CounterRun>> {
        kinds
            .iter()
            .map(|&kind| self.run_counter(workload, kind))
            .collect()
    }

    fn run_counter(&self, workload: &Workload, kind: CounterKind) -> Result<CounterRun> {
        let counter = kind.counter(&workload.store, &self.options.search);
        let patterns = &workload.patterns;
        let bar = pattern_bar(patterns.len() as u64, kind.name(), self.options.show_progress);

        let count_one = |(index, pattern): (usize, &Vec<u8>)| -> Result<(usize, SearchStats)> {
            let mut stats = SearchStats::default();
            let count = counter
                .count_with_stats(pattern, &mut stats)
                .with_context(|| format!("{} counter failed on pattern {}", kind, index))?;
            bar.inc(1);
            Ok((count, stats))
        };

        let start = Instant::now();
        let results: Vec<(usize, SearchStats)> = match &self.pool {
            Some(pool) => pool.install(|| {
                patterns
                    .par_iter()
                    .enumerate()
                    .map(count_one)
                    .collect::<Result<Vec<_>>>()
            })?,
            None => patterns
                .iter()
                .enumerate()
                .map(count_one)
                .collect::<Result<Vec<_>>>()?,
        };
        let elapsed = start.elapsed();
        bar.finish_and_clear();

        let mut stats = SearchStats::default();
        let counts = results
            .into_iter()
            .map(|(count, pattern_stats)| {
                stats += pattern_stats;
                count
            })
            .collect();

        tracing::info!(
            counter = %kind,
            patterns = patterns.len(),
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            comparisons = stats.comparisons,
            chars_compared = stats.chars_compared,
            "counter finished"
        );

        Ok(CounterRun {
            kind,
            counts,
            stats,
            elapsed,
        })
    }

    /// Summarise a finished run
    pub fn report(&self, workload: &Workload, runs: &[CounterRun]) -> RunReport {
        RunReport {
            text_len: workload.store.len(),
            pattern_count: workload.patterns.len(),
            threads: self.threads(),
            options: self.options.search,
            counters: runs
                .iter()
                .map(|run| CounterTiming {
                    counter: run.kind,
                    elapsed_secs: run.elapsed.as_secs_f64(),
                    stats: run.stats,
                })
                .collect(),
            disagreements: find_disagreements(runs),
        }
    }
}

/// Patterns on which the runs do not all return the same count
pub fn find_disagreements(runs: &[CounterRun]) -> Vec<Disagreement> {
    let Some(first) = runs.first() else {
        return Vec::new();
    };

    let mut disagreements = Vec::new();
    for (index, &expected) in first.counts.iter().enumerate() {
        if runs.iter().any(|run| run.counts.get(index) != Some(&expected)) {
            let counts = runs
                .iter()
                .filter_map(|run| run.counts.get(index).map(|&c| (run.kind, c)))
                .collect();
            tracing::warn!(pattern = index, "counters disagree");
            disagreements.push(Disagreement {
                pattern_index: index,
                counts,
            });
        }
    }

    disagreements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SearchError;
    use crate::index::{DatasetBuilder, StoreOptions};

    fn workload(text: &str, patterns: &[&str]) -> Workload {
        DatasetBuilder::new(text)
            .patterns(patterns.iter().copied())
            .build()
            .into_workload(&StoreOptions::default())
            .unwrap()
    }

    fn runner(threads: usize, search: SearchOptions) -> Runner {
        Runner::new(RunnerOptions {
            search,
            threads,
            show_progress: false,
        })
        .unwrap()
    }

    #[test]
    fn test_run_all_counters() {
        let workload = workload("banana", &["ana", "z", "a", "banana", "nanan"]);
        let runs = runner(1, SearchOptions::default())
            .run(&workload, &CounterKind::ALL)
            .unwrap();

        assert_eq!(runs.len(), 3);
        for run in &runs {
            assert_eq!(run.counts, vec![2, 0, 3, 1, 0], "{}", run.kind);
        }
        assert!(find_disagreements(&runs).is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let text = "ACGTTGCAACGTAGCTAGCTAGGATCCGATCGATCGTAGCTAGCATCGACTG$";
        let patterns: Vec<String> = (0..200)
            .map(|i| {
                let start = i % 40;
                let len = 1 + i % 7;
                text[start..(start + len).min(text.len())].to_string()
            })
            .collect();
        let refs: Vec<&str> = patterns.iter().map(String::as_str).collect();
        let workload = workload(text, &refs);

        let sequential = runner(1, SearchOptions::default())
            .run(&workload, &CounterKind::ALL)
            .unwrap();
        let parallel = runner(4, SearchOptions::default())
            .run(&workload, &CounterKind::ALL)
            .unwrap();

        for (s, p) in sequential.iter().zip(&parallel) {
            assert_eq!(s.counts, p.counts);
            assert_eq!(s.stats, p.stats);
        }
    }

    #[test]
    fn test_rejected_empty_pattern_fails_run() {
        let workload = workload("banana", &["ana", ""]);
        let search = SearchOptions {
            empty_pattern: EmptyPatternPolicy::Reject,
            ..Default::default()
        };
        let err = runner(1, search)
            .run(&workload, &[CounterKind::Binary])
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<SearchError>(),
            Some(SearchError::EmptyPattern)
        ));
        assert!(err.to_string().contains("pattern 1"));
    }

    #[test]
    fn test_legacy_window_disagreement_is_reported() {
        let workload = workload("banana", &["ban", "na"]);
        let search = SearchOptions {
            brute_window: BruteWindow::ExcludeLast,
            ..Default::default()
        };
        let runner = runner(1, search);
        let runs = runner.run(&workload, &CounterKind::ALL).unwrap();
        let report = runner.report(&workload, &runs);

        assert_eq!(report.pattern_count, 2);
        assert_eq!(report.counters.len(), 3);
        assert_eq!(
            report.disagreements,
            vec![Disagreement {
                pattern_index: 1,
                counts: vec![
                    (CounterKind::Brute, 1),
                    (CounterKind::Binary, 2),
                    (CounterKind::Lcp, 2)
                ],
            }]
        );
    }

    #[test]
    fn test_report_serializes() {
        let workload = workload("mississippi", &["ss"]);
        let runner = runner(2, SearchOptions::default());
        let runs = runner.run(&workload, &[CounterKind::Lcp]).unwrap();
        let report = runner.report(&workload, &runs);

        assert_eq!(report.threads, 2);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"counter\":\"lcp\""));
        assert!(json.contains("\"empty_pattern\":\"match-all\""));
    }
}
