//! Result streams and the run summary

use crate::index::DatasetMeta;
use crate::search::{CounterRun, Disagreement, RunReport};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Write one count per line
pub fn write_stream<W: Write>(out: &mut W, counts: &[usize]) -> io::Result<()> {
    for count in counts {
        writeln!(out, "{}", count)?;
    }
    Ok(())
}

/// Write each run to `<dir>/<counter>.out`, returning the written paths
pub fn write_results(dir: &Path, runs: &[CounterRun]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(runs.len());
    for run in runs {
        let path = dir.join(run.kind.output_file());
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::with_capacity(65536, file);
        write_stream(&mut out, &run.counts)?;
        out.flush()?;
        written.push(path);
    }

    Ok(written)
}

/// Write the run report as pretty JSON
pub fn write_report(path: &Path, report: &RunReport) -> Result<()> {
    let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn color_choice(color: bool) -> ColorChoice {
    if color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

/// Print per-counter timings and the agreement verdict to stderr
pub fn print_summary(report: &RunReport, color: bool) -> io::Result<()> {
    let mut stderr = StandardStream::stderr(color_choice(color));

    writeln!(
        stderr,
        "{} patterns over {} characters ({} thread{})",
        report.pattern_count,
        report.text_len,
        report.threads,
        if report.threads == 1 { "" } else { "s" }
    )?;

    for timing in &report.counters {
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        write!(stderr, "{:>8}", timing.counter.name())?;
        stderr.reset()?;
        writeln!(
            stderr,
            "  {:>10.3} ms  {:>12} comparisons  {:>14} chars",
            timing.elapsed_secs * 1000.0,
            timing.stats.comparisons,
            timing.stats.chars_compared
        )?;
    }

    if report.counters.len() > 1 {
        print_verdict(&mut stderr, &report.disagreements)?;
    }

    Ok(())
}

fn print_verdict(stderr: &mut StandardStream, disagreements: &[Disagreement]) -> io::Result<()> {
    if disagreements.is_empty() {
        stderr.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        writeln!(stderr, "all counters agree")?;
        stderr.reset()?;
        return Ok(());
    }

    stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    writeln!(stderr, "counters disagree on {} pattern(s)", disagreements.len())?;
    stderr.reset()?;

    for d in disagreements.iter().take(10) {
        let counts: Vec<String> = d
            .counts
            .iter()
            .map(|(kind, count)| format!("{}={}", kind, count))
            .collect();
        writeln!(stderr, "  pattern {}: {}", d.pattern_index, counts.join(" "))?;
    }
    if disagreements.len() > 10 {
        writeln!(stderr, "  ... and {} more", disagreements.len() - 10)?;
    }

    Ok(())
}

/// Print dataset statistics to stdout
pub fn print_meta(meta: &DatasetMeta, color: bool) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(color_choice(color));

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true))?;
    writeln!(stdout, "Dataset OK")?;
    stdout.reset()?;

    writeln!(stdout, "Text length:      {}", meta.text_len)?;
    writeln!(stdout, "Distinct symbols: {}", meta.distinct_symbols)?;
    writeln!(stdout, "Patterns:         {}", meta.pattern_count)?;
    writeln!(stdout, "Longest pattern:  {}", meta.max_pattern_len)?;
    if meta.has_lcp {
        writeln!(stdout, "Max LCP:          {}", meta.max_lcp)?;
        writeln!(stdout, "Mean LCP:         {:.2}", meta.mean_lcp)?;
    } else {
        writeln!(stdout, "LCP array:        not supplied")?;
    }

    Ok(())
}
