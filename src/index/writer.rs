//! Dataset writer
//!
//! Writes datasets in the line format read by [`super::dataset::parse_lines`]
//! or as JSON.

use super::dataset::Dataset;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes dataset files
pub struct DatasetWriter;

impl DatasetWriter {
    /// Write a dataset, picking the format from the extension
    pub fn write(path: &Path, dataset: &Dataset) -> Result<()> {
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let file = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut out = BufWriter::with_capacity(65536, file);

        if is_json {
            serde_json::to_writer(&mut out, dataset).context("Failed to serialize dataset")?;
        } else {
            Self::write_lines(&mut out, dataset)?;
        }

        out.flush()?;
        Ok(())
    }

    /// Write the line format to any writer
    pub fn write_lines<W: Write>(out: &mut W, dataset: &Dataset) -> Result<()> {
        writeln!(out, "{}", dataset.text.len())?;
        writeln!(out, "{}", dataset.text)?;
        write_numbers(out, &dataset.suffix_array)?;
        write_numbers(out, dataset.lcp.as_deref().unwrap_or(&[]))?;
        writeln!(out, "{}", dataset.patterns.len())?;
        for pattern in &dataset.patterns {
            writeln!(out, "{}", pattern)?;
        }
        Ok(())
    }
}

fn write_numbers<W: Write>(out: &mut W, values: &[usize]) -> Result<()> {
    let mut first = true;
    for value in values {
        if !first {
            out.write_all(b" ")?;
        }
        write!(out, "{}", value)?;
        first = false;
    }
    out.write_all(b"\n")?;
    Ok(())
}
