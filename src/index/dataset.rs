//! Dataset loading
//!
//! A dataset is the whole input of a run: text, suffix array, optional LCP
//! array and the ordered pattern list. Two serializations are accepted:
//!
//! - the line format (one field per line, see [`parse_lines`])
//! - JSON (`*.json`), a serde rendition of [`Dataset`]
//!
//! Inputs are memory-mapped; the line format is split with `memchr`.

use super::store::{StoreOptions, TextIndexStore};
use super::types::TextPosition;
use crate::error::{Result, SearchError};
use anyhow::Context;
use memchr::memchr_iter;
use memmap2::Mmap;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

/// Raw dataset as read from disk, before validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub text: String,
    pub suffix_array: Vec<TextPosition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lcp: Option<Vec<usize>>,
    #[serde(default)]
    pub patterns: Vec<String>,
}

/// A validated store together with its validated patterns
#[derive(Debug, Clone)]
pub struct Workload {
    pub store: TextIndexStore,
    pub patterns: Vec<Vec<u8>>,
}

impl Dataset {
    /// Validate everything and build the store
    ///
    /// Fails on the first violation; no search may run on a dataset that
    /// did not pass this step.
    pub fn into_workload(self, options: &StoreOptions) -> Result<Workload> {
        let store = TextIndexStore::with_options(
            self.text.into_bytes(),
            self.suffix_array,
            self.lcp,
            options,
        )?;

        let patterns: Vec<Vec<u8>> = self.patterns.into_iter().map(String::into_bytes).collect();
        for (index, pattern) in patterns.iter().enumerate() {
            store.validate_pattern(index, pattern)?;
        }

        tracing::debug!(
            text_len = store.len(),
            patterns = patterns.len(),
            has_lcp = store.lcp().is_some(),
            "dataset validated"
        );

        Ok(Workload { store, patterns })
    }
}

/// Open a dataset file, picking the format from the extension
pub fn open(path: &Path) -> anyhow::Result<Dataset> {
    let file = File::open(path)
        .map_err(SearchError::from)
        .with_context(|| format!("Failed to open dataset {}", path.display()))?;
    let mmap = unsafe { Mmap::map(&file) }
        .map_err(SearchError::from)
        .with_context(|| format!("Failed to map dataset {}", path.display()))?;

    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let dataset = if is_json {
        serde_json::from_slice(&mmap)
            .map_err(|e| SearchError::malformed(format!("invalid JSON dataset: {}", e)))
    } else {
        parse_lines(&mmap)
    };

    dataset.with_context(|| format!("Failed to load dataset {}", path.display()))
}

/// Parse the line format:
///
/// ```text
/// n
/// <text>
/// <SA[0]> <SA[1]> ... <SA[n-1]>
/// <LCP[0]> <LCP[1]> ... <LCP[n-1]>   (may be empty)
/// k
/// <pattern 1>
/// ...
/// <pattern k>
/// ```
///
/// Trailing `\r` is stripped from every line; no other whitespace is
/// trimmed from the text or the patterns.
pub fn parse_lines(data: &[u8]) -> Result<Dataset> {
    let mut lines = Lines::new(data);

    let declared_len = parse_count(lines.next_required("text length")?, &lines)?;

    let text_line = lines.next_required("text")?;
    let text = std::str::from_utf8(text_line)
        .map_err(|_| lines.error("text is not valid UTF-8"))?
        .to_string();
    if text.len() != declared_len {
        return Err(lines.error(&format!(
            "declared length {} does not match text length {}",
            declared_len,
            text.len()
        )));
    }

    let suffix_array = parse_numbers(lines.next_required("suffix array")?, &lines)?;

    let lcp_line = lines.next_required("LCP array")?;
    let lcp = if lcp_line.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        Some(parse_numbers(lcp_line, &lines)?)
    };

    let pattern_count = parse_count(lines.next_required("pattern count")?, &lines)?;
    let mut patterns = Vec::with_capacity(pattern_count.min(1 << 20));
    for i in 0..pattern_count {
        let line = lines
            .next()
            .ok_or_else(|| lines.error(&format!("expected {} patterns, found {}", pattern_count, i)))?;
        let pattern = std::str::from_utf8(line)
            .map_err(|_| lines.error("pattern is not valid UTF-8"))?;
        patterns.push(pattern.to_string());
    }

    let extra = lines.filter(|line| !line.is_empty()).count();
    if extra > 0 {
        tracing::warn!(extra, "ignoring non-empty lines after the last pattern");
    }

    Ok(Dataset {
        text,
        suffix_array,
        lcp,
        patterns,
    })
}

/// Line splitter that tracks the current line number for error messages
struct Lines<'a> {
    data: &'a [u8],
    ends: memchr::Memchr<'a>,
    start: usize,
    line_no: usize,
    done: bool,
}

impl<'a> Lines<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            ends: memchr_iter(b'\n', data),
            start: 0,
            line_no: 0,
            done: false,
        }
    }

    fn next_required(&mut self, what: &str) -> Result<&'a [u8]> {
        self.next()
            .ok_or_else(|| self.error(&format!("unexpected end of input, expected {}", what)))
    }

    fn error(&self, msg: &str) -> SearchError {
        SearchError::malformed(format!("line {}: {}", self.line_no, msg))
    }
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<&'a [u8]> {
        if self.done {
            return None;
        }

        let line = match self.ends.next() {
            Some(end) => {
                let line = &self.data[self.start..end];
                self.start = end + 1;
                line
            }
            None => {
                self.done = true;
                // A final newline does not start another line
                if self.start >= self.data.len() {
                    return None;
                }
                &self.data[self.start..]
            }
        };

        self.line_no += 1;
        Some(line.strip_suffix(b"\r").unwrap_or(line))
    }
}

fn parse_count(line: &[u8], lines: &Lines<'_>) -> Result<usize> {
    std::str::from_utf8(line)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(|| lines.error("expected a non-negative integer"))
}

fn parse_numbers(line: &[u8], lines: &Lines<'_>) -> Result<Vec<usize>> {
    let s = std::str::from_utf8(line).map_err(|_| lines.error("expected integers"))?;
    s.split_ascii_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| lines.error(&format!("invalid integer {:?}", tok)))
        })
        .collect()
}
