//! Application configuration
//!
//! Stored as JSON in the platform config directory
//! (`<config_dir>/sacount/config.json`). A missing file means defaults;
//! command-line flags override whatever the file says.

use crate::index::{Alphabet, StoreOptions};
use crate::search::{
    BruteWindow, CounterKind, EmptyPatternPolicy, LcpMaintenance, RunnerOptions, SearchOptions,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "sacount";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Worker threads for pattern sharding (0 = every core, 1 = inline)
    #[serde(default = "default_threads")]
    pub threads: usize,

    #[serde(default)]
    pub empty_pattern: EmptyPatternPolicy,

    #[serde(default)]
    pub brute_window: BruteWindow,

    #[serde(default)]
    pub lcp_maintenance: LcpMaintenance,

    /// Check suffix order at load time
    #[serde(default = "default_true")]
    pub validate_order: bool,

    /// Check the LCP array at load time
    #[serde(default = "default_true")]
    pub validate_lcp: bool,

    /// Legal symbols; `None` allows every byte between the sentinels
    #[serde(default)]
    pub alphabet: Option<String>,

    /// Counters to run, in order
    #[serde(default = "default_counters")]
    pub counters: Vec<CounterKind>,
}

fn default_threads() -> usize {
    1
}

fn default_true() -> bool {
    true
}

fn default_counters() -> Vec<CounterKind> {
    CounterKind::ALL.to_vec()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            threads: default_threads(),
            empty_pattern: EmptyPatternPolicy::default(),
            brute_window: BruteWindow::default(),
            lcp_maintenance: LcpMaintenance::default(),
            validate_order: true,
            validate_lcp: true,
            alphabet: None,
            counters: default_counters(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, or return defaults if there is none
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: AppConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Save to an explicit path, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Drop repeated counters, keeping the first occurrence of each
    pub fn dedup_counters(&mut self) {
        let mut seen = Vec::with_capacity(self.counters.len());
        self.counters.retain(|kind| {
            if seen.contains(kind) {
                false
            } else {
                seen.push(*kind);
                true
            }
        });
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            empty_pattern: self.empty_pattern,
            brute_window: self.brute_window,
            lcp_maintenance: self.lcp_maintenance,
        }
    }

    pub fn store_options(&self) -> Result<StoreOptions> {
        let alphabet = match &self.alphabet {
            Some(symbols) => Alphabet::from_symbols(symbols).context("Invalid alphabet in config")?,
            None => Alphabet::default(),
        };

        Ok(StoreOptions {
            alphabet,
            validate_order: self.validate_order,
            validate_lcp: self.validate_lcp,
        })
    }

    pub fn runner_options(&self, show_progress: bool) -> RunnerOptions {
        RunnerOptions {
            search: self.search_options(),
            threads: self.threads,
            show_progress,
        }
    }
}

/// Path of the config file in the platform config directory
pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
