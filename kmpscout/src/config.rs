use config::{Config as ConfigBuilder, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::SearchResult;
use crate::generator::{default_scenarios, TextSpec, DEFAULT_ALPHABET};

/// Configuration for the benchmark harness.
///
/// The matching engine itself takes no configuration; this only describes
/// which synthetic texts to generate and which segment counts to compare.
///
/// # Configuration Locations
///
/// Loaded from the following locations, later ones taking precedence:
/// 1. Global `$HOME/.config/kmpscout/config.yaml`
/// 2. Local `.kmpscout.yaml` in the current directory
/// 3. Custom config file specified via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # Segment counts to compare against the sequential search
/// segment_counts: [1, 2, 4, 8, 16]
///
/// # Seed for the text generator
/// seed: 42
///
/// # Symbols used for random filler
/// alphabet: "ACGT"
///
/// scenarios:
///   - length: 100000
///     pattern: "GATTACA"
///     embed_count: 20
///
/// # Number of match offsets printed per scenario
/// display_limit: 10
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "info"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Segment counts passed to the parallel search
    #[serde(default = "default_segment_counts")]
    pub segment_counts: Vec<usize>,

    /// Seed for text generation
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Filler alphabet for generated texts
    #[serde(default = "default_alphabet")]
    pub alphabet: String,

    /// Texts to generate and search
    #[serde(default = "default_scenarios")]
    pub scenarios: Vec<TextSpec>,

    /// How many match offsets to print per scenario
    #[serde(default = "default_display_limit")]
    pub display_limit: usize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_segment_counts() -> Vec<usize> {
    vec![1, 2, 4, 8, 16]
}

fn default_seed() -> u64 {
    42
}

fn default_alphabet() -> String {
    DEFAULT_ALPHABET.to_string()
}

fn default_display_limit() -> usize {
    10
}

pub fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            segment_counts: default_segment_counts(),
            seed: default_seed(),
            alphabet: default_alphabet(),
            scenarios: default_scenarios(),
            display_limit: default_display_limit(),
            log_level: default_log_level(),
        }
    }
}

/// Command-line overrides for [`BenchConfig`]; `None` keeps the file value
#[derive(Debug, Clone, Default)]
pub struct BenchOverrides {
    pub segment_counts: Option<Vec<usize>>,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
}

impl BenchConfig {
    /// Loads configuration from the default locations
    pub fn load() -> SearchResult<Self> {
        Self::load_from(None)
    }

    /// Loads configuration from the default locations plus a specific file
    pub fn load_from(config_path: Option<&Path>) -> SearchResult<Self> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("kmpscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".kmpscout.yaml")),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        // An explicitly requested file must exist
        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Merges command-line values over configuration file values
    pub fn merge_with_cli(mut self, cli: BenchOverrides) -> Self {
        if let Some(counts) = cli.segment_counts.filter(|c| !c.is_empty()) {
            self.segment_counts = counts;
        }
        if let Some(seed) = cli.seed {
            self.seed = seed;
        }
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        self
    }
}
