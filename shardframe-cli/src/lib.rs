//! Library entry for shardframe-cli used by integration tests and embedding.

pub mod commands;

use anyhow::{Context, Result};
use shardframe_core::constants::DEFAULT_EXPANSION_FACTOR;
use shardframe_core::{ExpansionPolicy, StoreConfig};
use std::fs;
use std::io::{self, Read};

// Re-export commands for convenience
pub use commands::*;

/// How `pack` splits its input into payloads
#[derive(Copy, Clone, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum InputFormat {
    /// A single JSON array; each element becomes one frame
    Json,
    /// One JSON value per line
    Jsonl,
}

/// Store parameters shared by the commands that build a store
#[derive(Clone, Debug, Default, clap::Args)]
pub struct StoreOptions {
    /// JSON file with a base store configuration
    #[arg(long)]
    pub config: Option<String>,

    /// Frames per bucket
    #[arg(long)]
    pub bucket_size: Option<u32>,

    /// Initial buffer capacity in bytes
    #[arg(long)]
    pub capacity: Option<u64>,

    /// Buffer expansion factor
    #[arg(long)]
    pub factor: Option<f32>,

    /// Fail instead of growing the buffer when it fills up
    #[arg(long)]
    pub no_expand: bool,
}

impl StoreOptions {
    /// Merge the optional config file with command-line overrides
    ///
    /// Without a config file the buffer may grow, since the CLI cannot know
    /// the input size up front.
    pub fn resolve(&self) -> Result<StoreConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse config file: {}", path))?
            }
            None => StoreConfig::default().growable(DEFAULT_EXPANSION_FACTOR),
        };

        if let Some(bucket_size) = self.bucket_size {
            config.bucket_size = bucket_size;
        }
        if let Some(capacity) = self.capacity {
            config.initial_capacity = capacity;
        }
        if let Some(factor) = self.factor {
            config.expansion = ExpansionPolicy::growable(factor);
        }
        if self.no_expand {
            config.expansion.allowed = false;
        }

        config.validate().context("Invalid store configuration")?;
        Ok(config)
    }
}

/// Read a file, or stdin when `input` is `-`
pub fn read_input(input: &str) -> Result<Vec<u8>> {
    if input == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        fs::read(input).with_context(|| format!("Failed to read input file: {}", input))
    }
}
