use crate::{read_input, InputFormat, StoreOptions};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use shardframe_core::{FrameStore, StoreStats};
use std::fs;
use tracing::{debug, info};

pub fn execute(
    input: &str,
    output: &str,
    format: InputFormat,
    options: &StoreOptions,
    progress: bool,
) -> Result<StoreStats> {
    info!("Packing data from {} to {}", input, output);

    let config = options.resolve()?;
    let data = read_input(input)?;
    let content = String::from_utf8(data).context("Input is not valid UTF-8")?;

    let payloads = parse_payloads(&content, format)?;
    info!("Found {} payloads to pack", payloads.len());

    let mut store = FrameStore::new(config).context("Failed to create frame store")?;

    let bar = if progress {
        let bar = ProgressBar::new(payloads.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} frames ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    } else {
        None
    };

    for (i, payload) in payloads.iter().enumerate() {
        let bytes = serde_json::to_vec(payload)
            .with_context(|| format!("Failed to serialize payload {}", i))?;

        let bucket = store
            .append(&bytes)
            .with_context(|| format!("Failed to append frame {}", i))?;

        debug!(
            "Packed frame {} ({} bytes) into bucket at offset {}",
            i,
            bytes.len(),
            bucket.offset()
        );

        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = bar {
        bar.finish_and_clear();
    }

    let bytes = store.to_bytes().context("Failed to read back store contents")?;
    fs::write(output, &bytes)
        .with_context(|| format!("Failed to write output file: {}", output))?;

    let stats = store.stats();
    info!(
        "Successfully packed {} frames ({} bytes total, {} buckets)",
        stats.frames, stats.data_len, stats.buckets
    );

    Ok(stats)
}

/// Split the input into one JSON value per frame
pub fn parse_payloads(content: &str, format: InputFormat) -> Result<Vec<Value>> {
    match format {
        InputFormat::Json => {
            serde_json::from_str(content).context("Failed to parse JSON input as an array")
        }
        InputFormat::Jsonl => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Failed to parse JSON on line {}", n + 1))
            })
            .collect(),
    }
}
