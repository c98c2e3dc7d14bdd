use crate::read_input;
use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use shardframe_core::{BucketIndex, FrameStore, StoreConfig, StoreStats};
use tracing::info;

#[derive(Serialize)]
struct Report<'a> {
    stats: StoreStats,
    buckets: &'a [BucketIndex],
}

pub fn execute(input: &str, bucket_size: u32, json: bool) -> Result<StoreStats> {
    info!("Inspecting file: {}", input);

    let data = read_input(input)?;
    info!("File size: {} bytes", data.len());

    let store = FrameStore::from_bytes(&data, StoreConfig::new(bucket_size))
        .with_context(|| format!("Failed to rebuild frame index for {}", input))?;
    let stats = store.stats();

    if json {
        let report = Report {
            stats,
            buckets: store.buckets(),
        };
        let json = serde_json::to_string_pretty(&report)
            .context("Failed to serialize inspection report")?;
        println!("{}", json);
        return Ok(stats);
    }

    println!("\n=== Store Summary ===");
    println!("Frames:            {}", stats.frames);
    println!("Buckets:           {} ({} frames each)", stats.buckets, stats.bucket_size);
    println!("Data length:       {} bytes", stats.data_len);
    println!("Average payload:   {:.1} bytes", stats.average_payload_len());
    println!();

    println!("=== Buckets ===");
    for (i, bucket) in store.buckets().iter().enumerate() {
        println!(
            "Bucket {} @ offset {}: {} bytes",
            i,
            bucket.offset(),
            bucket.total_length()
        );
    }

    println!("\n{} Index rebuilt from {} bytes", "✓".green(), data.len());
    Ok(stats)
}
