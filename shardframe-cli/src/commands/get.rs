use crate::read_input;
use anyhow::{Context, Result};
use shardframe_core::{FrameStore, StoreConfig};
use tracing::info;

/// Print frames `index..index + count` and return the rendered payloads
pub fn execute(
    input: &str,
    bucket_size: u32,
    index: usize,
    count: usize,
    as_hex: bool,
) -> Result<Vec<String>> {
    info!("Reading {} frame(s) from {} starting at {}", count, input, index);

    let data = read_input(input)?;
    let store = FrameStore::from_bytes(&data, StoreConfig::new(bucket_size))
        .with_context(|| format!("Failed to rebuild frame index for {}", input))?;

    let end = index.saturating_add(count);
    let mut rendered = Vec::with_capacity(count);
    store
        .iterate(index, end, |step, frame| {
            let text = if as_hex {
                hex::encode(frame.as_slice())
            } else {
                String::from_utf8_lossy(frame.as_slice()).into_owned()
            };
            println!("Frame {}: {}", index + step, text);
            rendered.push(text);
        })
        .with_context(|| {
            format!(
                "Frames {}..{} out of range ({} frames in store)",
                index,
                end,
                store.len()
            )
        })?;

    Ok(rendered)
}
