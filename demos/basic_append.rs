//! Basic append example

use shardframe_core::{FrameStore, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Shardframe Basic Append Example\n");

    // Small buffer on purpose so the store has to grow
    let config = StoreConfig::new(4).initial_capacity(32).growable(1.5);
    let mut store = FrameStore::new(config)?;

    for i in 1..=10 {
        let payload = format!("This is frame {} with some telemetry data", i);
        let bucket = store.append_str(&payload)?;

        println!(
            "Frame {:>2}: {} bytes, bucket @ {} now {} bytes, capacity {}",
            i,
            payload.len(),
            bucket.offset(),
            bucket.total_length(),
            store.capacity()
        );
    }

    let stats = store.stats();
    println!(
        "\n{} frames in {} buckets, {} of {} bytes used ({:.1}%)",
        stats.frames,
        stats.buckets,
        stats.data_len,
        stats.capacity,
        stats.utilization()
    );

    std::fs::write("example_output.frames", store.to_bytes()?)?;
    println!("Wrote {} bytes to example_output.frames", store.data_len());
    println!("Use 'shardframe inspect --input example_output.frames' to read it back");

    Ok(())
}
