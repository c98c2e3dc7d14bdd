//! Random access and iteration example

use shardframe_core::{FrameStore, StoreConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Shardframe Random Access Example\n");

    let mut store = FrameStore::new(StoreConfig::new(8).growable(2.0))?;
    for i in 0..100u32 {
        // Variable-size frames: i % 17 copies of the low byte
        store.append(&vec![i as u8; i as usize % 17])?;
    }

    // Random access: one bucket lookup plus at most 7 header hops
    for index in [0usize, 7, 8, 63, 99] {
        let frame = store.get(index)?;
        println!("Frame {:>2}: {}", index, frame);
    }

    // Sequential access: one header read per frame
    let mut histogram = [0usize; 17];
    store.iterate_with_state(0, store.len(), &mut histogram, |_, histogram, frame| {
        histogram[frame.len() as usize] += 1;
    })?;
    println!("\nFrame length histogram: {:?}", histogram);

    // Raw range including length prefixes, e.g. for forwarding
    let raw = store.get_range(10, 5)?;
    println!("Frames 10..15 occupy {} bytes on the buffer", raw.len());

    match store.get(store.len()) {
        Ok(_) => unreachable!(),
        Err(e) => println!("\nReading past the end fails: {}", e),
    }

    Ok(())
}
