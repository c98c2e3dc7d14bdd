//! Fuzzing entry points for shardframe-core
//!
//! To use with cargo-fuzz:
//! 1. Install cargo-fuzz: cargo install cargo-fuzz
//! 2. Run fuzzer: cargo fuzz run fuzz_from_bytes

use shardframe_core::{FrameStore, StoreConfig};

/// Rebuild an index over arbitrary bytes and walk every frame
pub fn fuzz_from_bytes(data: &[u8]) {
    let bucket_size = data.first().map_or(1, |b| u32::from(*b % 16) + 1);

    // Either rejected or fully readable; never a panic
    if let Ok(store) = FrameStore::from_bytes(data, StoreConfig::new(bucket_size)) {
        if let Ok(frames) = store.frames() {
            for frame in frames {
                assert!(frame.is_ok());
            }
        }
        for i in 0..store.len() {
            assert!(store.get(i).is_ok());
        }
    }
}

/// Split arbitrary bytes into payloads, append them, and read them back
pub fn fuzz_append_get(data: &[u8]) {
    let Some((&head, rest)) = data.split_first() else {
        return;
    };
    let bucket_size = u32::from(head % 8) + 1;
    let config = StoreConfig::new(bucket_size)
        .initial_capacity(u64::from(head))
        .growable(1.5);
    let Ok(mut store) = FrameStore::new(config) else {
        return;
    };

    let payloads: Vec<&[u8]> = rest.split(|b| *b == 0).collect();
    for payload in &payloads {
        if store.append(payload).is_err() {
            return;
        }
    }

    for (i, payload) in payloads.iter().enumerate() {
        match store.get(i) {
            Ok(frame) => assert_eq!(frame.as_slice(), *payload),
            Err(e) => panic!("frame {} unreadable: {}", i, e),
        }
    }
}
