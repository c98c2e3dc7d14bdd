//! Byte-exact layout vectors for the on-buffer frame format
//!
//! Each vector pins the bytes a given append sequence must produce, and that
//! adopting those bytes rebuilds the same frames and buckets.

use shardframe_core::{BucketIndex, FrameStore, StoreConfig, StoreError};

struct Vector {
    name: &'static str,
    bucket_size: u32,
    payloads: &'static [&'static [u8]],
    hex: &'static str,
    buckets: &'static [(u64, u32)],
}

const VECTORS: &[Vector] = &[
    Vector {
        name: "empty store",
        bucket_size: 4,
        payloads: &[],
        hex: "",
        buckets: &[(0, 0)],
    },
    Vector {
        name: "single empty frame",
        bucket_size: 4,
        payloads: &[b""],
        hex: "00000000",
        buckets: &[(0, 4)],
    },
    Vector {
        name: "single short frame",
        bucket_size: 4,
        payloads: &[b"hi"],
        hex: "020000006869",
        buckets: &[(0, 6)],
    },
    Vector {
        name: "frames spanning buckets",
        bucket_size: 2,
        payloads: &[b"a", b"", b"xyz"],
        hex: "0100000061000000000300000078797a",
        buckets: &[(0, 9), (9, 7)],
    },
    Vector {
        name: "one frame per bucket",
        bucket_size: 1,
        payloads: &[b"ab", b"c"],
        hex: "0200000061620100000063",
        buckets: &[(0, 6), (6, 5)],
    },
];

fn expected_buckets(vector: &Vector) -> Vec<BucketIndex> {
    vector
        .buckets
        .iter()
        .map(|&(offset, len)| BucketIndex::new(offset, len))
        .collect()
}

#[test]
fn test_vectors_encode() {
    for vector in VECTORS {
        let mut store = FrameStore::new(
            StoreConfig::new(vector.bucket_size)
                .initial_capacity(8)
                .growable(1.5),
        )
        .unwrap();
        store.extend(vector.payloads).unwrap();

        assert_eq!(
            hex::encode(store.as_bytes().unwrap().as_slice()),
            vector.hex,
            "{}",
            vector.name
        );
        assert_eq!(store.buckets(), expected_buckets(vector).as_slice(), "{}", vector.name);
    }
}

#[test]
fn test_vectors_decode() {
    for vector in VECTORS {
        let bytes = hex::decode(vector.hex).unwrap();
        let store = FrameStore::from_bytes(&bytes, StoreConfig::new(vector.bucket_size)).unwrap();

        assert_eq!(store.len(), vector.payloads.len(), "{}", vector.name);
        assert_eq!(store.buckets(), expected_buckets(vector).as_slice(), "{}", vector.name);
        for (i, payload) in vector.payloads.iter().enumerate() {
            assert_eq!(store.get(i).unwrap().as_slice(), *payload, "{}", vector.name);
        }
    }
}

#[test]
fn test_truncated_vectors_rejected() {
    for vector in VECTORS.iter().filter(|v| !v.hex.is_empty()) {
        let bytes = hex::decode(vector.hex).unwrap();
        let truncated = &bytes[..bytes.len() - 1];

        let err = FrameStore::from_bytes(truncated, StoreConfig::new(vector.bucket_size)).unwrap_err();
        assert!(
            matches!(err, StoreError::CorruptFrame { .. }),
            "{}: {:?}",
            vector.name,
            err
        );
    }
}
