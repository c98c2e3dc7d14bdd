//! Sparse offset index over the frame buffer

use crate::constants::MAX_BUCKET_LENGTH;
use crate::error::StoreError;
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

/// Location of a contiguous run of frames inside the buffer
///
/// `offset` is fixed when the bucket is created; `total_length` only grows
/// as frames are appended to the bucket.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BucketIndex {
    offset: u64,
    total_length: u32,
}

impl BucketIndex {
    /// Create a bucket descriptor
    pub const fn new(offset: u64, total_length: u32) -> Self {
        Self {
            offset,
            total_length,
        }
    }

    /// Byte offset of the bucket's first frame
    #[inline]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Bytes occupied by the bucket's frames, prefixes included
    #[inline]
    pub const fn total_length(&self) -> u32 {
        self.total_length
    }

    /// Offset one past the bucket's last byte
    #[inline]
    pub const fn end_offset(&self) -> u64 {
        self.offset + self.total_length as u64
    }

    /// The length this bucket would have after taking `frame_size` more bytes
    pub(crate) fn length_after(&self, frame_size: u64) -> Result<u32, StoreError> {
        let total = u64::from(self.total_length) + frame_size;
        if total > MAX_BUCKET_LENGTH {
            return Err(StoreError::FrameTooLarge(frame_size));
        }
        Ok(total as u32)
    }

    #[inline]
    pub(crate) fn set_total_length(&mut self, total_length: u32) {
        debug_assert!(total_length >= self.total_length);
        self.total_length = total_length;
    }
}

/// Ordered, append-only list of buckets
///
/// Holds at least one bucket until released.
#[derive(Debug, Clone)]
pub(crate) struct BucketTable {
    buckets: Vec<BucketIndex>,
}

impl BucketTable {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut buckets = Vec::with_capacity(capacity.max(1));
        buckets.push(BucketIndex::default());
        Self { buckets }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    pub(crate) fn get(&self, index: usize) -> Option<&BucketIndex> {
        self.buckets.get(index)
    }

    #[inline]
    pub(crate) fn last(&self) -> &BucketIndex {
        &self.buckets[self.buckets.len() - 1]
    }

    #[inline]
    pub(crate) fn last_mut(&mut self) -> &mut BucketIndex {
        let last = self.buckets.len() - 1;
        &mut self.buckets[last]
    }

    /// Open a new, empty bucket right after the last one
    pub(crate) fn open_next(&mut self) -> BucketIndex {
        let bucket = BucketIndex::new(self.last().end_offset(), 0);
        self.buckets.push(bucket);
        bucket
    }

    /// Free the list entirely; only valid for a disposed store
    pub(crate) fn release(&mut self) {
        self.buckets = Vec::new();
    }

    pub(crate) fn reset(&mut self) {
        self.buckets.clear();
        self.buckets.push(BucketIndex::default());
    }

    #[inline]
    pub(crate) fn as_slice(&self) -> &[BucketIndex] {
        &self.buckets
    }
}
