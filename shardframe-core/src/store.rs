//! Bucket-indexed store of length-prefixed frames
//!
//! Frames are packed back-to-back into a [`GrowableBuffer`]:
//!
//! ```text
//! [i32 LE length N][N payload bytes][i32 LE length M][M payload bytes]...
//! ```
//!
//! Every `bucket_size` frames a new [`BucketIndex`] records where the run
//! starts, so reaching frame `i` costs one table lookup plus at most
//! `bucket_size - 1` header hops.

use crate::bucket::{BucketIndex, BucketTable};
use crate::buffer::GrowableBuffer;
use crate::config::StoreConfig;
use crate::constants::{LENGTH_PREFIX_SIZE, MAX_PAYLOAD_SIZE};
use crate::error::StoreError;
use crate::view::MemoryView;
use alloc::format;
use bytes::{Buf, BufMut, Bytes};
use serde::{Deserialize, Serialize};

#[cfg(feature = "logging")]
use tracing::{debug, trace};

const PREFIX: u64 = LENGTH_PREFIX_SIZE as u64;

/// Append-only collection of variable-sized binary frames
///
/// Views returned by [`FrameStore::get`] and friends borrow the store, so the
/// borrow checker rejects any mutation (which may relocate the buffer) while
/// a view is still alive.
pub struct FrameStore {
    /// `None` once the store has been disposed
    buffer: Option<GrowableBuffer>,
    buckets: BucketTable,
    frame_count: usize,
    data_end_offset: u64,
    bucket_size: u32,
}

impl FrameStore {
    /// Create an empty store with a freshly allocated buffer
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let buffer = GrowableBuffer::with_capacity(config.initial_capacity, config.expansion)?;
        Ok(Self {
            buffer: Some(buffer),
            buckets: BucketTable::with_capacity(config.expected_buckets()),
            frame_count: 0,
            data_end_offset: 0,
            bucket_size: config.bucket_size,
        })
    }

    /// Create an empty store writing into a caller-provided buffer
    ///
    /// Existing buffer contents are treated as free space and will be overwritten.
    pub fn with_buffer(buffer: GrowableBuffer, bucket_size: u32) -> Result<Self, StoreError> {
        validate_bucket_size(bucket_size)?;

        Ok(Self {
            buffer: Some(buffer),
            buckets: BucketTable::with_capacity(1),
            frame_count: 0,
            data_end_offset: 0,
            bucket_size,
        })
    }

    /// Adopt a buffer whose first `data_len` bytes are already framed data
    ///
    /// The bucket index is rebuilt with a single linear scan over the headers.
    /// Fails with [`StoreError::InvalidArgument`] if `data_len` exceeds the
    /// buffer, or [`StoreError::CorruptFrame`] if a header runs past `data_len`.
    pub fn from_buffer(
        buffer: GrowableBuffer,
        data_len: u64,
        bucket_size: u32,
    ) -> Result<Self, StoreError> {
        validate_bucket_size(bucket_size)?;

        if data_len > buffer.capacity() {
            return Err(StoreError::InvalidArgument(format!(
                "declared data length {} exceeds buffer capacity {}",
                data_len,
                buffer.capacity()
            )));
        }

        let data = &buffer.as_slice()[..data_len as usize];
        let mut buckets = BucketTable::with_capacity(1);
        let mut frame_count = 0usize;
        let mut cursor = FrameCursor::new(data, 0);

        while cursor.offset < data_len {
            let frame_offset = cursor.offset;
            cursor.skip()?;
            let frame_size = cursor.offset - frame_offset;

            if frame_count > 0 && frame_count % bucket_size as usize == 0 {
                buckets.open_next();
            }
            let total = buckets.last().length_after(frame_size)?;
            buckets.last_mut().set_total_length(total);
            frame_count += 1;
        }

        #[cfg(feature = "logging")]
        debug!(
            "Rebuilt index: {} frames in {} buckets over {} bytes",
            frame_count,
            buckets.len(),
            data_len
        );

        Ok(Self {
            buffer: Some(buffer),
            buckets,
            frame_count,
            data_end_offset: data_len,
            bucket_size,
        })
    }

    /// Copy framed bytes into a new buffer and rebuild the index over them
    pub fn from_bytes(data: &[u8], config: StoreConfig) -> Result<Self, StoreError> {
        config.validate()?;

        let data_len = data.len() as u64;
        let mut buffer = GrowableBuffer::with_capacity(
            config.initial_capacity.max(data_len),
            config.expansion,
        )?;
        buffer.as_mut_slice()[..data.len()].copy_from_slice(data);

        Self::from_buffer(buffer, data_len, config.bucket_size)
    }

    /// Append one frame and return the updated descriptor of its bucket
    ///
    /// Fails with [`StoreError::OutOfMemory`] when the buffer is full and may
    /// not grow, or [`StoreError::FrameTooLarge`] when the frame does not fit
    /// the 32-bit length fields. A failed append leaves the store unchanged.
    pub fn append(&mut self, payload: &[u8]) -> Result<BucketIndex, StoreError> {
        let buffer = self.buffer.as_mut().ok_or(StoreError::Disposed)?;

        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(StoreError::FrameTooLarge(payload.len() as u64));
        }
        let frame_size = PREFIX + payload.len() as u64;

        let needs_bucket = self.frame_count / self.bucket_size as usize == self.buckets.len();
        let new_total = if needs_bucket {
            BucketIndex::default().length_after(frame_size)?
        } else {
            self.buckets.last().length_after(frame_size)?
        };

        let write_at = self.buckets.last().end_offset();
        buffer.ensure_capacity(write_at + frame_size)?;

        let start = write_at as usize;
        let mut dest = &mut buffer.as_mut_slice()[start..start + frame_size as usize];
        dest.put_i32_le(payload.len() as i32);
        dest.put_slice(payload);

        if needs_bucket {
            let _opened = self.buckets.open_next();

            #[cfg(feature = "logging")]
            trace!(
                "Opened bucket {} at offset {}",
                self.buckets.len() - 1,
                _opened.offset()
            );
        }

        let bucket = self.buckets.last_mut();
        bucket.set_total_length(new_total);
        let bucket = *bucket;

        self.frame_count += 1;
        self.data_end_offset += frame_size;
        Ok(bucket)
    }

    /// Append the UTF-8 bytes of `text` as one frame
    pub fn append_str(&mut self, text: &str) -> Result<BucketIndex, StoreError> {
        self.append(text.as_bytes())
    }

    /// Append every payload in order, stopping at the first failure
    ///
    /// Returns the number of frames appended. Frames appended before a
    /// failure stay in the store.
    pub fn extend<I, P>(&mut self, payloads: I) -> Result<usize, StoreError>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<[u8]>,
    {
        let mut appended = 0;
        for payload in payloads {
            self.append(payload.as_ref())?;
            appended += 1;
        }
        Ok(appended)
    }

    /// Zero-copy view of the payload of frame `index`
    pub fn get(&self, index: usize) -> Result<MemoryView<'_, u8>, StoreError> {
        self.seek(index)?.peek_frame()
    }

    /// Zero-copy view of frame `index` including its 4-byte length prefix
    pub fn get_with_prefix(&self, index: usize) -> Result<MemoryView<'_, u8>, StoreError> {
        let cursor = self.seek(index)?;
        let len = cursor.frame_len()?;
        MemoryView::with_range(cursor.data, cursor.offset, PREFIX + len)
    }

    /// One contiguous view over `count` frames starting at `start`, prefixes included
    pub fn get_range(&self, start: usize, count: usize) -> Result<MemoryView<'_, u8>, StoreError> {
        if count == 0 {
            return Err(StoreError::InvalidArgument(
                "range count must be greater than zero".into(),
            ));
        }
        let end = start
            .checked_add(count)
            .ok_or_else(|| StoreError::out_of_range(u64::MAX, self.frame_count))?;
        self.check_range(start, end)?;

        let first = self.seek(start)?;
        let mut last = self.seek(end - 1)?;
        last.skip()?;

        MemoryView::with_range(first.data, first.offset, last.offset - first.offset)
    }

    /// Visit frames `start..end` in order with `(step, payload)`
    ///
    /// Seeks once, then reads each header exactly once. Fails with
    /// [`StoreError::OutOfRange`] before visiting anything if the range is
    /// inverted or extends past the last frame.
    pub fn iterate<F>(&self, start: usize, end: usize, mut visitor: F) -> Result<(), StoreError>
    where
        F: FnMut(usize, MemoryView<'_, u8>),
    {
        for (step, frame) in self.range(start, end)?.enumerate() {
            visitor(step, frame?);
        }
        Ok(())
    }

    /// Like [`FrameStore::iterate`], threading `state` through every call
    pub fn iterate_with_state<S, F>(
        &self,
        start: usize,
        end: usize,
        state: &mut S,
        mut visitor: F,
    ) -> Result<(), StoreError>
    where
        F: FnMut(usize, &mut S, MemoryView<'_, u8>),
    {
        self.iterate(start, end, |step, frame| visitor(step, state, frame))
    }

    /// Iterator over frames `start..end`
    pub fn range(&self, start: usize, end: usize) -> Result<Frames<'_>, StoreError> {
        self.check_range(start, end)?;

        let cursor = if start == end {
            FrameCursor::new(self.written()?, self.data_end_offset)
        } else {
            self.seek(start)?
        };

        Ok(Frames {
            cursor,
            remaining: end - start,
        })
    }

    /// Iterator over every frame
    pub fn frames(&self) -> Result<Frames<'_>, StoreError> {
        self.range(0, self.frame_count)
    }

    /// Drop every frame and start over with a single empty bucket
    ///
    /// With `clear_buffer` the whole buffer is zero-filled so stale bytes
    /// cannot leak into whatever is written next.
    pub fn reset(&mut self, clear_buffer: bool) -> Result<(), StoreError> {
        let buffer = self.buffer.as_mut().ok_or(StoreError::Disposed)?;
        if clear_buffer {
            buffer.zero();
        }

        self.buckets.reset();
        self.frame_count = 0;
        self.data_end_offset = 0;

        #[cfg(feature = "logging")]
        debug!("Reset frame store (clear_buffer: {})", clear_buffer);

        Ok(())
    }

    /// Reset without zeroing, optionally reallocating the buffer to `new_capacity` bytes
    pub fn clear(&mut self, new_capacity: Option<u64>) -> Result<(), StoreError> {
        self.reset(false)?;

        if let Some(capacity) = new_capacity {
            let buffer = self.buffer.as_mut().ok_or(StoreError::Disposed)?;
            buffer.resize_exact(capacity)?;
        }
        Ok(())
    }

    /// Release the buffer and the bucket list
    ///
    /// Every later operation that needs either fails with [`StoreError::Disposed`].
    pub fn dispose(&mut self) {
        if self.buffer.take().is_some() {
            #[cfg(feature = "logging")]
            debug!(
                "Disposing frame store with {} frames ({} bytes)",
                self.frame_count, self.data_end_offset
            );
        }

        self.buckets.release();
        self.frame_count = 0;
        self.data_end_offset = 0;
    }

    /// Number of frames
    #[inline]
    pub fn len(&self) -> usize {
        self.frame_count
    }

    /// Returns true if no frames have been appended
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Frames per bucket
    #[inline]
    pub fn bucket_size(&self) -> u32 {
        self.bucket_size
    }

    /// Bytes written so far, prefixes included
    #[inline]
    pub fn data_len(&self) -> u64 {
        self.data_end_offset
    }

    /// Current buffer size in bytes (zero once disposed)
    pub fn capacity(&self) -> u64 {
        self.buffer.as_ref().map_or(0, GrowableBuffer::capacity)
    }

    /// Returns true once [`FrameStore::dispose`] has been called
    pub fn is_disposed(&self) -> bool {
        self.buffer.is_none()
    }

    /// The bucket index
    pub fn buckets(&self) -> &[BucketIndex] {
        self.buckets.as_slice()
    }

    /// View over the written region of the buffer
    pub fn as_bytes(&self) -> Result<MemoryView<'_, u8>, StoreError> {
        Ok(MemoryView::new(self.written()?))
    }

    /// Owned copy of the written region, e.g. for persisting it
    pub fn to_bytes(&self) -> Result<Bytes, StoreError> {
        Ok(Bytes::copy_from_slice(self.written()?))
    }

    /// Summary counters
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            frames: self.frame_count as u64,
            buckets: self.buckets.len() as u64,
            bucket_size: self.bucket_size,
            data_len: self.data_end_offset,
            capacity: self.capacity(),
        }
    }

    fn written(&self) -> Result<&[u8], StoreError> {
        let buffer = self.buffer.as_ref().ok_or(StoreError::Disposed)?;
        Ok(&buffer.as_slice()[..self.data_end_offset as usize])
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), StoreError> {
        if self.buffer.is_none() {
            return Err(StoreError::Disposed);
        }
        if end > self.frame_count {
            return Err(StoreError::out_of_range(end, self.frame_count));
        }
        if start > end {
            return Err(StoreError::out_of_range(start, end));
        }
        Ok(())
    }

    /// Cursor positioned on the length prefix of frame `index`
    fn seek(&self, index: usize) -> Result<FrameCursor<'_>, StoreError> {
        let data = self.written()?;
        if index >= self.frame_count {
            return Err(StoreError::out_of_range(index, self.frame_count));
        }

        let bucket_size = self.bucket_size as usize;
        let bucket = self
            .buckets
            .get(index / bucket_size)
            .ok_or_else(|| StoreError::out_of_range(index, self.frame_count))?;

        let mut cursor = FrameCursor::new(data, bucket.offset());
        for _ in 0..index % bucket_size {
            cursor.skip()?;
        }
        Ok(cursor)
    }
}

impl core::fmt::Debug for FrameStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameStore")
            .field("frames", &self.frame_count)
            .field("buckets", &self.buckets.len())
            .field("bucket_size", &self.bucket_size)
            .field("data_len", &self.data_end_offset)
            .field("capacity", &self.capacity())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

fn validate_bucket_size(bucket_size: u32) -> Result<(), StoreError> {
    if bucket_size == 0 {
        return Err(StoreError::InvalidArgument(
            "bucket size must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Position inside the written region, always on a length prefix
struct FrameCursor<'a> {
    data: &'a [u8],
    offset: u64,
}

impl<'a> FrameCursor<'a> {
    fn new(data: &'a [u8], offset: u64) -> Self {
        Self { data, offset }
    }

    /// Payload length of the frame under the cursor
    fn frame_len(&self) -> Result<u64, StoreError> {
        let available = self.data.len() as u64;
        let corrupt = StoreError::CorruptFrame {
            offset: self.offset,
        };

        if available.saturating_sub(self.offset) < PREFIX {
            return Err(corrupt);
        }

        let start = self.offset as usize;
        let mut header = &self.data[start..start + LENGTH_PREFIX_SIZE];
        let len = header.get_i32_le();

        if len < 0 || self.offset + PREFIX + len as u64 > available {
            return Err(corrupt);
        }
        Ok(len as u64)
    }

    fn peek_frame(&self) -> Result<MemoryView<'a, u8>, StoreError> {
        let len = self.frame_len()?;
        MemoryView::with_range(self.data, self.offset + PREFIX, len)
    }

    fn next_frame(&mut self) -> Result<MemoryView<'a, u8>, StoreError> {
        let frame = self.peek_frame()?;
        self.offset += PREFIX + frame.len();
        Ok(frame)
    }

    fn skip(&mut self) -> Result<(), StoreError> {
        let len = self.frame_len()?;
        self.offset += PREFIX + len;
        Ok(())
    }
}

/// Forward iterator over frame payloads
///
/// Reads each length prefix exactly once. Yields an error (and then stops)
/// only if a header does not fit the written region, which can only happen
/// for adopted buffers.
pub struct Frames<'a> {
    cursor: FrameCursor<'a>,
    remaining: usize,
}

impl<'a> Iterator for Frames<'a> {
    type Item = Result<MemoryView<'a, u8>, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        match self.cursor.next_frame() {
            Ok(frame) => {
                self.remaining -= 1;
                Some(Ok(frame))
            }
            Err(e) => {
                self.remaining = 0;
                Some(Err(e))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl core::iter::FusedIterator for Frames<'_> {}

/// Store statistics
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StoreStats {
    /// Number of frames
    pub frames: u64,

    /// Number of buckets in the index
    pub buckets: u64,

    /// Frames per bucket
    pub bucket_size: u32,

    /// Bytes written, prefixes included
    pub data_len: u64,

    /// Buffer size in bytes
    pub capacity: u64,
}

impl StoreStats {
    /// Share of the buffer holding frame data, as a percentage
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            (self.data_len as f64 / self.capacity as f64) * 100.0
        }
    }

    /// Mean payload length, prefixes excluded
    pub fn average_payload_len(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            (self.data_len - self.frames * PREFIX) as f64 / self.frames as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExpansionPolicy;

    fn store(bucket_size: u32, capacity: u64) -> FrameStore {
        FrameStore::new(
            StoreConfig::new(bucket_size)
                .initial_capacity(capacity)
                .growable(1.5),
        )
        .unwrap()
    }

    #[test]
    fn test_append_writes_prefix_and_payload() {
        let mut store = store(4, 64);
        let bucket = store.append(b"abc").unwrap();

        assert_eq!(bucket, BucketIndex::new(0, 7));
        assert_eq!(store.len(), 1);
        assert_eq!(store.data_len(), 7);
        assert_eq!(store.as_bytes().unwrap().as_slice(), &[3, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn test_buckets_open_every_bucket_size_frames() {
        let mut store = store(2, 64);
        for payload in [&b"a"[..], b"bb", b"ccc", b"", b"e"] {
            store.append(payload).unwrap();
        }

        // 5 + 6 | 7 + 4 | 5
        assert_eq!(
            store.buckets(),
            &[
                BucketIndex::new(0, 11),
                BucketIndex::new(11, 11),
                BucketIndex::new(22, 5),
            ]
        );
        assert_eq!(store.buckets().last().unwrap().end_offset(), store.data_len());
    }

    #[test]
    fn test_get_scans_within_bucket() {
        let mut store = store(3, 16);
        let payloads: Vec<Vec<u8>> = (0..10u8).map(|i| vec![i; i as usize]).collect();
        store.extend(&payloads).unwrap();

        for (i, payload) in payloads.iter().enumerate() {
            assert_eq!(store.get(i).unwrap().as_slice(), payload.as_slice());
        }
        assert_eq!(
            store.get(10),
            Err(StoreError::OutOfRange { index: 10, len: 10 })
        );
    }

    #[test]
    fn test_get_views_alias_the_buffer() {
        let mut store = store(4, 64);
        store.append(b"xyz").unwrap();

        let whole = store.as_bytes().unwrap();
        let frame = store.get(0).unwrap();
        assert_eq!(frame, whole.slice(4, 3).unwrap());
    }

    #[test]
    fn test_get_with_prefix_and_range() {
        let mut store = store(2, 64);
        store.extend([&b"ab"[..], b"c", b"def"]).unwrap();

        assert_eq!(
            store.get_with_prefix(1).unwrap().as_slice(),
            &[1, 0, 0, 0, b'c']
        );

        let range = store.get_range(1, 2).unwrap();
        assert_eq!(range.as_slice(), &[1, 0, 0, 0, b'c', 3, 0, 0, 0, b'd', b'e', b'f']);

        assert!(matches!(
            store.get_range(0, 0),
            Err(StoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.get_range(2, 2),
            Err(StoreError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_iterate_with_state() {
        let mut store = store(2, 64);
        store.extend(["one", "two", "three", "four"]).unwrap();

        let mut total = 0u64;
        store
            .iterate_with_state(1, 4, &mut total, |_, total, frame| *total += frame.len())
            .unwrap();
        assert_eq!(total, 3 + 5 + 4);
    }

    #[test]
    fn test_iterate_empty_range_at_end() {
        let mut store = store(2, 64);
        store.extend(["a", "b"]).unwrap();

        let mut visited = 0;
        store.iterate(2, 2, |_, _| visited += 1).unwrap();
        assert_eq!(visited, 0);
        assert_eq!(store.range(2, 2).unwrap().count(), 0);
    }

    #[test]
    fn test_iterate_rejects_bad_ranges_without_visiting() {
        let mut store = store(2, 64);
        store.extend(["a", "b", "c"]).unwrap();

        let mut visited = 0;
        assert!(store.iterate(0, 4, |_, _| visited += 1).is_err());
        assert!(store.iterate(2, 1, |_, _| visited += 1).is_err());
        assert_eq!(visited, 0);
    }

    #[test]
    fn test_fixed_buffer_rejects_overflowing_append() {
        let config = StoreConfig::new(4).initial_capacity(10).fixed();
        let mut store = FrameStore::new(config).unwrap();

        store.append(b"12345").unwrap(); // 9 bytes
        let before = store.buckets().to_vec();

        assert_eq!(
            store.append(b"x"),
            Err(StoreError::OutOfMemory {
                required: 14,
                capacity: 10
            })
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.data_len(), 9);
        assert_eq!(store.buckets(), before.as_slice());
    }

    #[test]
    fn test_failed_append_does_not_open_bucket() {
        let config = StoreConfig::new(1).initial_capacity(5).fixed();
        let mut store = FrameStore::new(config).unwrap();

        store.append(b"a").unwrap();
        assert!(store.append(b"b").is_err());
        assert_eq!(store.buckets().len(), 1);
    }

    #[test]
    fn test_reset_and_clear() {
        let mut store = store(2, 16);
        store.extend(["abc", "def", "ghi"]).unwrap();

        store.reset(true).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.data_len(), 0);
        assert_eq!(store.buckets(), &[BucketIndex::new(0, 0)]);
        assert!(store.get(0).is_err());

        store.append_str("again").unwrap();
        store.clear(Some(8)).unwrap();
        assert_eq!(store.capacity(), 8);
        assert!(store.is_empty());
    }

    #[test]
    fn test_dispose_tombstones_store() {
        let mut store = store(2, 16);
        store.append(b"abc").unwrap();
        store.dispose();

        assert!(store.is_disposed());
        assert_eq!(store.len(), 0);
        assert_eq!(store.capacity(), 0);
        assert!(store.buckets().is_empty());
        assert_eq!(store.append(b"x"), Err(StoreError::Disposed));
        assert_eq!(store.get(0), Err(StoreError::Disposed));
        assert_eq!(store.reset(false), Err(StoreError::Disposed));
        assert!(matches!(store.frames(), Err(StoreError::Disposed)));

        // Idempotent
        store.dispose();
        assert!(store.is_disposed());
    }

    #[test]
    fn test_from_buffer_rebuilds_index() {
        let mut original = store(3, 32);
        original
            .extend(["alpha", "", "gamma", "delta", "epsilon", "z", "omega"])
            .unwrap();

        let bytes = original.to_bytes().unwrap();
        let rebuilt = FrameStore::from_bytes(&bytes, StoreConfig::new(3)).unwrap();

        assert_eq!(rebuilt.len(), original.len());
        assert_eq!(rebuilt.buckets(), original.buckets());
        for i in 0..original.len() {
            assert_eq!(
                rebuilt.get(i).unwrap().as_slice(),
                original.get(i).unwrap().as_slice()
            );
        }
    }

    #[test]
    fn test_from_buffer_rejects_bad_input() {
        let buffer = GrowableBuffer::from_vec(vec![0; 4], ExpansionPolicy::fixed()).unwrap();
        assert!(matches!(
            FrameStore::from_buffer(buffer, 5, 4),
            Err(StoreError::InvalidArgument(_))
        ));

        // Prefix claims 10 bytes, only 2 follow
        let data = [10, 0, 0, 0, 1, 2];
        assert_eq!(
            FrameStore::from_bytes(&data, StoreConfig::new(4)).unwrap_err(),
            StoreError::CorruptFrame { offset: 0 }
        );

        // Negative length
        let data = (-1i32).to_le_bytes();
        assert!(FrameStore::from_bytes(&data, StoreConfig::new(4)).is_err());

        // Truncated header after a valid frame
        let data = [1, 0, 0, 0, 7, 0, 0];
        assert_eq!(
            FrameStore::from_bytes(&data, StoreConfig::new(4)).unwrap_err(),
            StoreError::CorruptFrame { offset: 5 }
        );
    }

    #[test]
    fn test_stats() {
        let mut store = store(2, 100);
        store.extend(["abcd", "ef"]).unwrap();

        let stats = store.stats();
        assert_eq!(stats.frames, 2);
        assert_eq!(stats.buckets, 1);
        assert_eq!(stats.data_len, 14);
        assert_eq!(stats.capacity, 100);
        assert!((stats.utilization() - 14.0).abs() < 1e-9);
        assert!((stats.average_payload_len() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_bucket_size_rejected() {
        assert!(matches!(
            FrameStore::new(StoreConfig::new(0)),
            Err(StoreError::InvalidArgument(_))
        ));
        let buffer = GrowableBuffer::with_capacity(8, ExpansionPolicy::fixed()).unwrap();
        assert!(FrameStore::with_buffer(buffer, 0).is_err());
    }
}
