//! Constants and limits for the frame layout

/// Size of the length prefix written before every payload
pub const LENGTH_PREFIX_SIZE: usize = core::mem::size_of::<i32>();

/// Largest payload a single frame can carry.
///
/// The prefix is a signed 32-bit integer and the whole frame (prefix included)
/// must also fit a bucket's 32-bit running length.
pub const MAX_PAYLOAD_SIZE: usize = i32::MAX as usize - LENGTH_PREFIX_SIZE;

/// Largest number of bytes a single bucket may span
pub const MAX_BUCKET_LENGTH: u64 = i32::MAX as u64;

/// Largest buffer capacity the allocator can be asked for
pub const MAX_BUFFER_CAPACITY: u64 = isize::MAX as u64;

/// Default multiplicative growth applied when the buffer runs out of room
pub const DEFAULT_EXPANSION_FACTOR: f32 = 1.5;

/// Default number of frames tracked by one bucket
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Default initial buffer size in bytes
pub const DEFAULT_INITIAL_CAPACITY: u64 = 4096;

/// Encode a payload length as the on-buffer prefix (little-endian i32)
#[inline]
pub const fn encode_prefix(len: i32) -> [u8; LENGTH_PREFIX_SIZE] {
    len.to_le_bytes()
}

/// Decode the on-buffer prefix into a payload length
#[inline]
pub const fn decode_prefix(bytes: [u8; LENGTH_PREFIX_SIZE]) -> i32 {
    i32::from_le_bytes(bytes)
}
