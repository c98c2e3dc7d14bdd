//! # Shardframe Core
//!
//! A compact in-memory store of variable-length, length-prefixed binary frames
//! with a sparse bucket index for near-constant random access.
//!
//! ## Modules
//!
//! - `constants`: Frame layout constants and limits
//! - `view`: Bounds-checked, borrowed memory views
//! - `buffer`: Growable byte buffer with a configurable expansion policy
//! - `bucket`: Sparse offset index entries
//! - `config`: Store configuration
//! - `store`: The frame store (append, random access, iteration)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

pub mod bucket;
pub mod buffer;
pub mod config;
pub mod constants;
pub mod error;
pub mod store;
pub mod view;

// Re-export commonly used types
pub use bucket::BucketIndex;
pub use buffer::GrowableBuffer;
pub use config::{ExpansionPolicy, StoreConfig};
pub use error::StoreError;
pub use store::{FrameStore, Frames, StoreStats};
pub use view::{MemoryView, MemoryViewMut};

/// Result type alias for frame store operations
pub type Result<T> = core::result::Result<T, StoreError>;
