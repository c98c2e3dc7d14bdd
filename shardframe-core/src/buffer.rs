//! Owned byte storage with geometric, policy-controlled growth

use crate::config::ExpansionPolicy;
use crate::constants::MAX_BUFFER_CAPACITY;
use crate::error::StoreError;
use crate::view::MemoryView;
use alloc::vec::Vec;

#[cfg(feature = "logging")]
use tracing::{debug, warn};

/// Resizable, zero-initialised byte region
///
/// The whole storage is addressable: `capacity()` is the length of the region,
/// not a hint. [`GrowableBuffer::ensure_capacity`] is the only operation that
/// may move the bytes to a new allocation, and it takes `&mut self`, so no
/// [`MemoryView`] borrowed from the buffer can survive it.
#[derive(Clone)]
pub struct GrowableBuffer {
    storage: Vec<u8>,
    expansion: ExpansionPolicy,
}

impl GrowableBuffer {
    /// Allocate a zero-filled buffer of `capacity` bytes
    pub fn with_capacity(capacity: u64, expansion: ExpansionPolicy) -> Result<Self, StoreError> {
        expansion.validate()?;

        let mut storage = Vec::new();
        grow_storage(&mut storage, capacity)?;

        Ok(Self { storage, expansion })
    }

    /// Adopt caller-provided storage; its whole length becomes the capacity
    pub fn from_vec(storage: Vec<u8>, expansion: ExpansionPolicy) -> Result<Self, StoreError> {
        expansion.validate()?;
        Ok(Self { storage, expansion })
    }

    /// Size of the region in bytes
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.storage.len() as u64
    }

    /// The growth policy this buffer was created with
    #[inline]
    pub fn expansion(&self) -> ExpansionPolicy {
        self.expansion
    }

    /// Make sure at least `target` bytes are addressable
    ///
    /// Returns `Ok(true)` when the storage was reallocated. Fails with
    /// [`StoreError::OutOfMemory`] when growth is disallowed or cannot reach
    /// `target`; the buffer is untouched in that case.
    pub fn ensure_capacity(&mut self, target: u64) -> Result<bool, StoreError> {
        let capacity = self.capacity();
        if target <= capacity {
            return Ok(false);
        }

        if !self.expansion.allowed {
            #[cfg(feature = "logging")]
            warn!(
                "Buffer is full: {} bytes required, capacity {} and expansion disabled",
                target, capacity
            );

            return Err(StoreError::OutOfMemory {
                required: target,
                capacity,
            });
        }

        let new_capacity = next_capacity(capacity, target, self.expansion.factor)?;

        #[cfg(feature = "logging")]
        debug!(
            "Expanding buffer from {} to {} bytes (required {})",
            capacity, new_capacity, target
        );

        grow_storage(&mut self.storage, new_capacity)?;
        Ok(true)
    }

    /// Reallocate to exactly `new_capacity` bytes, truncating or zero-extending
    pub fn resize_exact(&mut self, new_capacity: u64) -> Result<(), StoreError> {
        if new_capacity > MAX_BUFFER_CAPACITY {
            return Err(StoreError::OutOfMemory {
                required: new_capacity,
                capacity: self.capacity(),
            });
        }

        if new_capacity <= self.capacity() {
            self.storage.truncate(new_capacity as usize);
            self.storage.shrink_to_fit();
            return Ok(());
        }

        grow_storage(&mut self.storage, new_capacity)
    }

    /// Overwrite every byte with zero
    pub fn zero(&mut self) {
        self.storage.fill(0);
    }

    /// The whole region
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.storage
    }

    /// The whole region, writable
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.storage
    }

    /// Bounds-checked view over `length` bytes starting at `start`
    pub fn view(&self, start: u64, length: u64) -> Result<MemoryView<'_, u8>, StoreError> {
        MemoryView::with_range(&self.storage, start, length)
    }

    /// Give up ownership of the storage
    pub fn into_vec(self) -> Vec<u8> {
        self.storage
    }
}

impl core::fmt::Debug for GrowableBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GrowableBuffer")
            .field("capacity", &self.capacity())
            .field("expansion", &self.expansion)
            .finish()
    }
}

/// Compute the capacity reached by repeatedly growing `current` by `factor`
/// until it holds `target` bytes.
///
/// Each step is `ceil(current * factor)`, bumped by one byte when rounding
/// leaves it unchanged so the loop always progresses.
pub fn next_capacity(current: u64, target: u64, factor: f32) -> Result<u64, StoreError> {
    if target > MAX_BUFFER_CAPACITY {
        return Err(StoreError::OutOfMemory {
            required: target,
            capacity: current,
        });
    }

    let mut capacity = current;
    while capacity < target {
        capacity = grow_step(capacity, factor);
    }
    Ok(capacity)
}

fn grow_step(current: u64, factor: f32) -> u64 {
    let scaled = current as f64 * f64::from(factor);
    let next = if scaled >= MAX_BUFFER_CAPACITY as f64 {
        MAX_BUFFER_CAPACITY
    } else {
        // ceil without std
        let truncated = scaled as u64;
        if (truncated as f64) < scaled {
            truncated + 1
        } else {
            truncated
        }
    };

    // failsafe
    if next <= current {
        current + 1
    } else {
        next
    }
}

fn grow_storage(storage: &mut Vec<u8>, new_len: u64) -> Result<(), StoreError> {
    let current = storage.len() as u64;
    let out_of_memory = || StoreError::OutOfMemory {
        required: new_len,
        capacity: current,
    };

    let new_len = usize::try_from(new_len).map_err(|_| out_of_memory())?;
    let additional = new_len.saturating_sub(storage.len());
    storage
        .try_reserve_exact(additional)
        .map_err(|_| out_of_memory())?;
    storage.resize(new_len, 0);
    Ok(())
}
