//! Store configuration

use crate::constants::{
    DEFAULT_BUCKET_SIZE, DEFAULT_EXPANSION_FACTOR, DEFAULT_INITIAL_CAPACITY, MAX_BUFFER_CAPACITY,
};
use crate::error::StoreError;
use alloc::format;
use serde::{Deserialize, Serialize};

/// How a buffer behaves once appended data no longer fits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionPolicy {
    /// Whether the buffer may be reallocated at all
    pub allowed: bool,

    /// Multiplicative growth applied per expansion step (> 1.0)
    pub factor: f32,
}

impl ExpansionPolicy {
    /// Never grow; running out of room is an error
    pub const fn fixed() -> Self {
        Self {
            allowed: false,
            factor: DEFAULT_EXPANSION_FACTOR,
        }
    }

    /// Grow geometrically by `factor`
    pub const fn growable(factor: f32) -> Self {
        Self {
            allowed: true,
            factor,
        }
    }

    /// Validate the growth factor
    pub fn validate(&self) -> Result<(), StoreError> {
        if !self.factor.is_finite() || self.factor <= 1.0 {
            return Err(StoreError::InvalidArgument(format!(
                "expansion factor must be a finite number > 1.0, got {}",
                self.factor
            )));
        }
        Ok(())
    }
}

impl Default for ExpansionPolicy {
    fn default() -> Self {
        Self::fixed()
    }
}

/// Parameters a [`FrameStore`](crate::store::FrameStore) is created with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of frames tracked by each bucket
    pub bucket_size: u32,

    /// Size in bytes of the buffer allocated up front
    pub initial_capacity: u64,

    /// Buffer growth behaviour
    pub expansion: ExpansionPolicy,

    /// Expected number of frames, used only to reserve room in the bucket list
    pub expected_frames: u64,
}

impl StoreConfig {
    /// Create a configuration with the given bucket size and default everything else
    pub fn new(bucket_size: u32) -> Self {
        Self {
            bucket_size,
            ..Self::default()
        }
    }

    /// Set the initial buffer size
    pub fn initial_capacity(mut self, capacity: u64) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set the expansion policy
    pub fn expansion(mut self, policy: ExpansionPolicy) -> Self {
        self.expansion = policy;
        self
    }

    /// Allow the buffer to grow by `factor`
    pub fn growable(self, factor: f32) -> Self {
        self.expansion(ExpansionPolicy::growable(factor))
    }

    /// Forbid buffer growth
    pub fn fixed(self) -> Self {
        self.expansion(ExpansionPolicy::fixed())
    }

    /// Hint how many frames will be appended
    pub fn expected_frames(mut self, frames: u64) -> Self {
        self.expected_frames = frames;
        self
    }

    /// Number of buckets needed for `expected_frames`
    pub(crate) fn expected_buckets(&self) -> usize {
        if self.bucket_size == 0 {
            return 1;
        }
        let buckets = self.expected_frames.div_ceil(u64::from(self.bucket_size)).max(1);
        usize::try_from(buckets).unwrap_or(usize::MAX)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), StoreError> {
        if self.bucket_size == 0 {
            return Err(StoreError::InvalidArgument(
                "bucket size must be greater than zero".into(),
            ));
        }

        if self.initial_capacity > MAX_BUFFER_CAPACITY {
            return Err(StoreError::InvalidArgument(format!(
                "initial capacity {} exceeds maximum {}",
                self.initial_capacity, MAX_BUFFER_CAPACITY
            )));
        }

        self.expansion.validate()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            bucket_size: DEFAULT_BUCKET_SIZE,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            expansion: ExpansionPolicy::default(),
            expected_frames: 0,
        }
    }
}
