//! Arena configuration parameters.

use crate::error::ArenaError;

/// Configuration for an [`Arena`](crate::Arena).
///
/// Controls the reserved byte capacity and the alignment applied to the
/// start offset of every granted region. Validated at construction; all
/// values are immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Total bytes reserved for the arena's lifetime.
    ///
    /// Default: 1 MiB. Zero is permitted; every non-empty allocation from
    /// a zero-capacity arena is then exhausted.
    pub capacity: usize,

    /// Start-offset alignment for every allocation, in bytes.
    ///
    /// Default: 8. Must be a power of two no larger than
    /// [`ArenaConfig::MAX_ALIGNMENT`]. Padding counts against capacity.
    pub alignment: usize,
}

impl ArenaConfig {
    /// Default arena capacity: 1 MiB.
    pub const DEFAULT_CAPACITY: usize = 1 << 20;

    /// Default start-offset alignment.
    pub const DEFAULT_ALIGNMENT: usize = 8;

    /// Largest accepted alignment.
    pub const MAX_ALIGNMENT: usize = 4096;

    /// Create a config reserving `capacity` bytes with default alignment.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            alignment: Self::DEFAULT_ALIGNMENT,
        }
    }

    /// Replace the start-offset alignment.
    pub fn with_alignment(mut self, alignment: usize) -> Self {
        self.alignment = alignment;
        self
    }

    /// Check structural invariants.
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the alignment is zero, not
    /// a power of two, or above [`ArenaConfig::MAX_ALIGNMENT`].
    pub fn validate(&self) -> Result<(), ArenaError> {
        if !self.alignment.is_power_of_two() {
            return Err(ArenaError::InvalidConfig {
                reason: format!("alignment {} is not a power of two", self.alignment),
            });
        }
        if self.alignment > Self::MAX_ALIGNMENT {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "alignment {} exceeds maximum {}",
                    self.alignment,
                    Self::MAX_ALIGNMENT
                ),
            });
        }
        Ok(())
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}
