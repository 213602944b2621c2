//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::region::ArenaId;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The host allocator refused to reserve the arena's backing block.
    OutOfMemory {
        /// Number of bytes requested at creation.
        requested: usize,
    },
    /// Not enough capacity remains to satisfy an allocation.
    Exhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Bytes already handed out (including alignment padding).
        used: usize,
        /// Total arena capacity in bytes.
        capacity: usize,
    },
    /// A [`Region`](crate::Region) was resolved against an arena that did
    /// not grant it.
    ForeignRegion {
        /// The arena that granted the region.
        region: ArenaId,
        /// The arena it was presented to.
        arena: ArenaId,
    },
    /// An [`ArenaConfig`](crate::ArenaConfig) failed validation.
    InvalidConfig {
        /// Description of the violated invariant.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { requested } => {
                write!(f, "out of memory: cannot reserve {requested} bytes")
            }
            Self::Exhausted {
                requested,
                used,
                capacity,
            } => {
                write!(
                    f,
                    "arena exhausted: requested {requested} bytes, {used} of {capacity} bytes used"
                )
            }
            Self::ForeignRegion { region, arena } => {
                write!(f, "region from arena {region} resolved against arena {arena}")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
