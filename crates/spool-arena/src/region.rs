//! Arena identities and region handles.
//!
//! A [`Region`] encodes the location of a granted sub-region within its
//! arena. It carries the granting [`ArenaId`] so that resolution against
//! any other arena is rejected in O(1).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique [`ArenaId`] allocation.
static ARENA_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per-instance identifier for an [`Arena`](crate::Arena).
///
/// Allocated from a monotonic atomic counter. Two arenas created in the
/// same process never share an ID, even if one was freed and the next
/// reuses its address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArenaId(u64);

impl ArenaId {
    /// Allocate a fresh, unique arena ID.
    pub(crate) fn next() -> Self {
        Self(ARENA_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ArenaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sub-region granted by an arena.
///
/// Regions are plain handles: they own nothing and are resolved to bytes
/// through [`Arena::slice`](crate::Arena::slice) or
/// [`Arena::slice_mut`](crate::Arena::slice_mut).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct Region {
    /// Arena that granted this region.
    pub(crate) arena: ArenaId,
    /// Byte offset of the region start within the arena.
    pub(crate) offset: usize,
    /// Length of the region in bytes.
    pub(crate) len: usize,
}

impl Region {
    pub(crate) fn new(arena: ArenaId, offset: usize, len: usize) -> Self {
        Self { arena, offset, len }
    }

    /// The arena that granted this region.
    pub fn arena(&self) -> ArenaId {
        self.arena
    }

    /// Byte offset of the region start within its arena.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the region in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether this is a zero-length region.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// One past the last byte of the region.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Region(arena={}, off={}, len={})",
            self.arena, self.offset, self.len
        )
    }
}
