//! The bump arena itself.
//!
//! An [`Arena`] is one contiguous `Vec<u8>` reserved exactly once, with a
//! cursor that advances on each allocation. Granted regions are never freed
//! individually; the block is released only when the arena is freed or
//! dropped.

use tracing::{debug, trace};

use crate::config::ArenaConfig;
use crate::error::ArenaError;
use crate::region::{ArenaId, Region};

/// Round `offset` up to the next multiple of `alignment` (a power of two).
///
/// Returns `None` if the rounded value does not fit in `usize`.
fn align_up(offset: usize, alignment: usize) -> Option<usize> {
    debug_assert!(alignment.is_power_of_two());
    let mask = alignment - 1;
    offset.checked_add(mask).map(|v| v & !mask)
}

/// A fixed-capacity bump allocator over a single reserved byte block.
///
/// The arena is an explicitly owned object: it is never global, and every
/// consumer receives it as a parameter. Allocation needs `&mut Arena`, so
/// any `&[u8]` view resolved from it is statically guaranteed not to
/// survive a later allocation.
pub struct Arena {
    /// Process-unique identity, stamped into every granted region.
    id: ArenaId,
    /// Backing storage. Reserved to full capacity at creation, zero-filled.
    data: Vec<u8>,
    /// Bump pointer: bytes handed out so far, including padding.
    cursor: usize,
    /// Validated configuration.
    config: ArenaConfig,
}

impl Arena {
    /// Reserve an arena of exactly `capacity` bytes with default alignment.
    ///
    /// Returns [`ArenaError::OutOfMemory`] if the host allocator cannot
    /// satisfy the reservation. Callers typically size arenas generously
    /// at startup and treat this as fatal.
    pub fn new(capacity: usize) -> Result<Self, ArenaError> {
        Self::with_config(ArenaConfig::new(capacity))
    }

    /// Reserve an arena described by `config`.
    ///
    /// The config is validated first; an invalid config is reported as
    /// [`ArenaError::InvalidConfig`] before any memory is requested.
    pub fn with_config(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;

        let mut data = Vec::new();
        data.try_reserve_exact(config.capacity)
            .map_err(|_| ArenaError::OutOfMemory {
                requested: config.capacity,
            })?;
        // Already reserved, so this fills in place without reallocating.
        data.resize(config.capacity, 0);

        let id = ArenaId::next();
        debug!(
            arena = %id,
            capacity = config.capacity,
            alignment = config.alignment,
            "arena reserved"
        );

        Ok(Self {
            id,
            data,
            cursor: 0,
            config,
        })
    }

    /// Bump-allocate `len` bytes.
    ///
    /// The region start is rounded up to the configured alignment. On
    /// success the cursor moves to the end of the new region. Returns
    /// [`ArenaError::Exhausted`] if the aligned region would not fit, in
    /// which case the cursor is unchanged. A zero-length request always
    /// succeeds and returns an empty region at the current cursor.
    pub fn alloc(&mut self, len: usize) -> Result<Region, ArenaError> {
        if len == 0 {
            return Ok(Region::new(self.id, self.cursor, 0));
        }

        let end = align_up(self.cursor, self.config.alignment)
            .and_then(|start| start.checked_add(len).map(|end| (start, end)));
        let (start, end) = match end {
            Some((start, end)) if end <= self.data.len() => (start, end),
            _ => {
                return Err(ArenaError::Exhausted {
                    requested: len,
                    used: self.cursor,
                    capacity: self.data.len(),
                });
            }
        };

        self.cursor = end;
        trace!(arena = %self.id, offset = start, len, "region granted");
        Ok(Region::new(self.id, start, len))
    }

    /// Resolve a region to a shared byte slice.
    ///
    /// Returns [`ArenaError::ForeignRegion`] if `region` was granted by a
    /// different arena.
    pub fn slice(&self, region: Region) -> Result<&[u8], ArenaError> {
        self.check_owner(region)?;
        Ok(&self.data[region.offset..region.end()])
    }

    /// Resolve a region to a mutable byte slice.
    ///
    /// Returns [`ArenaError::ForeignRegion`] if `region` was granted by a
    /// different arena.
    pub fn slice_mut(&mut self, region: Region) -> Result<&mut [u8], ArenaError> {
        self.check_owner(region)?;
        Ok(&mut self.data[region.offset..region.end()])
    }

    /// Copy the first `len` bytes of `src` to the start of `dst`.
    ///
    /// Both regions must belong to this arena. Regions granted by one arena
    /// never overlap, so the copy is a plain forward move.
    ///
    /// # Panics
    ///
    /// Panics if `len` exceeds the length of either region.
    pub fn copy_region(&mut self, src: Region, dst: Region, len: usize) -> Result<(), ArenaError> {
        self.check_owner(src)?;
        self.check_owner(dst)?;
        assert!(
            len <= src.len && len <= dst.len,
            "copy of {len} bytes exceeds region bounds (src {}, dst {})",
            src.len,
            dst.len,
        );
        self.data.copy_within(src.offset..src.offset + len, dst.offset);
        Ok(())
    }

    /// Release the entire block in one step.
    ///
    /// Consumes the arena: every region it granted can no longer be
    /// resolved, and every structure built on it is unusable because no
    /// `&Arena` can be produced for it again.
    pub fn free(self) {
        debug!(
            arena = %self.id,
            used = self.cursor,
            capacity = self.data.len(),
            "arena freed"
        );
        drop(self);
    }

    /// This arena's process-unique identity.
    pub fn id(&self) -> ArenaId {
        self.id
    }

    /// Total reserved bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Bytes handed out so far, including alignment padding.
    pub fn used(&self) -> usize {
        self.cursor
    }

    /// Bytes not yet handed out.
    ///
    /// A request for exactly this many bytes may still fail if the cursor
    /// is not aligned.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Start-offset alignment applied to every allocation.
    pub fn alignment(&self) -> usize {
        self.config.alignment
    }

    /// The configuration this arena was created with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    fn check_owner(&self, region: Region) -> Result<(), ArenaError> {
        if region.arena != self.id {
            return Err(ArenaError::ForeignRegion {
                region: region.arena,
                arena: self.id,
            });
        }
        Ok(())
    }
}

impl std::fmt::Debug for Arena {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Arena")
            .field("id", &self.id)
            .field("used", &self.cursor)
            .field("capacity", &self.data.len())
            .field("alignment", &self.config.alignment)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn align_up_rounds_to_power_of_two() {
        assert_eq!(align_up(10, 4), Some(12));
        assert_eq!(align_up(20, 8), Some(24));
        assert_eq!(align_up(100, 32), Some(128));
        assert_eq!(align_up(64, 8), Some(64));
        assert_eq!(align_up(usize::MAX, 8), None);
    }

    #[test]
    fn new_reserves_exact_capacity() {
        let arena = Arena::new(1024).unwrap();
        assert_eq!(arena.capacity(), 1024);
        assert_eq!(arena.used(), 0);
        assert_eq!(arena.remaining(), 1024);
    }

    #[test]
    fn invalid_config_rejected_before_reservation() {
        let result = Arena::with_config(ArenaConfig::new(64).with_alignment(3));
        assert!(matches!(result, Err(ArenaError::InvalidConfig { .. })));
    }

    #[test]
    fn unsatisfiable_reservation_is_out_of_memory() {
        let result = Arena::new(usize::MAX);
        assert_eq!(
            result.unwrap_err(),
            ArenaError::OutOfMemory {
                requested: usize::MAX
            }
        );
    }

    #[test]
    fn alloc_returns_zeroed_region() {
        let mut arena = Arena::new(1024).unwrap();
        let r = arena.alloc(10).unwrap();
        assert_eq!(r.offset(), 0);
        assert_eq!(r.len(), 10);
        assert!(arena.slice(r).unwrap().iter().all(|&b| b == 0));
    }

    #[test]
    fn sequential_allocs_are_aligned_and_disjoint() {
        let mut arena = Arena::new(1024).unwrap();
        let a = arena.alloc(3).unwrap();
        let b = arena.alloc(5).unwrap();
        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset(), 8);
        assert!(a.end() <= b.offset());
        assert_eq!(arena.used(), 13);
    }

    #[test]
    fn byte_alignment_packs_tightly() {
        let mut arena = Arena::with_config(ArenaConfig::new(16).with_alignment(1)).unwrap();
        let a = arena.alloc(3).unwrap();
        let b = arena.alloc(5).unwrap();
        assert_eq!(b.offset(), a.end());
        assert_eq!(arena.used(), 8);
    }

    #[test]
    fn alloc_fails_when_full_and_leaves_cursor() {
        let mut arena = Arena::new(100).unwrap();
        arena.alloc(96).unwrap();
        let used = arena.used();
        let err = arena.alloc(8).unwrap_err();
        assert_eq!(
            err,
            ArenaError::Exhausted {
                requested: 8,
                used,
                capacity: 100
            }
        );
        assert_eq!(arena.used(), used);
        // Exact fit into what is left still succeeds.
        assert!(arena.alloc(4).is_ok());
        assert_eq!(arena.remaining(), 0);
    }

    #[test]
    fn padding_counts_against_capacity() {
        let mut arena = Arena::new(16).unwrap();
        arena.alloc(1).unwrap();
        // 1 byte used, next start is 8; 9 bytes would end at 17.
        assert!(matches!(
            arena.alloc(9),
            Err(ArenaError::Exhausted { .. })
        ));
        assert!(arena.alloc(8).is_ok());
    }

    #[test]
    fn zero_capacity_arena_is_always_exhausted() {
        let mut arena = Arena::new(0).unwrap();
        assert!(matches!(
            arena.alloc(1),
            Err(ArenaError::Exhausted { .. })
        ));
        assert!(arena.alloc(0).unwrap().is_empty());
    }

    #[test]
    fn zero_length_alloc_does_not_advance() {
        let mut arena = Arena::new(64).unwrap();
        arena.alloc(3).unwrap();
        let r = arena.alloc(0).unwrap();
        assert!(r.is_empty());
        assert_eq!(r.offset(), 3);
        assert_eq!(arena.used(), 3);
    }

    #[test]
    fn slice_reads_written_data() {
        let mut arena = Arena::new(64).unwrap();
        let r = arena.alloc(4).unwrap();
        arena.slice_mut(r).unwrap().copy_from_slice(b"spin");
        assert_eq!(arena.slice(r).unwrap(), b"spin");
    }

    #[test]
    fn foreign_region_rejected() {
        let mut a = Arena::new(64).unwrap();
        let mut b = Arena::new(64).unwrap();
        let r = a.alloc(8).unwrap();
        let _ = b.alloc(8).unwrap();
        assert_eq!(
            b.slice(r).unwrap_err(),
            ArenaError::ForeignRegion {
                region: a.id(),
                arena: b.id()
            }
        );
        assert!(b.slice_mut(r).is_err());
    }

    #[test]
    fn copy_region_moves_prefix() {
        let mut arena = Arena::new(64).unwrap();
        let src = arena.alloc(4).unwrap();
        let dst = arena.alloc(8).unwrap();
        arena.slice_mut(src).unwrap().copy_from_slice(b"abcd");
        arena.copy_region(src, dst, 3).unwrap();
        assert_eq!(&arena.slice(dst).unwrap()[..4], b"abc\0");
        // Source untouched.
        assert_eq!(arena.slice(src).unwrap(), b"abcd");
    }

    #[test]
    #[should_panic(expected = "exceeds region bounds")]
    fn copy_region_rejects_oversized_len() {
        let mut arena = Arena::new(64).unwrap();
        let src = arena.alloc(4).unwrap();
        let dst = arena.alloc(2).unwrap();
        let _ = arena.copy_region(src, dst, 4);
    }

    #[test]
    fn free_consumes_arena() {
        let mut arena = Arena::new(64).unwrap();
        let _ = arena.alloc(16).unwrap();
        arena.free();
    }

    #[test]
    fn ids_differ_between_arenas() {
        let a = Arena::new(8).unwrap();
        let b = Arena::new(8).unwrap();
        assert_ne!(a.id(), b.id());
    }

    proptest! {
        #[test]
        fn cursor_is_monotonic_and_bounded(
            lens in proptest::collection::vec(0usize..200, 1..40),
        ) {
            let mut arena = Arena::new(2048).unwrap();
            let mut last_end = 0usize;
            for len in lens {
                let before = arena.used();
                match arena.alloc(len) {
                    Ok(r) => {
                        prop_assert_eq!(r.len(), len);
                        prop_assert!(r.end() <= arena.capacity());
                        if len > 0 {
                            prop_assert_eq!(r.offset() % arena.alignment(), 0);
                            prop_assert!(r.offset() >= last_end);
                            last_end = r.end();
                        }
                        prop_assert!(arena.used() >= before);
                    }
                    Err(_) => prop_assert_eq!(arena.used(), before),
                }
                prop_assert!(arena.used() <= arena.capacity());
            }
        }
    }
}
