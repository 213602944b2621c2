//! The arena-backed dynamic array.
//!
//! [`DynArray`] tracks logical length and storage capacity separately. Its
//! storage is a single [`Region`] granted by the owning arena; growth
//! allocates a larger region, copies the live prefix into it, and swaps the
//! handle. The outgrown region is never read or written again.

use std::num::NonZeroUsize;
use std::ops::Range;
use std::slice::ChunksExact;

use spool_arena::{Arena, ArenaError, ArenaId, Region};
use tracing::debug;

use crate::error::{ContractViolation, DynArrayError};
use crate::growth::grown_capacity;

/// Native word element, as read and written by the word accessors.
pub type Word = i32;

/// Width in bytes of a [`Word`] element.
pub const WORD_SIZE: usize = std::mem::size_of::<Word>();

/// A growable sequence of fixed-size, untyped elements.
///
/// The array is the exclusive logical owner of its storage region, so it
/// is deliberately not `Clone`. It has no destructor of its own: its bytes
/// are reclaimed when the owning arena is freed.
///
/// Every operation takes the owning arena explicitly. Passing any other
/// arena is reported as [`ContractViolation::ForeignArena`].
#[derive(Debug)]
pub struct DynArray {
    /// Arena all storage is drawn from.
    arena: ArenaId,
    /// Current storage. `None` until the first growth when created empty.
    storage: Option<Region>,
    /// Logical element count.
    len: usize,
    /// Elements that fit in `storage`.
    capacity: usize,
    /// Width of one element in bytes.
    elem_size: NonZeroUsize,
}

impl DynArray {
    /// Create an array of `elem_size`-byte elements drawing from `arena`.
    ///
    /// With a zero `capacity_hint` no storage is requested until the first
    /// growth. Otherwise room for exactly `capacity_hint` elements is
    /// allocated immediately.
    pub fn new(
        arena: &mut Arena,
        capacity_hint: usize,
        elem_size: usize,
    ) -> Result<Self, DynArrayError> {
        let elem_size = NonZeroUsize::new(elem_size).ok_or(ContractViolation::ZeroElementSize)?;

        let mut array = Self {
            arena: arena.id(),
            storage: None,
            len: 0,
            capacity: 0,
            elem_size,
        };
        if capacity_hint > 0 {
            array.reallocate(arena, capacity_hint)?;
        }
        Ok(array)
    }

    // ── Push ────────────────────────────────────────────────────

    /// Append one element copied from `element`.
    ///
    /// `element` must be exactly [`elem_size`](Self::elem_size) bytes.
    /// Grows storage first if the array is full.
    pub fn push_raw(&mut self, arena: &mut Arena, element: &[u8]) -> Result<(), DynArrayError> {
        self.check_arena(arena)?;
        self.check_element(element)?;

        let required = self.len.checked_add(1).ok_or_else(|| overflow(arena))?;
        self.ensure_capacity(arena, required)?;

        let range = self.element_range(self.len);
        self.storage_mut(arena)?[range].copy_from_slice(element);
        self.len = required;
        Ok(())
    }

    /// Append one byte to an array of 1-byte elements.
    pub fn push_byte(&mut self, arena: &mut Arena, value: u8) -> Result<(), DynArrayError> {
        self.check_width("byte", 1)?;
        self.push_raw(arena, &[value])
    }

    /// Append one [`Word`] to an array of [`WORD_SIZE`]-byte elements.
    ///
    /// The word is stored in native byte order.
    pub fn push_word(&mut self, arena: &mut Arena, value: Word) -> Result<(), DynArrayError> {
        self.check_width("word", WORD_SIZE)?;
        self.push_raw(arena, &value.to_ne_bytes())
    }

    /// Append every element in `elements`, copied contiguously.
    ///
    /// `elements.len()` must be a whole multiple of the element size.
    /// Capacity is grown at most once for the whole batch.
    pub fn extend(&mut self, arena: &mut Arena, elements: &[u8]) -> Result<(), DynArrayError> {
        self.check_arena(arena)?;
        let elem_size = self.elem_size.get();
        if elements.len() % elem_size != 0 {
            return Err(ContractViolation::PartialElement {
                elem_size,
                len: elements.len(),
            }
            .into());
        }

        let count = elements.len() / elem_size;
        if count == 0 {
            return Ok(());
        }
        let required = self.len.checked_add(count).ok_or_else(|| overflow(arena))?;
        self.ensure_capacity(arena, required)?;

        let start = self.len * elem_size;
        self.storage_mut(arena)?[start..start + elements.len()].copy_from_slice(elements);
        self.len = required;
        Ok(())
    }

    // ── Read ────────────────────────────────────────────────────

    /// Borrow the element at `index`.
    ///
    /// The view borrows `arena`, so it cannot be held across any call that
    /// might grow (and so relocate) the array.
    pub fn get_raw<'a>(&self, arena: &'a Arena, index: usize) -> Result<&'a [u8], DynArrayError> {
        self.check_arena(arena)?;
        self.check_index(index)?;
        let range = self.element_range(index);
        let storage = self.storage(arena)?;
        Ok(&storage[range])
    }

    /// Mutably borrow the element at `index` for in-place modification.
    pub fn get_raw_mut<'a>(
        &self,
        arena: &'a mut Arena,
        index: usize,
    ) -> Result<&'a mut [u8], DynArrayError> {
        self.check_arena(arena)?;
        self.check_index(index)?;
        let range = self.element_range(index);
        let storage = self.storage_mut(arena)?;
        Ok(&mut storage[range])
    }

    /// Read the byte at `index` from an array of 1-byte elements.
    pub fn get_byte(&self, arena: &Arena, index: usize) -> Result<u8, DynArrayError> {
        self.check_width("byte", 1)?;
        Ok(self.get_raw(arena, index)?[0])
    }

    /// Read the [`Word`] at `index` from an array of [`WORD_SIZE`]-byte
    /// elements.
    pub fn get_word(&self, arena: &Arena, index: usize) -> Result<Word, DynArrayError> {
        self.check_width("word", WORD_SIZE)?;
        let mut bytes = [0u8; WORD_SIZE];
        bytes.copy_from_slice(self.get_raw(arena, index)?);
        Ok(Word::from_ne_bytes(bytes))
    }

    /// The live elements as one contiguous byte slice.
    pub fn as_bytes<'a>(&self, arena: &'a Arena) -> Result<&'a [u8], DynArrayError> {
        self.check_arena(arena)?;
        let end = self.len * self.elem_size.get();
        Ok(&self.storage(arena)?[..end])
    }

    /// Iterate over element views in index order.
    pub fn iter<'a>(&self, arena: &'a Arena) -> Result<ChunksExact<'a, u8>, DynArrayError> {
        Ok(self.as_bytes(arena)?.chunks_exact(self.elem_size.get()))
    }

    // ── Write / resize ──────────────────────────────────────────

    /// Overwrite the element at `index` in place. Never grows.
    pub fn set_raw(
        &mut self,
        arena: &mut Arena,
        index: usize,
        element: &[u8],
    ) -> Result<(), DynArrayError> {
        self.check_arena(arena)?;
        self.check_element(element)?;
        self.check_index(index)?;
        let range = self.element_range(index);
        self.storage_mut(arena)?[range].copy_from_slice(element);
        Ok(())
    }

    /// Set the logical length to `new_len`.
    ///
    /// Growing past capacity reallocates first. Elements exposed between the
    /// old and new length hold whatever bytes the region already contained;
    /// they are not guaranteed to be zero. Shrinking only lowers the length:
    /// capacity never decreases.
    pub fn resize(&mut self, arena: &mut Arena, new_len: usize) -> Result<(), DynArrayError> {
        self.check_arena(arena)?;
        if new_len == self.len {
            return Ok(());
        }
        self.ensure_capacity(arena, new_len)?;
        self.len = new_len;
        Ok(())
    }

    /// Ensure room for at least `additional` more elements.
    pub fn reserve(&mut self, arena: &mut Arena, additional: usize) -> Result<(), DynArrayError> {
        self.check_arena(arena)?;
        let required = self
            .len
            .checked_add(additional)
            .ok_or_else(|| overflow(arena))?;
        self.ensure_capacity(arena, required)
    }

    /// Drop every element, keeping capacity.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Number of elements stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements that fit without further allocation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Width of one element in bytes.
    pub fn elem_size(&self) -> usize {
        self.elem_size.get()
    }

    /// The arena this array draws from.
    pub fn arena_id(&self) -> ArenaId {
        self.arena
    }

    /// The region currently backing the array, if any.
    pub fn storage_region(&self) -> Option<Region> {
        self.storage
    }

    // ── Internals ───────────────────────────────────────────────

    /// Grow so that `required` elements fit. No-op if they already do.
    fn ensure_capacity(&mut self, arena: &mut Arena, required: usize) -> Result<(), DynArrayError> {
        if required <= self.capacity {
            return Ok(());
        }
        let new_capacity = grown_capacity(self.capacity, required);
        self.reallocate(arena, new_capacity)
    }

    /// Move storage to a fresh region of `new_capacity` elements.
    ///
    /// Nothing about `self` changes unless the arena grants the region.
    fn reallocate(&mut self, arena: &mut Arena, new_capacity: usize) -> Result<(), DynArrayError> {
        let bytes = new_capacity
            .checked_mul(self.elem_size.get())
            .ok_or_else(|| overflow(arena))?;

        let region = arena.alloc(bytes).map_err(|source| {
            debug!(
                arena = %self.arena,
                capacity = self.capacity,
                wanted = new_capacity,
                elem_size = self.elem_size.get(),
                error = %source,
                "array growth refused"
            );
            DynArrayError::OutOfMemory { source }
        })?;

        if let Some(old) = self.storage {
            arena.copy_region(old, region, self.len * self.elem_size.get())?;
        }

        debug!(
            arena = %self.arena,
            old_capacity = self.capacity,
            new_capacity,
            elem_size = self.elem_size.get(),
            offset = region.offset(),
            "array storage grown"
        );
        self.storage = Some(region);
        self.capacity = new_capacity;
        Ok(())
    }

    fn storage<'a>(&self, arena: &'a Arena) -> Result<&'a [u8], ArenaError> {
        match self.storage {
            Some(region) => arena.slice(region),
            None => Ok(Default::default()),
        }
    }

    fn storage_mut<'a>(&self, arena: &'a mut Arena) -> Result<&'a mut [u8], ArenaError> {
        match self.storage {
            Some(region) => arena.slice_mut(region),
            None => Ok(Default::default()),
        }
    }

    fn element_range(&self, index: usize) -> Range<usize> {
        let start = index * self.elem_size.get();
        start..start + self.elem_size.get()
    }

    fn check_arena(&self, arena: &Arena) -> Result<(), ContractViolation> {
        if arena.id() != self.arena {
            return Err(ContractViolation::ForeignArena {
                owner: self.arena,
                given: arena.id(),
            });
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), DynArrayError> {
        if index >= self.len {
            return Err(DynArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }
        Ok(())
    }

    fn check_element(&self, element: &[u8]) -> Result<(), ContractViolation> {
        if element.len() != self.elem_size.get() {
            return Err(ContractViolation::ElementSizeMismatch {
                expected: self.elem_size.get(),
                actual: element.len(),
            });
        }
        Ok(())
    }

    fn check_width(&self, accessor: &'static str, width: usize) -> Result<(), ContractViolation> {
        if self.elem_size.get() != width {
            return Err(ContractViolation::AccessorWidth {
                accessor,
                width,
                elem_size: self.elem_size.get(),
            });
        }
        Ok(())
    }
}

/// The error reported when an element count cannot be expressed in bytes.
fn overflow(arena: &Arena) -> DynArrayError {
    DynArrayError::OutOfMemory {
        source: ArenaError::Exhausted {
            requested: usize::MAX,
            used: arena.used(),
            capacity: arena.capacity(),
        },
    }
}
