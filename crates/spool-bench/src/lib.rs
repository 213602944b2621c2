//! Benchmark profiles and utilities for spool arenas and arrays.
//!
//! - [`reference_arena`]: a 16 MiB arena sized for every benchmark here
//! - [`payload`]: deterministic pseudo-random bytes via seed
//! - [`fill_bytes`]: push a payload one byte at a time

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use spool_array::{Arena, DynArray, DynArrayError};

/// Bytes reserved by [`reference_arena`].
pub const REFERENCE_ARENA_BYTES: usize = 16 << 20;

/// Build the reference benchmark arena: 16 MiB, default alignment.
pub fn reference_arena() -> Arena {
    Arena::new(REFERENCE_ARENA_BYTES).expect("16 MiB reservation")
}

/// Deterministic pseudo-random payload of `len` bytes.
///
/// Same `(len, seed)` always yields the same bytes.
pub fn payload(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (state >> 56) as u8
        })
        .collect()
}

/// Push every byte of `bytes` onto a fresh, unhinted byte array.
pub fn fill_bytes(arena: &mut Arena, bytes: &[u8]) -> Result<DynArray, DynArrayError> {
    let mut array = DynArray::new(arena, 0, 1)?;
    for &b in bytes {
        array.push_byte(arena, b)?;
    }
    Ok(array)
}
