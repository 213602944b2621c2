//! Capacity growth policy.
//!
//! When an operation needs `required` elements and the array holds
//! `current`, the new capacity is the largest of `required`, twice
//! `current`, and [`MIN_GROWTH_CAPACITY`]. Doubling that would overflow
//! `usize` falls back to `required`.

/// Smallest capacity an array grows to, so the first push from an empty
/// array does not request a degenerate allocation.
pub const MIN_GROWTH_CAPACITY: usize = 8;

/// Capacity to grow to from `current` so that at least `required`
/// elements fit.
///
/// Only meaningful when `required > current`.
pub fn grown_capacity(current: usize, required: usize) -> usize {
    let doubled = current.checked_mul(2).unwrap_or(required);
    required.max(doubled).max(MIN_GROWTH_CAPACITY)
}
