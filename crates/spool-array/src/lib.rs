//! Growable arrays of fixed-size elements backed by a spool [`Arena`].
//!
//! A [`DynArray`] stores opaque elements of a width chosen at construction.
//! It never calls the general-purpose allocator for element storage; every
//! growth request goes through the arena passed to the operation, and the
//! region it outgrows is simply abandoned until the arena is freed.
//!
//! # Example
//!
//! ```rust
//! use spool_array::{Arena, DynArray};
//!
//! let mut arena = Arena::new(1 << 16).unwrap();
//! let mut bytes = DynArray::new(&mut arena, 0, 1).unwrap();
//! for &b in b"spool" {
//!     bytes.push_byte(&mut arena, b).unwrap();
//! }
//! assert_eq!(bytes.len(), 5);
//! assert_eq!(bytes.get_byte(&arena, 0).unwrap(), b's');
//! assert_eq!(bytes.as_bytes(&arena).unwrap(), b"spool");
//! ```
//!
//! # Views and growth
//!
//! Element views such as [`DynArray::get_raw`] borrow the arena. Growth
//! needs `&mut Arena`, so a view cannot be held across an operation that
//! might relocate storage.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod error;
pub mod growth;

pub use array::{DynArray, Word, WORD_SIZE};
pub use error::{ContractViolation, DynArrayError};
pub use growth::MIN_GROWTH_CAPACITY;

// Arena API, so most users need only this crate.
pub use spool_arena::{Arena, ArenaConfig, ArenaError, ArenaId, Region};
