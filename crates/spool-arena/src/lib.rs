//! Fixed-capacity bump arena with bulk teardown.
//!
//! An [`Arena`] reserves one contiguous block of bytes at creation and hands
//! out sub-regions by advancing a cursor. There is no per-allocation free:
//! the whole block is released at once by [`Arena::free`] (or on drop).
//!
//! # Architecture
//!
//! ```text
//! Arena
//! ├── ArenaId (process-unique, stamped into every Region)
//! ├── ArenaConfig (capacity + start-offset alignment, validated once)
//! └── Vec<u8> (reserved exactly once, zero-filled, bump cursor)
//! ```
//!
//! Granted memory is named by a [`Region`] handle rather than a pointer.
//! Regions are resolved to byte slices only through the arena that granted
//! them, so a borrowed view can never outlive the arena or survive a
//! mutation that needs `&mut Arena`.
//!
//! # Safety
//!
//! The crate is entirely safe Rust; all byte movement goes through slice
//! indexing and `copy_within`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod arena;
pub mod config;
pub mod error;
pub mod region;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use region::{ArenaId, Region};
