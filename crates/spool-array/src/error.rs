//! Dynamic array error types.

use std::error::Error;
use std::fmt;

use spool_arena::{ArenaError, ArenaId};

/// Errors reported by [`DynArray`](crate::DynArray) operations.
///
/// Every error leaves the array exactly as it was before the call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DynArrayError {
    /// Growth was needed but the arena could not supply the bytes.
    ///
    /// Arena exhaustion is permanent for the arena's remaining lifetime,
    /// so retrying the same operation will fail the same way.
    OutOfMemory {
        /// The arena's refusal.
        source: ArenaError,
    },
    /// A read or in-place write addressed an index outside `[0, len)`.
    IndexOutOfRange {
        /// The index requested.
        index: usize,
        /// The array's logical length at the time of the call.
        len: usize,
    },
    /// The caller broke the array's usage contract.
    Contract(ContractViolation),
}

impl fmt::Display for DynArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfMemory { source } => write!(f, "array growth failed: {source}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::Contract(violation) => write!(f, "contract violation: {violation}"),
        }
    }
}

impl Error for DynArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::OutOfMemory { source } => Some(source),
            Self::Contract(violation) => Some(violation),
            Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<ContractViolation> for DynArrayError {
    fn from(violation: ContractViolation) -> Self {
        Self::Contract(violation)
    }
}

impl From<ArenaError> for DynArrayError {
    /// A region resolved against the wrong arena is a contract violation;
    /// every other arena error means storage could not be obtained.
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::ForeignRegion { region, arena } => {
                Self::Contract(ContractViolation::ForeignArena {
                    owner: region,
                    given: arena,
                })
            }
            source => Self::OutOfMemory { source },
        }
    }
}

/// Programming errors detected at the call site.
///
/// These are not expected to be recovered from, but they are reported
/// rather than panicking so that the caller decides how to halt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractViolation {
    /// An array was constructed with an element size of zero.
    ZeroElementSize,
    /// A single-element source did not match the array's element size.
    ElementSizeMismatch {
        /// The array's element size in bytes.
        expected: usize,
        /// Length of the slice supplied.
        actual: usize,
    },
    /// A bulk source was not a whole number of elements.
    PartialElement {
        /// The array's element size in bytes.
        elem_size: usize,
        /// Length of the slice supplied.
        len: usize,
    },
    /// A typed accessor was used on an array of a different width.
    AccessorWidth {
        /// Name of the accessor (`"byte"` or `"word"`).
        accessor: &'static str,
        /// Width the accessor reads or writes, in bytes.
        width: usize,
        /// The array's element size in bytes.
        elem_size: usize,
    },
    /// An array was used with an arena other than the one it draws from.
    ForeignArena {
        /// The arena the array belongs to.
        owner: ArenaId,
        /// The arena that was passed in.
        given: ArenaId,
    },
}

impl fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroElementSize => write!(f, "element size must be at least 1 byte"),
            Self::ElementSizeMismatch { expected, actual } => {
                write!(f, "element is {actual} bytes, array element size is {expected}")
            }
            Self::PartialElement { elem_size, len } => {
                write!(f, "{len} bytes is not a whole number of {elem_size}-byte elements")
            }
            Self::AccessorWidth {
                accessor,
                width,
                elem_size,
            } => {
                write!(
                    f,
                    "{accessor} accessor is {width} bytes wide, array element size is {elem_size}"
                )
            }
            Self::ForeignArena { owner, given } => {
                write!(f, "array belongs to arena {owner}, got arena {given}")
            }
        }
    }
}

impl Error for ContractViolation {}
