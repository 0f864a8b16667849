//! Error type for double-array construction.

use thiserror::Error;

/// Errors raised while building a double array.
///
/// Lookup never fails; every variant here aborts [`Builder::build`](crate::Builder::build)
/// and the partially packed arrays are dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DartsError {
    /// No keys were supplied, or the root produced no sibling group.
    #[error("empty key set")]
    EmptyInput,

    /// Symbols at one depth were not non-decreasing inside a node's key range.
    #[error("keys out of order at index {index}, depth {depth}: code {cur} follows {prev}")]
    FetchOrder {
        /// Index into the sorted key set where the decrease was seen
        index: usize,
        /// Depth being partitioned
        depth: usize,
        /// Encoded symbol of the previous run
        prev: u32,
        /// Encoded symbol that broke the order
        cur: u32,
    },

    /// The backing arrays could not grow to the requested length.
    #[error("double array allocation failed: requested {requested} cells")]
    Allocation {
        /// Number of cells requested
        requested: usize,
    },

    /// A symbol's encoded value (`symbol + 1`) does not fit the transition alphabet.
    #[error("symbol {symbol:#x} cannot be encoded")]
    SymbolOverflow {
        /// Raw symbol value
        symbol: u32,
    },
}

impl DartsError {
    pub(crate) fn allocation(requested: usize) -> Self {
        Self::Allocation { requested }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DartsError>;
