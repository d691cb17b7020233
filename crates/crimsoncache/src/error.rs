//! Error types for crimsoncache

use std::fmt;

/// Result type alias for cache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A mutating call was made before an eviction strategy was bound
    StrategyNotBound,

    /// An eviction strategy was already bound to this cache
    StrategyAlreadyBound,

    /// Key already present in the ordered store
    DuplicateKey,

    /// Capacity must be at least one entry
    InvalidCapacity(usize),

    /// Strategy did not nominate a live entry for eviction
    NoVictim(&'static str),

    /// Internal ordering invariant violated
    Invariant(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::StrategyNotBound => {
                write!(f, "No eviction strategy bound: bind one before using the cache")
            }
            Error::StrategyAlreadyBound => write!(f, "Eviction strategy already bound"),
            Error::DuplicateKey => write!(f, "Key already present"),
            Error::InvalidCapacity(cap) => {
                write!(f, "Invalid capacity: {} (must be greater than 0)", cap)
            }
            Error::NoVictim(strategy) => {
                write!(f, "Strategy '{}' did not select an eviction victim", strategy)
            }
            Error::Invariant(msg) => write!(f, "Invariant violated: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
