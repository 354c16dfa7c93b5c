use std::io;

use thiserror::Error;

/// Unified error type for the store.
///
/// Lookups never fail: a missing name is `None` and a missing value counts 0.
#[derive(Debug, Error)]
pub enum Error {
    /// ROLLBACK issued while no transaction frame is open.
    #[error("no transaction active")]
    NoActiveTransaction,
    /// A configured capacity (or the identifier space) ran out.
    #[error("resource exhausted: {resource} limit of {limit} reached")]
    ResourceExhausted { resource: &'static str, limit: u64 },
    /// The indexes disagree with the record store.
    #[error("Corruption: {0}")]
    Corruption(String),
    /// IO error from the line front end.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias used throughout the store.
pub type Result<T> = std::result::Result<T, Error>;
