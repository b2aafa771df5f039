use thiserror::Error;

/// Core error type shared across Imeigen crates.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Input violates a digit-string contract (wrong length or a
    /// non-digit character).
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// A batch request exceeds the generation safety ceiling.
    #[error("limit exceeded: requested {requested} IMEIs per TAC, ceiling is {limit}")]
    LimitExceeded { requested: u32, limit: u32 },
    /// The device catalog violates internal invariants.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

/// Convenience alias for results returned by Imeigen crates.
pub type Result<T> = std::result::Result<T, Error>;
