//! Domain-level errors (no external dependencies beyond the pattern engine)

use thiserror::Error;

/// Domain errors represent misuse of the tree operations.
/// Duplicate inserts are not errors; `insert` reports them as `Ok(false)`.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("invalid key: key must contain at least one character")]
    InvalidKey,

    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

impl TreeError {
    /// Create a pattern error for the given source pattern.
    pub fn pattern(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            source,
        }
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
