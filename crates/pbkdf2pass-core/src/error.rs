//! Error types for `pbkdf2pass-core`.

use thiserror::Error;

/// Errors produced while encoding secrets or parsing stored records.
///
/// Validation never produces one of these: every malformed-record case
/// collapses into a `false` result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    /// The OS random source failed while generating a salt.
    #[error("salt generation failed: {0}")]
    RandomGeneration(String),

    /// Record text does not split into exactly four colon-separated parts.
    #[error("malformed record: found {parts} colon-separated parts, expected 4")]
    MalformedRecord {
        /// Number of parts actually observed.
        parts: usize,
    },

    /// Iteration field is not a positive base-10 integer.
    #[error("invalid iteration count: {0:?}")]
    InvalidIterationCount(String),

    /// Algorithm field is not a key of the hash registry.
    #[error("unknown algorithm: {0:?}")]
    UnknownAlgorithm(String),

    /// A stored salt or derived key is not valid base64.
    #[error("invalid base64 in {field} field")]
    InvalidEncoding {
        /// Which record field failed to decode (`"salt"` or `"derived key"`).
        field: &'static str,
    },
}
