//! Encoding configuration and its defaults.
//!
//! A [`Config`] may leave any field unset. Unset means empty for
//! `algorithm`, `None` or empty for `salt`, and `0` for the numeric fields;
//! [`Codec::resolve`](crate::codec::Codec::resolve) fills in the defaults
//! below.

use serde::{Deserialize, Serialize};

pub use crate::registry::DEFAULT_ALGORITHM;

// ── Constants ────────────────────────────────────────────────────────

/// Iteration count used when none is configured.
pub const DEFAULT_ITERATION_COUNT: u32 = 1000;

/// Salt length in bytes generated when no salt is supplied.
pub const DEFAULT_SALT_LEN: usize = 24;

/// Derived-key length in bytes when none is configured.
pub const DEFAULT_HASH_LEN: usize = 24;

// ── Types ────────────────────────────────────────────────────────────

/// Caller-supplied encoding parameters, any subset of which may be set.
///
/// Serializable so a deployment can keep its hashing policy in a config
/// file. The salt is never serialized: a fixed salt only makes sense for a
/// single call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Registry key of the PRF. Unknown names fall back to
    /// [`DEFAULT_ALGORITHM`] at encode time.
    pub algorithm: String,
    /// Fixed salt. `None` or empty means "generate `salt_length` bytes".
    #[serde(skip)]
    pub salt: Option<Vec<u8>>,
    /// PBKDF2 iteration count; `0` means [`DEFAULT_ITERATION_COUNT`].
    pub iteration_count: u32,
    /// Derived-key length in bytes; `0` means [`DEFAULT_HASH_LEN`].
    pub hash_length: usize,
    /// Generated salt length in bytes; `0` means [`DEFAULT_SALT_LEN`].
    pub salt_length: usize,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    #[must_use]
    pub fn with_salt(mut self, salt: impl Into<Vec<u8>>) -> Self {
        self.salt = Some(salt.into());
        self
    }

    #[must_use]
    pub const fn with_iteration_count(mut self, iteration_count: u32) -> Self {
        self.iteration_count = iteration_count;
        self
    }

    #[must_use]
    pub const fn with_hash_length(mut self, hash_length: usize) -> Self {
        self.hash_length = hash_length;
        self
    }

    #[must_use]
    pub const fn with_salt_length(mut self, salt_length: usize) -> Self {
        self.salt_length = salt_length;
        self
    }

    /// Supplied salt, treating an empty one as absent.
    pub(crate) fn fixed_salt(&self) -> Option<&[u8]> {
        self.salt.as_deref().filter(|s| !s.is_empty())
    }

    pub(crate) const fn effective_iteration_count(&self) -> u32 {
        if self.iteration_count == 0 {
            DEFAULT_ITERATION_COUNT
        } else {
            self.iteration_count
        }
    }

    pub(crate) const fn effective_hash_length(&self) -> usize {
        if self.hash_length == 0 {
            DEFAULT_HASH_LEN
        } else {
            self.hash_length
        }
    }

    pub(crate) const fn effective_salt_length(&self) -> usize {
        if self.salt_length == 0 {
            DEFAULT_SALT_LEN
        } else {
            self.salt_length
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
