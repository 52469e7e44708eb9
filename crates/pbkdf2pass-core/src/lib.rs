//! `pbkdf2pass-core`: salted PBKDF2 password hashing.
//!
//! Secrets are stretched with PBKDF2 under a per-record random salt and
//! stored as a single line of text:
//!
//! ```text
//! sha256:1000:ZrKNvl0eIWr6GNtBYDCSdMOjQvchBeBZ:NWLjFJRWx6opWqCultjr7XvvLBjYzMRN
//! ```
//!
//! ```
//! use pbkdf2pass_core::{Config, PasswordRecord};
//!
//! let record = pbkdf2pass_core::encode("Testing1234", &Config::default())?;
//! let stored = record.to_string();
//!
//! let record: PasswordRecord = stored.parse()?;
//! assert!(record.validate("Testing1234"));
//! assert!(!record.validate("BADPASSWORD"));
//! # Ok::<(), pbkdf2pass_core::PassError>(())
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod registry;

pub mod config;

pub mod compare;

pub mod record;

pub mod codec;

pub use codec::{Codec, ResolvedParams};
pub use compare::constant_time_eq;
pub use config::{
    Config, DEFAULT_ALGORITHM, DEFAULT_HASH_LEN, DEFAULT_ITERATION_COUNT, DEFAULT_SALT_LEN,
};
pub use error::PassError;
pub use record::{DecodedRecord, PasswordRecord};
pub use registry::{HashRegistry, PrfFn};

/// Encode `secret` with the standard registry.
///
/// # Errors
///
/// Returns `PassError::RandomGeneration` if a salt had to be generated and
/// the OS random source failed.
pub fn encode(secret: impl AsRef<[u8]>, config: &Config) -> Result<PasswordRecord, PassError> {
    Codec::standard().encode(secret, config)
}

/// Parse a stored record with the standard registry.
///
/// # Errors
///
/// See [`Codec::parse`].
pub fn parse(s: &str) -> Result<PasswordRecord, PassError> {
    Codec::standard().parse(s)
}
