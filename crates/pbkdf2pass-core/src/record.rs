//! Stored password records and their canonical text form.
//!
//! ```text
//! <algorithm>:<iteration count>:<base64 salt>:<base64 derived key>
//! ```
//!
//! Parsing checks the structure, the iteration count and the algorithm
//! only. The salt and derived key stay as opaque text until
//! [`PasswordRecord::decode`] is called, so a record holding corrupt base64
//! parses fine and simply never validates.

use std::fmt;
use std::str::FromStr;

use data_encoding::BASE64;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec::Codec;
use crate::error::PassError;
use crate::registry::HashRegistry;

// ── Constants ────────────────────────────────────────────────────────

/// Field separator of the text form.
pub const SEPARATOR: char = ':';

// ── Types ────────────────────────────────────────────────────────────

/// A derived password hash together with the parameters that produced it.
///
/// Built by [`Codec::encode`] or by parsing; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PasswordRecord {
    algorithm: String,
    iteration_count: u32,
    salt: String,
    derived_key: String,
}

impl PasswordRecord {
    pub(crate) fn new(
        algorithm: impl Into<String>,
        iteration_count: u32,
        salt: &[u8],
        derived_key: &[u8],
    ) -> Self {
        Self {
            algorithm: algorithm.into(),
            iteration_count,
            salt: BASE64.encode(salt),
            derived_key: BASE64.encode(derived_key),
        }
    }

    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    /// Salt as stored (base64 text).
    #[must_use]
    pub fn salt(&self) -> &str {
        &self.salt
    }

    /// Derived key as stored (base64 text).
    #[must_use]
    pub fn derived_key(&self) -> &str {
        &self.derived_key
    }

    /// Decode the salt and derived key.
    ///
    /// Decoding is strict RFC 4648 padded base64: the unused bits of the
    /// last symbol must be zero, and whitespace or line breaks are not
    /// skipped. A field such as `AB==` (non-zero trailing bits) is rejected
    /// even though some lenient decoders accept it, so a record carrying one
    /// never validates. Records written by [`Codec::encode`] are always in
    /// canonical form.
    ///
    /// # Errors
    ///
    /// Returns `PassError::InvalidEncoding` naming the first field that is
    /// not valid padded base64.
    pub fn decode(&self) -> Result<DecodedRecord, PassError> {
        let derived_key = BASE64
            .decode(self.derived_key.as_bytes())
            .map_err(|_| PassError::InvalidEncoding {
                field: "derived key",
            })?;
        let salt = BASE64
            .decode(self.salt.as_bytes())
            .map_err(|_| PassError::InvalidEncoding { field: "salt" })?;
        Ok(DecodedRecord { salt, derived_key })
    }

    /// Check `candidate` against this record with the standard registry.
    ///
    /// See [`Codec::validate`].
    #[must_use]
    pub fn validate(&self, candidate: impl AsRef<[u8]>) -> bool {
        Codec::standard().validate(self, candidate.as_ref())
    }
}

// ── Parsing ──────────────────────────────────────────────────────────

/// Parse the text form against `registry`.
///
/// Checks run in a fixed order and the first failure wins: part count,
/// then iteration count, then algorithm. The base64 fields are copied
/// verbatim and not inspected.
pub(crate) fn parse(s: &str, registry: &HashRegistry) -> Result<PasswordRecord, PassError> {
    let parts: Vec<&str> = s.split(SEPARATOR).collect();
    let [algorithm, iterations, salt, derived_key] = parts[..] else {
        return Err(PassError::MalformedRecord { parts: parts.len() });
    };

    let iteration_count = parse_iteration_count(iterations)?;

    if !registry.contains(algorithm) {
        return Err(PassError::UnknownAlgorithm(algorithm.to_owned()));
    }

    Ok(PasswordRecord {
        algorithm: algorithm.to_owned(),
        iteration_count,
        salt: salt.to_owned(),
        derived_key: derived_key.to_owned(),
    })
}

/// Plain base-10 digits only: no sign, no whitespace, no zero, no overflow.
fn parse_iteration_count(field: &str) -> Result<u32, PassError> {
    let invalid = || PassError::InvalidIterationCount(field.to_owned());
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match field.parse::<u32>() {
        Ok(0) | Err(_) => Err(invalid()),
        Ok(n) => Ok(n),
    }
}

// ── Text and serde forms ─────────────────────────────────────────────

impl fmt::Display for PasswordRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{SEPARATOR}{}{SEPARATOR}{}{SEPARATOR}{}",
            self.algorithm, self.iteration_count, self.salt, self.derived_key
        )
    }
}

impl FromStr for PasswordRecord {
    type Err = PassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s, HashRegistry::global())
    }
}

impl Serialize for PasswordRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PasswordRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Decoded form ─────────────────────────────────────────────────────

/// Raw salt and derived-key bytes of a [`PasswordRecord`].
///
/// Zeroized on drop; `Debug` output is masked.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DecodedRecord {
    salt: Vec<u8>,
    derived_key: Vec<u8>,
}

impl DecodedRecord {
    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    #[must_use]
    pub fn derived_key(&self) -> &[u8] {
        &self.derived_key
    }
}

impl fmt::Debug for DecodedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DecodedRecord(***)")
    }
}

// ── Tests ────────────────────────────────────────────────────────────
