//! Encoding and validation of password records.
//!
//! A [`Codec`] borrows a [`HashRegistry`] and does three things:
//! - [`Codec::encode`]: resolve a partial [`Config`], run PBKDF2, package
//!   the result as a [`PasswordRecord`]
//! - [`Codec::validate`]: re-derive a candidate under a record's parameters
//!   and compare in constant time
//! - [`Codec::parse`]: read the text form back against this registry
//!
//! # Unknown algorithms
//!
//! Encode and parse treat an unknown algorithm name differently. Encode
//! silently substitutes [`DEFAULT_ALGORITHM`], so a typo in a config never
//! fails a hashing call. Parse rejects the record with
//! `PassError::UnknownAlgorithm`, since a record's algorithm decides what its
//! hash means.

use std::fmt;

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::compare::constant_time_eq;
use crate::config::Config;
use crate::error::PassError;
use crate::record::{self, PasswordRecord};
use crate::registry::{HashRegistry, PrfFn, DEFAULT_ALGORITHM};

// ── Codec ────────────────────────────────────────────────────────────

/// Encoder/validator bound to one hash registry.
///
/// Holds nothing but a shared reference, so it is `Copy` and can be used
/// from any number of threads at once.
#[derive(Clone, Copy, Debug)]
pub struct Codec<'r> {
    registry: &'r HashRegistry,
}

impl Codec<'static> {
    /// Codec over [`HashRegistry::global`].
    #[must_use]
    pub fn standard() -> Self {
        Self::new(HashRegistry::global())
    }
}

impl Default for Codec<'static> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'r> Codec<'r> {
    #[must_use]
    pub const fn new(registry: &'r HashRegistry) -> Self {
        Self { registry }
    }

    #[must_use]
    pub const fn registry(&self) -> &'r HashRegistry {
        self.registry
    }

    /// Hash `secret` under `config`, generating a salt from the OS CSPRNG
    /// when the config supplies none.
    ///
    /// # Errors
    ///
    /// Returns `PassError::RandomGeneration` if the OS random source fails.
    pub fn encode(
        &self,
        secret: impl AsRef<[u8]>,
        config: &Config,
    ) -> Result<PasswordRecord, PassError> {
        self.encode_with_rng(secret, config, &mut OsRng)
    }

    /// [`encode`](Self::encode) with an explicit random source.
    ///
    /// # Errors
    ///
    /// Returns `PassError::RandomGeneration` if `rng` fails while a salt is
    /// being generated.
    pub fn encode_with_rng<R: RngCore + CryptoRng>(
        &self,
        secret: impl AsRef<[u8]>,
        config: &Config,
        rng: &mut R,
    ) -> Result<PasswordRecord, PassError> {
        let params = self.resolve_with_rng(config, rng)?;
        Ok(params.derive_record(secret.as_ref()))
    }

    /// Fill in every default of `config` without deriving anything.
    ///
    /// # Errors
    ///
    /// Returns `PassError::RandomGeneration` if a salt must be generated and
    /// the OS random source fails.
    pub fn resolve(&self, config: &Config) -> Result<ResolvedParams, PassError> {
        self.resolve_with_rng(config, &mut OsRng)
    }

    fn resolve_with_rng<R: RngCore + CryptoRng>(
        &self,
        config: &Config,
        rng: &mut R,
    ) -> Result<ResolvedParams, PassError> {
        let salt = match config.fixed_salt() {
            Some(salt) => salt.to_vec(),
            None => generate_salt(rng, config.effective_salt_length())?,
        };

        let (algorithm, prf) = match self.registry.lookup(&config.algorithm) {
            Some(prf) => (config.algorithm.clone(), prf),
            None => {
                if !config.algorithm.is_empty() {
                    tracing::debug!(
                        requested = %config.algorithm,
                        substitute = DEFAULT_ALGORITHM,
                        "unknown algorithm requested, using default"
                    );
                }
                let prf = self
                    .registry
                    .lookup(DEFAULT_ALGORITHM)
                    .ok_or_else(|| PassError::UnknownAlgorithm(DEFAULT_ALGORITHM.to_owned()))?;
                (DEFAULT_ALGORITHM.to_owned(), prf)
            }
        };

        Ok(ResolvedParams {
            algorithm,
            prf,
            salt,
            iteration_count: config.effective_iteration_count(),
            hash_length: config.effective_hash_length(),
        })
    }

    /// Check `candidate` against `record`.
    ///
    /// Total: every failure (corrupt base64, an algorithm this registry does
    /// not know, an empty stored key) is reported as `false`. The comparison
    /// itself runs in constant time over the derived-key length.
    #[must_use]
    pub fn validate(&self, record: &PasswordRecord, candidate: impl AsRef<[u8]>) -> bool {
        let decoded = match record.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting undecodable record");
                return false;
            }
        };

        let Some(prf) = self.registry.lookup(record.algorithm()) else {
            tracing::debug!(
                algorithm = record.algorithm(),
                "rejecting record with unregistered algorithm"
            );
            return false;
        };

        let expected = decoded.derived_key();
        if expected.is_empty() {
            tracing::debug!("rejecting record with empty derived key");
            return false;
        }

        let params = ResolvedParams {
            algorithm: record.algorithm().to_owned(),
            prf,
            salt: decoded.salt().to_vec(),
            iteration_count: record.iteration_count(),
            hash_length: expected.len(),
        };
        let actual = params.derive(candidate.as_ref());
        constant_time_eq(expected, &actual)
    }

    /// Parse the text form of a record against this codec's registry.
    ///
    /// # Errors
    ///
    /// - `PassError::MalformedRecord` if `s` is not four `:`-separated parts
    /// - `PassError::InvalidIterationCount` if the second part is not a
    ///   positive integer
    /// - `PassError::UnknownAlgorithm` if the first part is not registered
    pub fn parse(&self, s: &str) -> Result<PasswordRecord, PassError> {
        record::parse(s, self.registry)
    }
}

// ── Resolved parameters ──────────────────────────────────────────────

/// Fully resolved derivation parameters.
///
/// Produced by [`Codec::resolve`] (every default filled in, salt generated)
/// or internally by [`Codec::validate`] from a stored record. The PRF is
/// captured by value, so the parameters stay usable after the registry
/// that produced them is gone.
#[derive(Clone)]
pub struct ResolvedParams {
    algorithm: String,
    prf: PrfFn,
    salt: Vec<u8>,
    iteration_count: u32,
    hash_length: usize,
}

impl ResolvedParams {
    #[must_use]
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    #[must_use]
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    #[must_use]
    pub const fn iteration_count(&self) -> u32 {
        self.iteration_count
    }

    #[must_use]
    pub const fn hash_length(&self) -> usize {
        self.hash_length
    }

    /// Run PBKDF2 over `secret`. The output is zeroized on drop.
    #[must_use]
    pub fn derive(&self, secret: &[u8]) -> Zeroizing<Vec<u8>> {
        let mut out = Zeroizing::new(vec![0u8; self.hash_length]);
        (self.prf)(secret, &self.salt, self.iteration_count, out.as_mut_slice());
        out
    }

    /// Derive and package as a record.
    #[must_use]
    pub fn derive_record(&self, secret: &[u8]) -> PasswordRecord {
        let key = self.derive(secret);
        PasswordRecord::new(
            self.algorithm.clone(),
            self.iteration_count,
            &self.salt,
            &key,
        )
    }
}

impl fmt::Debug for ResolvedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedParams")
            .field("algorithm", &self.algorithm)
            .field("salt_len", &self.salt.len())
            .field("iteration_count", &self.iteration_count)
            .field("hash_length", &self.hash_length)
            .finish_non_exhaustive()
    }
}

// ── Salt generation ──────────────────────────────────────────────────

/// Fill `len` bytes from `rng`.
///
/// Uses the fallible `try_fill_bytes` so an exhausted or broken entropy
/// source surfaces as `PassError::RandomGeneration` instead of a panic.
fn generate_salt<R: RngCore + CryptoRng>(rng: &mut R, len: usize) -> Result<Vec<u8>, PassError> {
    let mut salt = vec![0u8; len];
    rng.try_fill_bytes(&mut salt)
        .map_err(|e| PassError::RandomGeneration(e.to_string()))?;
    Ok(salt)
}

// ── Tests ────────────────────────────────────────────────────────────
