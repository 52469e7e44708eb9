//! Algorithm name → PBKDF2 PRF lookup table.
//!
//! The table is immutable once built. [`HashRegistry::global`] hands out the
//! process-wide standard table; callers that need a different set of
//! algorithms build their own with [`HashRegistry::from_entries`] and pass it
//! to a [`Codec`](crate::codec::Codec).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use pbkdf2::pbkdf2_hmac;
use sha1::Sha1;
use sha2::{Sha224, Sha256, Sha384, Sha512_256};

// ── Types ────────────────────────────────────────────────────────────

/// PBKDF2 specialised to one HMAC pseudorandom function.
///
/// Fills `out` completely; the output length is `out.len()`.
pub type PrfFn = fn(secret: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]);

/// Algorithm used when a configuration names none, or names one the
/// registry does not know.
pub const DEFAULT_ALGORITHM: &str = "sha256";

// ── Registry ─────────────────────────────────────────────────────────

/// Immutable mapping from algorithm name to PRF.
#[derive(Clone)]
pub struct HashRegistry {
    entries: BTreeMap<&'static str, PrfFn>,
}

impl HashRegistry {
    /// The standard table: `sha1`, `sha224`, `sha256`, `sha384`, `sha512`.
    ///
    /// `sha512` is HMAC-SHA-512/256 (the FIPS 180-4 truncated variant).
    /// Records already in storage were written with that PRF under that
    /// name, so the mapping cannot change without invalidating them.
    #[must_use]
    pub fn standard() -> Self {
        Self::from_entries([
            ("sha1", pbkdf2_hmac::<Sha1> as PrfFn),
            ("sha224", pbkdf2_hmac::<Sha224> as PrfFn),
            ("sha256", pbkdf2_hmac::<Sha256> as PrfFn),
            ("sha384", pbkdf2_hmac::<Sha384> as PrfFn),
            ("sha512", pbkdf2_hmac::<Sha512_256> as PrfFn),
        ])
    }

    /// Build a table from explicit entries. Later duplicates win.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, PrfFn)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Process-wide standard table, built on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceLock<HashRegistry> = OnceLock::new();
        GLOBAL.get_or_init(Self::standard)
    }

    /// PRF registered under `name`, if any.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<PrfFn> {
        self.entries.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for HashRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.names()).finish()
    }
}

impl Default for HashRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Tests ────────────────────────────────────────────────────────────
