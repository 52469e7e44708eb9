//! Reading secrets from stdin.

use std::io::BufRead;

use anyhow::{Context, Result};
use zeroize::Zeroizing;

/// Initial buffer size; secrets shorter than this never reallocate, so no
/// stale copy is left behind by buffer growth.
const SECRET_CAPACITY: usize = 1024;

/// Read one line of raw bytes and strip a single trailing `\n` or `\r\n`.
///
/// The secret need not be UTF-8. Everything else, leading and trailing
/// spaces included, is part of the secret. An empty stdin yields an empty
/// secret.
pub fn read_secret(mut reader: impl BufRead) -> Result<Zeroizing<Vec<u8>>> {
    let mut line = Zeroizing::new(Vec::with_capacity(SECRET_CAPACITY));
    reader
        .read_until(b'\n', &mut line)
        .context("failed to read secret from stdin")?;
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
    Ok(line)
}
