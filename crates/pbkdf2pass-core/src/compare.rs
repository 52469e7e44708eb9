//! Constant-time comparison of derived keys.

/// Constant-time byte comparison.
///
/// Returns `true` iff both slices have equal length and identical contents.
/// Uses bitwise OR accumulation to avoid short-circuit timing leaks.
///
/// The early return on length mismatch does not leak anything useful: the
/// derived-key length is recoverable from the stored record itself, and the
/// candidate is always re-derived to that same length.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    std::hint::black_box(diff) == 0
}
