//! Entropy checks on generated salts.
//!
//! Salts come from the OS CSPRNG. Over enough bytes the byte-value
//! distribution should sit close to the 8 bits/byte maximum, and no two
//! salts should repeat.

use std::collections::HashSet;

use pbkdf2pass_core::{Codec, Config};

/// Number of salts generated per test.
const SALT_COUNT: usize = 2_000;

/// Lower bound on Shannon entropy in bits per byte.
const MIN_ENTROPY: f64 = 7.9;

#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(bytes: &[u8]) -> f64 {
    let mut counts = [0usize; 256];
    for &b in bytes {
        counts[usize::from(b)] += 1;
    }
    let total = bytes.len() as f64;
    counts
        .iter()
        .filter(|&&c| c > 0)
        .map(|&c| {
            let p = c as f64 / total;
            -p * p.log2()
        })
        .sum()
}

fn generated_salts() -> Vec<Vec<u8>> {
    let codec = Codec::standard();
    let config = Config::new();
    (0..SALT_COUNT)
        .map(|_| {
            codec
                .resolve(&config)
                .expect("resolve should succeed")
                .salt()
                .to_vec()
        })
        .collect()
}

#[test]
fn generated_salts_have_high_entropy() {
    let pooled: Vec<u8> = generated_salts().concat();
    let entropy = shannon_entropy(&pooled);
    assert!(
        entropy > MIN_ENTROPY,
        "salt entropy {entropy:.3} bits/byte is below {MIN_ENTROPY}"
    );
}

#[test]
fn generated_salts_never_repeat() {
    let salts = generated_salts();
    let unique: HashSet<&Vec<u8>> = salts.iter().collect();
    assert_eq!(unique.len(), salts.len());
}

#[test]
fn shannon_entropy_of_constant_input_is_zero() {
    assert!(shannon_entropy(&[7u8; 64]).abs() < f64::EPSILON);
}
