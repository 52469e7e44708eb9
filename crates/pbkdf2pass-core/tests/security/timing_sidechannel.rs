//! Timing side-channel validation for derived-key comparison.
//!
//! Uses Welch's t-test to check that `constant_time_eq` takes the same time
//! whether two keys differ in their first byte or in their last. A plain
//! `==` would return earlier for the first-byte case.
//!
//! **Caveat:** statistical test, sensitive to scheduler noise on shared
//! machines. Ignored by default; run with `cargo test -- --ignored`.

use std::time::Instant;

use pbkdf2pass_core::constant_time_eq;

/// Number of timing samples per class.
const SAMPLES: usize = 20_000;

/// Welch's t-test threshold. |t| < 4.5 means no detectable timing difference.
const T_THRESHOLD: f64 = 4.5;

/// Derived-key length under test (longer keys amplify any leak).
const KEY_LEN: usize = 256;

#[inline(never)]
fn black_box_compare(a: &[u8], b: &[u8]) -> bool {
    std::hint::black_box(constant_time_eq(std::hint::black_box(a), std::hint::black_box(b)))
}

/// `t = (mean_a - mean_b) / sqrt(var_a/n_a + var_b/n_b)`
#[allow(clippy::cast_precision_loss)]
fn welch_t_statistic(a: &[f64], b: &[f64]) -> f64 {
    if a.len() < 2 || b.len() < 2 {
        return f64::NAN;
    }

    let n_a = a.len() as f64;
    let n_b = b.len() as f64;

    let mean_a: f64 = a.iter().sum::<f64>() / n_a;
    let mean_b: f64 = b.iter().sum::<f64>() / n_b;

    let var_a: f64 = a.iter().map(|x| (x - mean_a).powi(2)).sum::<f64>() / (n_a - 1.0);
    let var_b: f64 = b.iter().map(|x| (x - mean_b).powi(2)).sum::<f64>() / (n_b - 1.0);

    let denominator = (var_a / n_a + var_b / n_b).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    (mean_a - mean_b) / denominator
}

#[test]
#[ignore = "statistical timing test; run explicitly with --ignored"]
fn constant_time_eq_no_timing_leak() {
    let expected = vec![0xA5u8; KEY_LEN];

    // Class A: mismatch in the first byte.
    let mut early = expected.clone();
    early[0] ^= 0xFF;

    // Class B: mismatch in the last byte.
    let mut late = expected.clone();
    late[KEY_LEN - 1] ^= 0xFF;

    for _ in 0..1_000 {
        black_box_compare(&expected, &early);
        black_box_compare(&expected, &late);
    }

    let mut times_a = Vec::with_capacity(SAMPLES);
    let mut times_b = Vec::with_capacity(SAMPLES);

    for _ in 0..SAMPLES {
        let start = Instant::now();
        let _ = black_box_compare(&expected, &early);
        let elapsed_a = start.elapsed().as_nanos();

        let start = Instant::now();
        let _ = black_box_compare(&expected, &late);
        let elapsed_b = start.elapsed().as_nanos();

        #[allow(clippy::cast_precision_loss)]
        {
            times_a.push(elapsed_a as f64);
            times_b.push(elapsed_b as f64);
        }
    }

    let abs_t = welch_t_statistic(&times_a, &times_b).abs();
    eprintln!("constant_time_eq timing: |t| = {abs_t:.2} (threshold: {T_THRESHOLD})");

    assert!(
        abs_t < T_THRESHOLD,
        "timing side-channel detected: |t| = {abs_t:.2} exceeds {T_THRESHOLD}"
    );
}

#[test]
fn welch_t_test_identical_distributions() {
    let a = vec![1.0; 100];
    let b = vec![1.0; 100];
    let t = welch_t_statistic(&a, &b);
    assert!(t.abs() < 0.001, "identical distributions should yield t ≈ 0, got {t}");
}

#[test]
fn welch_t_test_different_distributions() {
    let a: Vec<f64> = (0..1000).map(|i| 100.0 + f64::from(i % 3)).collect();
    let b: Vec<f64> = (0..1000).map(|i| 200.0 + f64::from(i % 3)).collect();
    let t = welch_t_statistic(&a, &b);
    assert!(
        t.abs() > 100.0,
        "clearly different distributions should yield |t| >> 4.5, got {t:.2}"
    );
}
