//! Statistical smoke tests for big-integer sampling.
//!
//! These catch degenerate output (constant values, stuck bits, modulo bias)
//! rather than prove uniformity. Thresholds are loose enough that a working
//! CSPRNG fails them with negligible probability.

use num_bigint::BigUint;
use num_traits::ToPrimitive;
use rand::rngs::OsRng;
use sixvault_crypto_core::random::{uniform_below, uniform_nonzero};

/// Shannon entropy of a byte slice (bits per byte).
///
/// H = -Σ p(x) * log2(p(x)) for each byte value x in [0, 255]
#[allow(clippy::cast_precision_loss)]
fn shannon_entropy(data: &[u8]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let mut freq = [0u64; 256];
    for &b in data {
        freq[b as usize] = freq[b as usize].saturating_add(1);
    }
    let len = data.len() as f64;
    freq.iter()
        .filter(|&&f| f > 0)
        .map(|&f| {
            let p = f as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// 64 KB of 256-bit samples — expected entropy ~7.997 bits/byte.
#[test]
fn uniform_below_256_bit_entropy() {
    let max = BigUint::from(1u32) << 256u32;
    let mut bytes = Vec::with_capacity(65_536);
    while bytes.len() < 65_536 {
        let v = uniform_below(&mut OsRng, &max).unwrap();
        let mut be = v.to_bytes_be();
        // Left-pad so leading zero bytes are counted too.
        let mut padded = vec![0u8; 32 - be.len()];
        padded.append(&mut be);
        bytes.extend_from_slice(&padded);
    }
    let entropy = shannon_entropy(&bytes);
    assert!(
        entropy > 7.99,
        "uniform_below(2^256) entropy too low: {entropy:.4} (expected > 7.99)"
    );
}

/// A bound just above a power of two forces heavy rejection; results must
/// still spread evenly across [0, max).
#[test]
fn no_modulo_bias_near_power_of_two() {
    // 129 needs 8 bits; a naive `% 129` on a byte would double-weight 0..=126.
    let max = BigUint::from(129u32);
    let mut low = 0u32;
    let mut high = 0u32;
    for _ in 0..20_000 {
        let v = uniform_below(&mut OsRng, &max).unwrap().to_u32().unwrap();
        if v < 64 {
            low += 1;
        } else if v >= 65 {
            high += 1;
        }
    }
    // Both halves hold 64 values: expect ~9922 each.
    let diff = low.abs_diff(high);
    assert!(diff < 800, "skewed halves: low={low} high={high}");
}

/// Every bucket of a small range is hit close to its expected count.
#[test]
fn uniform_nonzero_bucket_counts() {
    let max = BigUint::from(11u32);
    let mut counts = [0u32; 11];
    for _ in 0..50_000 {
        let v = uniform_nonzero(&mut OsRng, &max).unwrap().to_usize().unwrap();
        counts[v] += 1;
    }
    assert_eq!(counts[0], 0, "zero drawn from [1, max)");
    // Expected 5000 per bucket; sigma ~67.
    for (value, &count) in counts.iter().enumerate().skip(1) {
        assert!(
            (4500..=5500).contains(&count),
            "bucket {value} count {count} outside [4500, 5500]"
        );
    }
}
