//! A failing entropy source must surface as `CryptoError::Entropy`.

use num_bigint::BigUint;
use rand::{CryptoRng, RngCore};
use sixvault_crypto_core::prime::generate_prime_with;
use sixvault_crypto_core::shamir::{split_with, ShamirParams};
use sixvault_crypto_core::CryptoError;

/// CSPRNG that always reports failure.
struct BrokenRng;

impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new("getrandom unavailable"))
    }
}

impl CryptoRng for BrokenRng {}

#[test]
fn split_fails_with_entropy_error() {
    // The secret is large enough that the prime search needs Miller-Rabin witnesses.
    let secret = BigUint::from(u64::MAX);
    let err = split_with(&secret, &ShamirParams::new(5, 3), &mut BrokenRng).unwrap_err();
    assert!(matches!(err, CryptoError::Entropy(_)), "got {err:?}");
}

#[test]
fn prime_search_fails_with_entropy_error() {
    let err = generate_prime_with(&BigUint::from(1u64 << 40), 5, &mut BrokenRng).unwrap_err();
    assert!(matches!(err, CryptoError::Entropy(_)));
}

#[test]
fn bad_parameters_reported_before_entropy() {
    // Configuration errors win even with a broken source.
    let err = split_with(&BigUint::from(9u32), &ShamirParams::new(2, 3), &mut BrokenRng)
        .unwrap_err();
    assert!(matches!(err, CryptoError::Configuration(_)));
}
