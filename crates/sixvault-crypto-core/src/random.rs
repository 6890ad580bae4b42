//! Cryptographically secure uniform sampling of big integers.
//!
//! This module provides:
//! - [`SecureRandom`] — the entropy capability every randomized operation takes
//! - [`uniform_below`] — uniform integer in `[0, max)`
//! - [`uniform_nonzero`] — uniform integer in `[1, max)`
//!
//! Sampling draws exactly as many bytes as `max - 1` needs, masks the unused
//! high bits of the leading byte, and rejects out-of-range draws. There is no
//! `% max` reduction anywhere, so the output carries no modulo bias.

// Big-integer arithmetic is unbounded; only the byte-length math is machine-sized.
#![allow(clippy::arithmetic_side_effects)]

use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Source of cryptographically secure random bytes.
///
/// Implemented for every `rand` generator marked [`CryptoRng`], so production
/// code passes `&mut rand::rngs::OsRng` and tests can pass a seeded
/// `StdRng`. Non-cryptographic generators do not satisfy the bound.
pub trait SecureRandom {
    /// Fill `dest` entirely with random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Entropy`] if the underlying source fails.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError>;
}

impl<R: RngCore + CryptoRng + ?Sized> SecureRandom for R {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), CryptoError> {
        self.try_fill_bytes(dest)
            .map_err(|e| CryptoError::Entropy(format!("CSPRNG fill failed: {e}")))
    }
}

/// Draw a uniform integer in `[0, max)`.
///
/// `max == 1` returns zero without consuming entropy.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] if `max` is zero
/// - [`CryptoError::Entropy`] if the source fails
pub fn uniform_below<R: SecureRandom + ?Sized>(
    rng: &mut R,
    max: &BigUint,
) -> Result<BigUint, CryptoError> {
    if max.is_zero() {
        return Err(CryptoError::Configuration(
            "sampling upper bound must be positive".to_string(),
        ));
    }
    if max.is_one() {
        return Ok(BigUint::zero());
    }

    let bits = (max - 1u32).bits();
    let bytes = bits.div_ceil(8);
    // `bits` is at least 1, so the excess is in 0..=7.
    let mask = 0xFFu8 >> (bytes * 8 - bits);
    let len = usize::try_from(bytes).map_err(|_| {
        CryptoError::Configuration(format!("sampling bound too large: {bits} bits"))
    })?;

    let mut buf = Zeroizing::new(vec![0u8; len]);
    loop {
        rng.fill(&mut buf)?;
        buf[0] &= mask;
        let candidate = BigUint::from_bytes_be(&buf);
        if &candidate < max {
            return Ok(candidate);
        }
        tracing::trace!(bits, "rejected out-of-range draw");
    }
}

/// Draw a uniform integer in `[1, max)`.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] if `max <= 1` (the range is empty)
/// - [`CryptoError::Entropy`] if the source fails
pub fn uniform_nonzero<R: SecureRandom + ?Sized>(
    rng: &mut R,
    max: &BigUint,
) -> Result<BigUint, CryptoError> {
    if *max <= BigUint::one() {
        return Err(CryptoError::Configuration(
            "sampling upper bound must be greater than 1".to_string(),
        ));
    }
    Ok(uniform_below(rng, &(max - 1u32))? + 1u32)
}
