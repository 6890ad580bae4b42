//! Probable-prime generation with the Miller–Rabin test.
//!
//! - [`generate_prime`] — smallest probable prime strictly greater than a bound
//! - [`is_probable_prime`] — Miller–Rabin with random witnesses
//!
//! A composite survives one Miller–Rabin round with probability at most 1/4,
//! so `rounds` rounds bound the false-positive rate by `4^-rounds`.

// Big-integer arithmetic is unbounded.
#![allow(clippy::arithmetic_side_effects)]

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::rngs::OsRng;

use crate::error::CryptoError;
use crate::random::{uniform_below, SecureRandom};

/// Default number of Miller–Rabin rounds.
pub const DEFAULT_MR_ROUNDS: u32 = 5;

/// Odd primes used for trial division before Miller–Rabin.
const SMALL_PRIMES: [u32; 24] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Return the smallest probable prime strictly greater than `min`.
///
/// Uses [`DEFAULT_MR_ROUNDS`] rounds and `OsRng` for witnesses.
///
/// # Errors
///
/// Returns [`CryptoError::Entropy`] if the OS CSPRNG fails.
pub fn generate_prime(min: &BigUint) -> Result<BigUint, CryptoError> {
    generate_prime_with(min, DEFAULT_MR_ROUNDS, &mut OsRng)
}

/// Return the smallest probable prime strictly greater than `min`, using
/// `rounds` Miller–Rabin rounds with witnesses drawn from `rng`.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] if `rounds` is zero
/// - [`CryptoError::Entropy`] if `rng` fails
pub fn generate_prime_with<R: SecureRandom + ?Sized>(
    min: &BigUint,
    rounds: u32,
    rng: &mut R,
) -> Result<BigUint, CryptoError> {
    if rounds == 0 {
        return Err(CryptoError::Configuration(
            "Miller-Rabin rounds must be at least 1".to_string(),
        ));
    }

    let two = BigUint::from(2u32);
    let mut candidate = min + 1u32;
    if candidate <= two {
        return Ok(two);
    }
    if candidate.is_even() {
        candidate += 1u32;
    }

    let mut tried: u64 = 1;
    while !is_probable_prime(&candidate, rounds, rng)? {
        candidate += 2u32;
        tried = tried.saturating_add(1);
    }

    tracing::debug!(
        bits = candidate.bits(),
        candidates = tried,
        "probable prime found"
    );
    Ok(candidate)
}

/// Miller–Rabin probabilistic primality test.
///
/// Witnesses are drawn uniformly from `[2, n - 2]`. Inputs below 4, even
/// inputs and multiples of small primes are decided without randomness.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] if `rounds` is zero
/// - [`CryptoError::Entropy`] if `rng` fails
pub fn is_probable_prime<R: SecureRandom + ?Sized>(
    n: &BigUint,
    rounds: u32,
    rng: &mut R,
) -> Result<bool, CryptoError> {
    if rounds == 0 {
        return Err(CryptoError::Configuration(
            "Miller-Rabin rounds must be at least 1".to_string(),
        ));
    }

    if let Some(small) = n.to_u32() {
        if small < 2 {
            return Ok(false);
        }
        if small == 2 || small == 3 {
            return Ok(true);
        }
    }
    if n.is_even() {
        return Ok(false);
    }
    for p in SMALL_PRIMES {
        if n.to_u32() == Some(p) {
            return Ok(true);
        }
        if (n % p).is_zero() {
            return Ok(false);
        }
    }

    // n - 1 = 2^s * d with d odd. n is odd and > 97 here, so s >= 1.
    let n_minus_one = n - 1u32;
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;
    let two = BigUint::from(2u32);
    let witness_span = n - 3u32;

    'witness: for _ in 0..rounds {
        let a = uniform_below(rng, &witness_span)? + 2u32;
        let mut x = a.modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return Ok(false);
    }

    Ok(true)
}
