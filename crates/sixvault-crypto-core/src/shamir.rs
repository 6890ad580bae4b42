//! Shamir secret sharing over a prime field GF(p).
//!
//! This module provides:
//! - [`split`] — split a secret into `n` shares, any `k` of which reconstruct it
//! - [`combine`] — Lagrange interpolation at `x = 0`
//! - [`combine_with_threshold`] / [`SharedSecret::reconstruct`] — the same,
//!   refusing fewer shares than the split threshold
//! - [`ShamirParams`] — share count, threshold and primality rounds
//!
//! # Field
//!
//! Each split draws a fresh probable prime `p > max(secret, n)`: the secret
//! embeds as the constant term and every share index `1..=n` is a distinct
//! non-zero field element.
//!
//! # Threshold
//!
//! The `k - 1` non-constant coefficients are uniform in `[0, p)`, so any
//! `k - 1` shares are independent of the secret. [`combine`] itself cannot
//! tell how many shares the split required: given fewer than `k` it returns
//! a wrong value without error. Callers holding the [`SharedSecret`] bundle
//! should use [`SharedSecret::reconstruct`].

// Big-integer arithmetic is unbounded.
#![allow(clippy::arithmetic_side_effects)]

use std::collections::HashSet;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::encoding::{decimal, parse_decimal};
use crate::error::CryptoError;
use crate::prime::{generate_prime_with, DEFAULT_MR_ROUNDS};
use crate::random::{uniform_below, SecureRandom};

/// Minimum threshold, and minimum number of shares [`combine`] accepts.
pub const MIN_THRESHOLD: usize = 2;

/// Threshold used by the access-approval workflow.
pub const DEFAULT_THRESHOLD: usize = 3;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One participant's point `(x, f(x) mod p)` on the sharing polynomial.
///
/// Serialized as `{"x": 3, "y": "<decimal>"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    /// 1-based participant index.
    pub x: u32,
    /// Polynomial value at `x`, reduced mod the split prime.
    #[serde(with = "decimal")]
    pub y: BigUint,
}

impl Share {
    /// Build a share from its wire form (`y` as a decimal string).
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Encoding`] if `y` is not a decimal string.
    pub fn from_decimal(x: u32, y: &str) -> Result<Self, CryptoError> {
        Ok(Self {
            x,
            y: parse_decimal(y)?,
        })
    }

    /// The share value as a decimal string.
    #[must_use]
    pub fn y_decimal(&self) -> String {
        self.y.to_string()
    }
}

/// Output of [`split`]: every share, the field prime, and the threshold.
#[must_use = "shares must be distributed or stored"]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedSecret {
    /// Shares for participants `1..=n`, in index order.
    pub shares: Vec<Share>,
    /// Field modulus. Greater than the secret and the share count.
    #[serde(with = "decimal")]
    pub prime: BigUint,
    /// Number of shares needed to reconstruct.
    pub threshold: usize,
}

impl SharedSecret {
    /// Reconstruct the secret from a subset of this split's shares.
    ///
    /// # Errors
    ///
    /// - [`CryptoError::InsufficientShares`] if fewer than `threshold` shares
    /// - otherwise as [`combine`]
    pub fn reconstruct(&self, shares: &[Share]) -> Result<BigUint, CryptoError> {
        combine_with_threshold(shares, &self.prime, self.threshold)
    }
}

/// Split parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShamirParams {
    /// Total shares issued (`n`).
    pub shares: usize,
    /// Shares required to reconstruct (`k`).
    pub threshold: usize,
    /// Miller–Rabin rounds used when generating the field prime.
    pub primality_rounds: u32,
}

impl ShamirParams {
    /// `n` shares with threshold `k`, default primality rounds.
    #[must_use]
    pub const fn new(shares: usize, threshold: usize) -> Self {
        Self {
            shares,
            threshold,
            primality_rounds: DEFAULT_MR_ROUNDS,
        }
    }

    /// Override the Miller–Rabin round count.
    #[must_use]
    pub const fn with_primality_rounds(mut self, rounds: u32) -> Self {
        self.primality_rounds = rounds;
        self
    }

    /// Check `2 <= k <= n`, `n` fits a share index, and `rounds >= 1`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Configuration`] describing the first violation.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.threshold < MIN_THRESHOLD {
            return Err(CryptoError::Configuration(format!(
                "threshold must be at least {MIN_THRESHOLD}, got {}",
                self.threshold
            )));
        }
        if self.threshold > self.shares {
            return Err(CryptoError::Configuration(format!(
                "threshold ({}) cannot exceed share count ({})",
                self.threshold, self.shares
            )));
        }
        if u32::try_from(self.shares).is_err() {
            return Err(CryptoError::Configuration(format!(
                "share count {} exceeds the share index range",
                self.shares
            )));
        }
        if self.primality_rounds == 0 {
            return Err(CryptoError::Configuration(
                "Miller-Rabin rounds must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Split `secret` into `n` shares, any `k` of which reconstruct it.
///
/// Uses `OsRng` for the prime witnesses and polynomial coefficients.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] if `k < 2` or `k > n` (no entropy consumed)
/// - [`CryptoError::Entropy`] if the OS CSPRNG fails
pub fn split(secret: &BigUint, n: usize, k: usize) -> Result<SharedSecret, CryptoError> {
    split_with(secret, &ShamirParams::new(n, k), &mut OsRng)
}

/// Split `secret` with explicit parameters and entropy source.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] if `params` is invalid (no entropy consumed)
/// - [`CryptoError::Entropy`] if `rng` fails
pub fn split_with<R: SecureRandom + ?Sized>(
    secret: &BigUint,
    params: &ShamirParams,
    rng: &mut R,
) -> Result<SharedSecret, CryptoError> {
    params.validate()?;
    let n = u32::try_from(params.shares)
        .map_err(|_| CryptoError::Configuration("share count out of range".to_string()))?;

    let bound = std::cmp::max(secret.clone(), BigUint::from(n));
    let prime = generate_prime_with(&bound, params.primality_rounds, rng)?;

    let mut coefficients = Coefficients(Vec::with_capacity(params.threshold));
    coefficients.0.push(secret.clone());
    for _ in 1..params.threshold {
        coefficients.0.push(uniform_below(rng, &prime)?);
    }

    let shares = (1..=n)
        .map(|x| Share {
            x,
            y: evaluate_polynomial(&coefficients.0, x, &prime),
        })
        .collect();

    tracing::debug!(
        shares = params.shares,
        threshold = params.threshold,
        prime_bits = prime.bits(),
        "secret split"
    );

    Ok(SharedSecret {
        shares,
        prime,
        threshold: params.threshold,
    })
}

/// Reconstruct the secret by Lagrange interpolation at `x = 0`.
///
/// Accepts any two or more shares. The result is only correct when at least
/// the split threshold of shares from the same split is supplied; fewer
/// yields an unrelated value without error.
///
/// # Errors
///
/// - [`CryptoError::InsufficientShares`] if fewer than 2 shares
/// - [`CryptoError::Configuration`] if `prime < 2`
/// - [`CryptoError::DuplicateShare`] if two shares share an index
/// - [`CryptoError::Arithmetic`] if two indices are congruent mod `prime`
pub fn combine(shares: &[Share], prime: &BigUint) -> Result<BigUint, CryptoError> {
    if shares.len() < MIN_THRESHOLD {
        return Err(CryptoError::InsufficientShares {
            required: MIN_THRESHOLD,
            provided: shares.len(),
        });
    }
    if *prime < BigUint::from(2u32) {
        return Err(CryptoError::Configuration(format!(
            "field modulus must be at least 2, got {prime}"
        )));
    }

    let mut seen = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen.insert(share.x) {
            return Err(CryptoError::DuplicateShare { x: share.x });
        }
    }

    tracing::debug!(shares = shares.len(), "reconstructing secret");

    let p = BigInt::from(prime.clone());
    let mut secret = BigInt::zero();
    for (i, share_i) in shares.iter().enumerate() {
        let x_i = BigInt::from(share_i.x);
        let mut numerator = BigInt::one();
        let mut denominator = BigInt::one();

        for (j, share_j) in shares.iter().enumerate() {
            if i == j {
                continue;
            }
            let x_j = BigInt::from(share_j.x);
            numerator = modulo(&(numerator * modulo(&-&x_j, &p)), &p);
            denominator = modulo(&(denominator * modulo(&(&x_i - &x_j), &p)), &p);
        }

        let basis = modulo(&(numerator * mod_inverse(&denominator, &p)?), &p);
        let term = modulo(&(BigInt::from(share_i.y.clone()) * basis), &p);
        secret = modulo(&(secret + term), &p);
    }

    secret
        .to_biguint()
        .ok_or_else(|| CryptoError::Arithmetic("reduced secret is negative".to_string()))
}

/// [`combine`], refusing fewer than `threshold` shares.
///
/// # Errors
///
/// - [`CryptoError::InsufficientShares`] if `shares.len() < threshold`
/// - otherwise as [`combine`]
pub fn combine_with_threshold(
    shares: &[Share],
    prime: &BigUint,
    threshold: usize,
) -> Result<BigUint, CryptoError> {
    let required = threshold.max(MIN_THRESHOLD);
    if shares.len() < required {
        return Err(CryptoError::InsufficientShares {
            required,
            provided: shares.len(),
        });
    }
    combine(shares, prime)
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Sharing polynomial coefficients, constant term first. Wiped on drop.
struct Coefficients(Vec<BigUint>);

impl Zeroize for Coefficients {
    fn zeroize(&mut self) {
        for c in &mut self.0 {
            wipe_biguint(c);
        }
    }
}

impl Drop for Coefficients {
    fn drop(&mut self) {
        self.zeroize();
    }
}

/// Overwrite the digit buffer of `value` with zeros in place, leaving zero.
///
/// `BigUint` exposes no mutable digit access, so this rewrites the existing
/// allocation through `assign_from_slice`, which clears and refills the same
/// buffer before normalizing.
fn wipe_biguint(value: &mut BigUint) {
    let Ok(digits) = usize::try_from(value.bits().div_ceil(32)) else {
        value.set_zero();
        return;
    };
    value.assign_from_slice(&vec![0u32; digits]);
    std::sync::atomic::compiler_fence(std::sync::atomic::Ordering::SeqCst);
}

/// Horner evaluation of `coefficients` (constant term first) at `x`, mod `prime`.
fn evaluate_polynomial(coefficients: &[BigUint], x: u32, prime: &BigUint) -> BigUint {
    coefficients
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, c| (acc * x + c) % prime)
}

/// Least non-negative residue of `a` mod `m`, for either sign of `a`.
fn modulo(a: &BigInt, m: &BigInt) -> BigInt {
    ((a % m) + m) % m
}

/// Inverse of `a` mod `m` via the extended Euclidean algorithm.
fn mod_inverse(a: &BigInt, m: &BigInt) -> Result<BigInt, CryptoError> {
    let (mut old_r, mut r) = (a.clone(), m.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());

    while !r.is_zero() {
        let quotient = &old_r / &r;
        let next_r = &old_r - &quotient * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &quotient * &s;
        old_s = std::mem::replace(&mut s, next_s);
    }

    if !old_r.is_one() {
        return Err(CryptoError::Arithmetic(
            "modular inverse does not exist".to_string(),
        ));
    }
    Ok(modulo(&old_s, m))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
