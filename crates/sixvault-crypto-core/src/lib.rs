//! `sixvault-crypto-core` — hashing and secret-sharing primitives for Sixvault.
//!
//! - [`keccak`]: Keccak-f[1600] and SHA3-224/256/384/512
//! - [`shamir`]: Shamir secret sharing over a fresh prime field
//! - [`prime`]: Miller–Rabin probable-prime generation
//! - [`random`]: CSPRNG capability and unbiased big-integer sampling
//!
//! This crate is the audit target: zero network, zero async, zero I/O. Every
//! operation is a pure function apart from entropy consumption.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::arithmetic_side_effects))]

pub mod error;

pub mod encoding;
pub mod random;

pub mod prime;
pub mod shamir;

pub mod keccak;

pub use num_bigint::BigUint;

pub use encoding::parse_decimal;
pub use error::CryptoError;
pub use keccak::{canonical_digest, digest, hash, keccak_f1600, sha3_256, Sha3, Sha3Variant};
pub use prime::{generate_prime, generate_prime_with, is_probable_prime, DEFAULT_MR_ROUNDS};
pub use random::{uniform_below, uniform_nonzero, SecureRandom};
pub use shamir::{
    combine, combine_with_threshold, split, split_with, ShamirParams, Share, SharedSecret,
    DEFAULT_THRESHOLD, MIN_THRESHOLD,
};
