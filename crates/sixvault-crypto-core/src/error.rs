//! Cryptographic error types for `sixvault-crypto-core`.

use thiserror::Error;

/// Errors produced by the hashing and secret-sharing primitives.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// Invalid caller-supplied parameters (threshold, share count, hash size,
    /// primality rounds, sampling range). Detected before any entropy is drawn.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Two shares passed to reconstruction carry the same abscissa.
    #[error("duplicate share for participant index {x}")]
    DuplicateShare {
        /// The repeated share index.
        x: u32,
    },

    /// Modular arithmetic failure (non-invertible Lagrange denominator).
    #[error("arithmetic error: {0}")]
    Arithmetic(String),

    /// Too few shares to reconstruct.
    #[error("insufficient shares: {provided} provided, {required} required")]
    InsufficientShares {
        /// Minimum number of shares needed.
        required: usize,
        /// Number of shares supplied.
        provided: usize,
    },

    /// The CSPRNG could not produce bytes. Fatal: there is no fallback generator.
    #[error("entropy source failure: {0}")]
    Entropy(String),

    /// Decimal or JSON encoding failure.
    #[error("encoding error: {0}")]
    Encoding(String),
}
