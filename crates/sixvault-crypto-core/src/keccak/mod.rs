//! SHA3 hashing (FIPS 202) on top of the Keccak-f[1600] sponge.
//!
//! This module provides:
//! - [`hash`] — one-shot lowercase-hex digest for a bit length (224/256/384/512)
//! - [`digest`] / [`sha3_256`] — raw digest bytes
//! - [`Sha3`] — incremental hasher (`update` / `finalize`)
//! - [`canonical_digest`] — digest of a value's canonical JSON form
//!
//! Digests are stable and bit-identical to FIPS 202 SHA3: the signing
//! workflow stores signatures over these hex strings.
//!
//! # Sponge parameters
//!
//! For an `L`-bit digest the rate is `200 - 2 * (L / 8)` bytes and the
//! capacity is the remainder of the 200-byte state:
//!
//! | Variant  | Rate (bytes) | Capacity (bytes) |
//! |----------|--------------|------------------|
//! | SHA3-224 | 144          | 56               |
//! | SHA3-256 | 136          | 64               |
//! | SHA3-384 | 104          | 96               |
//! | SHA3-512 | 72           | 128              |

// Sponge offsets are bounded by the 200-byte state.
#![allow(clippy::arithmetic_side_effects)]

pub mod permutation;

use data_encoding::HEXLOWER;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use zeroize::Zeroize;

use crate::error::CryptoError;
pub use permutation::{keccak_f1600, State, LANES, STATE_BYTES};

/// SHA3 domain-separation suffix, the first padding byte.
const DOMAIN_SUFFIX: u8 = 0x06;

/// Bit OR-ed into the last byte of the final block.
const PAD_END: u8 = 0x80;

/// SHA3-256 digest length in bytes.
pub const SHA3_256_LEN: usize = 32;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// The supported SHA3 output lengths.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sha3Variant {
    /// 224-bit digest.
    Sha3_224,
    /// 256-bit digest.
    Sha3_256,
    /// 384-bit digest.
    Sha3_384,
    /// 512-bit digest.
    Sha3_512,
}

impl Sha3Variant {
    /// All supported variants, shortest digest first.
    pub const ALL: [Self; 4] = [Self::Sha3_224, Self::Sha3_256, Self::Sha3_384, Self::Sha3_512];

    /// Map a digest length in bits to its variant.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::Configuration`] for anything other than
    /// 224, 256, 384 or 512.
    pub fn from_output_bits(bits: usize) -> Result<Self, CryptoError> {
        match bits {
            224 => Ok(Self::Sha3_224),
            256 => Ok(Self::Sha3_256),
            384 => Ok(Self::Sha3_384),
            512 => Ok(Self::Sha3_512),
            other => Err(CryptoError::Configuration(format!(
                "unsupported SHA3 output length: {other} bits (expected 224, 256, 384 or 512)"
            ))),
        }
    }

    /// Digest length in bits.
    #[must_use]
    pub const fn output_bits(self) -> usize {
        match self {
            Self::Sha3_224 => 224,
            Self::Sha3_256 => 256,
            Self::Sha3_384 => 384,
            Self::Sha3_512 => 512,
        }
    }

    /// Digest length in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        self.output_bits() / 8
    }

    /// Sponge rate in bytes.
    #[must_use]
    pub const fn rate(self) -> usize {
        STATE_BYTES - 2 * self.output_len()
    }

    /// Sponge capacity in bytes.
    #[must_use]
    pub const fn capacity(self) -> usize {
        STATE_BYTES - self.rate()
    }
}

/// Incremental SHA3 hasher.
///
/// Input may be fed in any chunking; the digest only depends on the
/// concatenated bytes.
///
/// ```
/// use sixvault_crypto_core::keccak::{Sha3, Sha3Variant};
///
/// let mut hasher = Sha3::new(Sha3Variant::Sha3_256);
/// hasher.update(b"hello ");
/// hasher.update(b"world");
/// assert_eq!(
///     hasher.finalize_hex(),
///     "644bcc7e564373040999aac89e7622f3ca71fba1d972fd94a31c3bfbf24e3938"
/// );
/// ```
#[derive(Clone)]
pub struct Sha3 {
    variant: Sha3Variant,
    state: State,
    /// Pending input, always shorter than one block.
    buffer: Vec<u8>,
}

impl Sha3 {
    /// Start a new hash computation.
    #[must_use]
    pub fn new(variant: Sha3Variant) -> Self {
        Self {
            variant,
            state: [0u64; LANES],
            buffer: Vec::with_capacity(variant.rate()),
        }
    }

    /// The variant this hasher produces.
    #[must_use]
    pub const fn variant(&self) -> Sha3Variant {
        self.variant
    }

    /// Absorb more input.
    pub fn update(&mut self, mut data: &[u8]) {
        let rate = self.variant.rate();

        if !self.buffer.is_empty() {
            let take = (rate - self.buffer.len()).min(data.len());
            self.buffer.extend_from_slice(&data[..take]);
            data = &data[take..];
            if self.buffer.len() < rate {
                return;
            }
            absorb_block(&mut self.state, &self.buffer);
            self.buffer.clear();
        }

        let mut blocks = data.chunks_exact(rate);
        for block in &mut blocks {
            absorb_block(&mut self.state, block);
        }
        self.buffer.extend_from_slice(blocks.remainder());
    }

    /// Pad, absorb the final block and squeeze the digest.
    #[must_use]
    pub fn finalize(mut self) -> Vec<u8> {
        let rate = self.variant.rate();
        let mut block = std::mem::take(&mut self.buffer);
        block.push(DOMAIN_SUFFIX);
        block.resize(rate, 0);
        // A single byte of padding collapses to 0x86.
        block[rate - 1] |= PAD_END;
        absorb_block(&mut self.state, &block);
        block.zeroize();

        squeeze(&mut self.state, rate, self.variant.output_len())
    }

    /// [`finalize`](Self::finalize), hex-encoded in lowercase.
    #[must_use]
    pub fn finalize_hex(self) -> String {
        HEXLOWER.encode(&self.finalize())
    }
}

impl Drop for Sha3 {
    fn drop(&mut self) {
        self.state.zeroize();
        self.buffer.zeroize();
    }
}

impl std::fmt::Debug for Sha3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sha3")
            .field("variant", &self.variant)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Hash `input` to a lowercase hex digest of `output_bits / 4` characters.
///
/// # Errors
///
/// Returns [`CryptoError::Configuration`] if `output_bits` is not one of
/// 224, 256, 384 or 512.
pub fn hash(input: &[u8], output_bits: usize) -> Result<String, CryptoError> {
    let variant = Sha3Variant::from_output_bits(output_bits)?;
    Ok(HEXLOWER.encode(&digest(input, variant)))
}

/// Raw digest bytes of `input`.
#[must_use]
pub fn digest(input: &[u8], variant: Sha3Variant) -> Vec<u8> {
    let mut hasher = Sha3::new(variant);
    hasher.update(input);
    hasher.finalize()
}

/// SHA3-256 of `input`.
#[must_use]
pub fn sha3_256(input: &[u8]) -> [u8; SHA3_256_LEN] {
    let mut out = [0u8; SHA3_256_LEN];
    out.copy_from_slice(&digest(input, Sha3Variant::Sha3_256));
    out
}

/// Hex digest of the canonical JSON encoding of `value`.
///
/// Canonical means object keys in sorted order and no insignificant
/// whitespace, so two structurally equal values always hash the same
/// regardless of field or insertion order.
///
/// # Errors
///
/// - [`CryptoError::Configuration`] for an unsupported `output_bits`
/// - [`CryptoError::Encoding`] if `value` cannot be represented as JSON
pub fn canonical_digest<T: Serialize + ?Sized>(
    value: &T,
    output_bits: usize,
) -> Result<String, CryptoError> {
    let variant = Sha3Variant::from_output_bits(output_bits)?;
    let value = serde_json::to_value(value)
        .map_err(|e| CryptoError::Encoding(format!("JSON conversion failed: {e}")))?;
    let bytes = serde_json::to_vec(&canonicalize(value))
        .map_err(|e| CryptoError::Encoding(format!("JSON serialization failed: {e}")))?;
    Ok(HEXLOWER.encode(&digest(&bytes, variant)))
}

/// Rebuild every object with its keys in sorted order.
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, inner)| (key, canonicalize(inner)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

// ---------------------------------------------------------------------------
// Sponge internals
// ---------------------------------------------------------------------------

/// XOR one `rate`-byte block into the state as little-endian lanes, then permute.
fn absorb_block(state: &mut State, block: &[u8]) {
    for (lane, chunk) in state.iter_mut().zip(block.chunks_exact(8)) {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        *lane ^= u64::from_le_bytes(bytes);
    }
    keccak_f1600(state);
}

/// Read `output_len` bytes from the rate portion, permuting between blocks.
fn squeeze(state: &mut State, rate: usize, output_len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(output_len);
    loop {
        for lane in &state[..rate / 8] {
            out.extend_from_slice(&lane.to_le_bytes());
        }
        if out.len() >= output_len {
            out.truncate(output_len);
            return out;
        }
        keccak_f1600(state);
    }
}
