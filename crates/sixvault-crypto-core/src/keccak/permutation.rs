//! The Keccak-f[1600] permutation.
//!
//! The state is 25 little-endian 64-bit lanes; lane `(x, y)` lives at index
//! `x + 5 * y`. Constants are from the Keccak reference
//! (<https://keccak.team/keccak_specs_summary.html>).

// Lane indices never exceed 24.
#![allow(clippy::arithmetic_side_effects)]

/// Number of 64-bit lanes in the state.
pub const LANES: usize = 25;

/// State width in bytes (1600 bits).
pub const STATE_BYTES: usize = LANES * 8;

/// Rounds in Keccak-f[1600].
pub const ROUNDS: usize = 24;

/// The 1600-bit permutation state.
pub type State = [u64; LANES];

/// ι round constants.
pub const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808A,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808B,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008A,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000A,
    0x0000_0000_8000_808B,
    0x8000_0000_0000_008B,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800A,
    0x8000_0000_8000_000A,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// ρ rotation offsets, indexed `[x][y]`.
pub const ROTATION_OFFSETS: [[u32; 5]; 5] = [
    [0, 36, 3, 41, 18],
    [1, 44, 10, 45, 2],
    [62, 6, 43, 15, 61],
    [28, 55, 25, 21, 56],
    [27, 20, 39, 8, 14],
];

/// Apply the full 24-round Keccak-f[1600] permutation in place.
pub fn keccak_f1600(state: &mut State) {
    for rc in ROUND_CONSTANTS {
        round(state, rc);
    }
}

fn round(a: &mut State, rc: u64) {
    theta(a);
    let b = rho_pi(a);
    chi(a, &b);
    // ι
    a[0] ^= rc;
}

/// θ: XOR each lane with the parities of two neighbouring columns.
fn theta(a: &mut State) {
    let mut c = [0u64; 5];
    for (x, parity) in c.iter_mut().enumerate() {
        *parity = a[x] ^ a[x + 5] ^ a[x + 10] ^ a[x + 15] ^ a[x + 20];
    }
    for x in 0..5 {
        let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            a[x + 5 * y] ^= d;
        }
    }
}

/// ρ and π: rotate every lane, then move `(x, y)` to `(y, 2x + 3y)`.
fn rho_pi(a: &State) -> State {
    let mut b = [0u64; LANES];
    for (x, offsets) in ROTATION_OFFSETS.iter().enumerate() {
        for (y, &offset) in offsets.iter().enumerate() {
            b[y + 5 * ((2 * x + 3 * y) % 5)] = a[x + 5 * y].rotate_left(offset);
        }
    }
    b
}

/// χ: the only non-linear step, row-wise `b[x] ^ (!b[x+1] & b[x+2])`.
fn chi(a: &mut State, b: &State) {
    for y in 0..5 {
        for x in 0..5 {
            a[x + 5 * y] = b[x + 5 * y] ^ (!b[(x + 1) % 5 + 5 * y] & b[(x + 2) % 5 + 5 * y]);
        }
    }
}
