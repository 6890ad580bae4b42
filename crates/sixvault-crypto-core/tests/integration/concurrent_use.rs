//! Split, combine and hash running on several threads at once.

use std::thread;

use num_bigint::BigUint;
use sixvault_crypto_core::keccak::hash;
use sixvault_crypto_core::shamir::{combine, split};

const THREADS: usize = 8;

#[test]
fn concurrent_splits_reconstruct_independently() {
    let recovered: Vec<(BigUint, BigUint)> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|i| {
                scope.spawn(move || {
                    let secret = BigUint::from(1_000_003u32) * (i + 1);
                    let bundle = split(&secret, 6, 3).expect("split");
                    let value = combine(&bundle.shares[2..5], &bundle.prime).expect("combine");
                    (secret, value)
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(recovered.len(), THREADS);
    for (secret, value) in recovered {
        assert_eq!(secret, value);
    }
}

#[test]
fn concurrent_hashes_match_sequential() {
    let inputs: Vec<String> = (0..THREADS).map(|i| format!("record-{i}").repeat(50)).collect();
    let sequential: Vec<String> = inputs
        .iter()
        .map(|input| hash(input.as_bytes(), 256).expect("hash"))
        .collect();

    let parallel: Vec<String> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|input| scope.spawn(move || hash(input.as_bytes(), 256).expect("hash")))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().expect("thread panicked"))
            .collect()
    });

    assert_eq!(parallel, sequential);
}
