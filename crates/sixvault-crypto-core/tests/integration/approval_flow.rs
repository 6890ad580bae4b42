//! The access-approval flow: one share per faculty member, threshold 3.
//!
//! Each approver's record is persisted as JSON (`prime` + own share) and
//! reconstruction happens once three approvals are collected.

use num_bigint::BigUint;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sixvault_crypto_core::shamir::{combine, split, Share, DEFAULT_THRESHOLD};

/// What the server stores per approver.
#[derive(Serialize, Deserialize)]
struct ApproverRecord {
    prime: String,
    share: Share,
}

#[test]
fn three_of_seven_faculty_recover_record_key() {
    let faculty = 7;
    let mut key = [0u8; 32];
    OsRng.fill_bytes(&mut key);
    let secret = BigUint::from_bytes_be(&key);

    let bundle = split(&secret, faculty, DEFAULT_THRESHOLD).expect("split");

    let stored: Vec<String> = bundle
        .shares
        .iter()
        .map(|share| {
            serde_json::to_string(&ApproverRecord {
                prime: bundle.prime.to_string(),
                share: share.clone(),
            })
            .expect("serialize record")
        })
        .collect();

    // Approvals arrive from faculty members 6, 2 and 4.
    let approvals: Vec<ApproverRecord> = [5usize, 1, 3]
        .iter()
        .map(|&i| serde_json::from_str(&stored[i]).expect("deserialize record"))
        .collect();

    let prime = sixvault_crypto_core::parse_decimal(&approvals[0].prime).expect("prime");
    let shares: Vec<Share> = approvals.into_iter().map(|r| r.share).collect();
    let recovered = combine(&shares, &prime).expect("combine");

    let mut recovered_key = [0u8; 32];
    let bytes = recovered.to_bytes_be();
    recovered_key[32 - bytes.len()..].copy_from_slice(&bytes);
    assert_eq!(recovered_key, key);
}

#[test]
fn smallest_program_has_exactly_threshold_faculty() {
    let bundle = split(&BigUint::from(77u32), DEFAULT_THRESHOLD, DEFAULT_THRESHOLD).expect("split");
    assert_eq!(bundle.shares.len(), 3);
    assert_eq!(
        bundle.reconstruct(&bundle.shares).expect("reconstruct"),
        BigUint::from(77u32)
    );
}
