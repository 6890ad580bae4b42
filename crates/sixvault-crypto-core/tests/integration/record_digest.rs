//! Canonical digests of grade records for the signing workflow.

use serde::Serialize;
use sixvault_crypto_core::keccak::{canonical_digest, hash};
use sixvault_crypto_core::CryptoError;

#[derive(Serialize)]
struct GradeRecord {
    student_id: &'static str,
    course: &'static str,
    grade: &'static str,
    credits: u8,
}

fn records() -> Vec<GradeRecord> {
    vec![
        GradeRecord {
            student_id: "18221001",
            course: "II3230",
            grade: "A",
            credits: 3,
        },
        GradeRecord {
            student_id: "18221001",
            course: "II2111",
            grade: "AB",
            credits: 2,
        },
    ]
}

#[test]
fn digest_hashes_sorted_compact_json() {
    let expected_json = concat!(
        r#"[{"course":"II3230","credits":3,"grade":"A","student_id":"18221001"},"#,
        r#"{"course":"II2111","credits":2,"grade":"AB","student_id":"18221001"}]"#
    );
    assert_eq!(
        canonical_digest(&records(), 256).expect("digest"),
        hash(expected_json.as_bytes(), 256).expect("hash")
    );
}

#[test]
fn digest_is_stable_across_calls() {
    let a = canonical_digest(&records(), 512).expect("first");
    let b = canonical_digest(&records(), 512).expect("second");
    assert_eq!(a, b);
    assert_eq!(a.len(), 128);
}

#[test]
fn unsupported_length_rejected_before_serialization() {
    let err = canonical_digest(&records(), 128).unwrap_err();
    assert!(matches!(err, CryptoError::Configuration(_)));
}
