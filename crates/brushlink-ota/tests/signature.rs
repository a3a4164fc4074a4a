//! Signature verification against a real signed manifest document.
//!
//! The document in `data/` was signed with the test key, so the full
//! parse-then-verify path runs against genuine RSA PKCS#1 v1.5 material.

use brushlink_ota::{
    verify_signature, vendor_public_key, FirmwareManifest, SignatureError, SIGNATURE_SEPARATOR,
};
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;

const DOCUMENT: &[u8] = include_bytes!("data/firmware_info.txt");
const PUBLIC_KEY_PEM: &str = include_str!("data/test_pub.pem");

fn test_key() -> RsaPublicKey {
    RsaPublicKey::from_public_key_pem(PUBLIC_KEY_PEM).expect("test key loads")
}

#[test]
fn valid_signature_verifies() {
    let manifest = FirmwareManifest::parse(DOCUMENT).expect("parses");
    verify_signature(&manifest, &test_key()).expect("signature verifies");
}

#[test]
fn tampered_body_is_rejected() {
    let mut document = DOCUMENT.to_vec();
    // Flip one byte inside the release notes; the JSON stays valid but the
    // signed bytes change.
    let index = document
        .windows(9)
        .position(|w| w == b"Stability")
        .expect("notes present");
    document[index] = b'X';

    let manifest = FirmwareManifest::parse(&document).expect("parses");
    let result = verify_signature(&manifest, &test_key());
    assert!(matches!(result, Err(SignatureError::InvalidSignature)));
}

#[test]
fn tampered_signature_is_rejected() {
    let manifest = FirmwareManifest::parse(DOCUMENT).expect("parses");
    let mut tampered = manifest.clone();
    // Swap the first two signature characters (both base64, so decoding
    // still succeeds).
    tampered.signature.swap(0, 1);

    let result = verify_signature(&tampered, &test_key());
    assert!(matches!(result, Err(SignatureError::InvalidSignature)));
}

#[test]
fn unknown_algorithm_is_rejected() {
    let manifest = FirmwareManifest::parse(DOCUMENT).expect("parses");
    let mut altered = manifest.clone();
    altered.info.signature_algorithm = "MD5WithRSA".to_owned();

    let result = verify_signature(&altered, &test_key());
    match result {
        Err(SignatureError::UnsupportedAlgorithm(name)) => assert_eq!(name, "MD5WithRSA"),
        other => panic!("expected UnsupportedAlgorithm, got {other:?}"),
    }
}

#[test]
fn wrong_key_is_rejected() {
    // The embedded vendor key differs from the test key that signed the
    // document.
    let manifest = FirmwareManifest::parse(DOCUMENT).expect("parses");
    let vendor = vendor_public_key().expect("vendor key loads");
    let result = verify_signature(&manifest, &vendor);
    assert!(matches!(result, Err(SignatureError::InvalidSignature)));
}

#[test]
fn separator_constant_matches_document() {
    let position = DOCUMENT
        .windows(SIGNATURE_SEPARATOR.len())
        .position(|w| w == SIGNATURE_SEPARATOR);
    assert!(position.is_some());
}
