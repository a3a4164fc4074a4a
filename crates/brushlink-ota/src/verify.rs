//! Manifest signature and image checksum verification.
//!
//! Manifests carry a SHA256WithRSA detached signature (PKCS#1 v1.5 padding)
//! over the exact JSON body bytes, verified against a fixed vendor public
//! key embedded in this crate. Downloaded images carry an MD5 digest. Either
//! check failing must abort the update flow.

use base64::prelude::*;
use md5::Md5;
use rsa::pkcs1v15::{Signature, VerifyingKey};
use rsa::pkcs8::DecodePublicKey;
use rsa::signature::Verifier;
use rsa::RsaPublicKey;
use sha2::{Digest, Sha256};

use crate::error::{ChecksumError, SignatureError};
use crate::manifest::{FirmwareManifest, ImageInfo};

/// The only signature algorithm manifests are signed with.
pub const SIGNATURE_ALGORITHM: &str = "SHA256WithRSA";

const VENDOR_PUBLIC_KEY_PEM: &str = include_str!("vendor_key.pem");

/// Load the embedded vendor public key.
pub fn vendor_public_key() -> Result<RsaPublicKey, SignatureError> {
    RsaPublicKey::from_public_key_pem(VENDOR_PUBLIC_KEY_PEM)
        .map_err(|e| SignatureError::InvalidKey(e.to_string()))
}

/// Verify the manifest signature against the given public key.
pub fn verify_signature(
    manifest: &FirmwareManifest,
    public_key: &RsaPublicKey,
) -> Result<(), SignatureError> {
    if manifest.info.signature_algorithm != SIGNATURE_ALGORITHM {
        return Err(SignatureError::UnsupportedAlgorithm(
            manifest.info.signature_algorithm.clone(),
        ));
    }

    let signature = if manifest.info.signature_encoding == "base64" {
        BASE64_STANDARD
            .decode(&manifest.signature)
            .map_err(|_| SignatureError::InvalidSignature)?
    } else {
        manifest.signature.clone()
    };

    log::debug!(
        "verifying manifest signature over {} body bytes",
        manifest.body.len()
    );
    let verifying_key = VerifyingKey::<Sha256>::new(public_key.clone());
    let signature =
        Signature::try_from(signature.as_slice()).map_err(|_| SignatureError::InvalidSignature)?;
    verifying_key
        .verify(&manifest.body, &signature)
        .map_err(|_| SignatureError::InvalidSignature)
}

/// Verify a downloaded image against the digest stated in the manifest.
pub fn verify_image_checksum(image: &ImageInfo, file: &[u8]) -> Result<(), ChecksumError> {
    if image.checksum_type != "MD5" {
        return Err(ChecksumError::UnsupportedChecksumType(
            image.checksum_type.clone(),
        ));
    }

    let actual = hex::encode(Md5::digest(file));
    if !actual.eq_ignore_ascii_case(&image.checksum) {
        return Err(ChecksumError::Mismatch {
            expected: image.checksum.clone(),
            actual,
        });
    }
    Ok(())
}
