//! Error types for brushlink-ota.

use thiserror::Error;

/// Errors that can occur while parsing a firmware manifest document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document contains no signature separator.
    #[error("missing signature separator in manifest document")]
    MissingSignatureMarker,

    /// The manifest body is not valid JSON.
    #[error("invalid manifest JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur while verifying a manifest signature.
///
/// Any failure here is terminal for the update flow.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The manifest names a signature algorithm other than SHA256WithRSA.
    #[error("unsupported signature algorithm: {0:?}")]
    UnsupportedAlgorithm(String),

    /// The embedded public key could not be loaded.
    #[error("invalid public key: {0}")]
    InvalidKey(String),

    /// The signature does not match the manifest body.
    #[error("invalid manifest signature")]
    InvalidSignature,
}

/// Errors that can occur while verifying a downloaded image checksum.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChecksumError {
    /// The manifest names a checksum type other than MD5.
    #[error("unsupported checksum type: {0:?}")]
    UnsupportedChecksumType(String),

    /// The image digest does not match the manifest.
    #[error("checksum mismatch: expected {expected}, got {actual}")]
    Mismatch {
        /// Digest stated in the manifest.
        expected: String,
        /// Digest of the downloaded bytes.
        actual: String,
    },
}
