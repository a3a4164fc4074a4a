//! Firmware Update Manifest Verification
//!
//! Toothbrush firmware updates ship as a detached-signature document: a JSON
//! manifest describing the available images per hardware revision, a fixed
//! separator line, then an RSA signature over the manifest bytes. This crate
//! parses those documents, verifies the signature against the embedded
//! vendor public key and checks downloaded image digests.
//!
//! Downloading documents and images is left to the host application; this
//! crate only builds the info URLs and verifies the bytes it is handed.
//!
//! # Example
//!
//! ```rust,ignore
//! use brushlink_ota::{FirmwareManifest, vendor_public_key, verify_signature};
//!
//! let manifest = FirmwareManifest::parse(&document)?;
//! verify_signature(&manifest, &vendor_public_key()?)?;
//! ```

mod error;
mod manifest;
mod url;
mod verify;

pub use error::*;
pub use manifest::*;
pub use url::*;
pub use verify::*;
