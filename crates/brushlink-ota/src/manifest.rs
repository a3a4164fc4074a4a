//! Firmware manifest document parsing.
//!
//! A manifest document is UTF-8 text: a JSON body, a fixed ASCII separator
//! line, then the detached signature (raw or base64, possibly followed by
//! trailing whitespace). The split keeps the body bytes exactly as received
//! because the signature covers them as-is, not a re-serialized form.
//!
//! Version fields inside the JSON are hex-encoded strings with an optional
//! `0x` prefix; they deserialize into plain integers.

use serde::{Deserialize, Deserializer};

use crate::error::ParseError;

/// Separator between the JSON body and the signature.
pub const SIGNATURE_SEPARATOR: &[u8] = b"\n---------- SIGNATURE ----------\n";

/// A parsed firmware manifest document.
///
/// Constructed once from a downloaded document and immutable afterwards;
/// verification is a pure query against it.
#[derive(Debug, Clone)]
pub struct FirmwareManifest {
    /// The exact JSON body bytes the signature covers.
    pub body: Vec<u8>,
    /// The signature bytes as found in the document.
    pub signature: Vec<u8>,
    /// The decoded JSON body.
    pub info: ManifestInfo,
}

impl FirmwareManifest {
    /// Split a manifest document at the last separator occurrence and decode
    /// the JSON body.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        let index = data
            .windows(SIGNATURE_SEPARATOR.len())
            .rposition(|window| window == SIGNATURE_SEPARATOR)
            .ok_or(ParseError::MissingSignatureMarker)?;

        let body = &data[..index];
        let signature = data[index + SIGNATURE_SEPARATOR.len()..].trim_ascii();
        let info: ManifestInfo = serde_json::from_slice(body)?;

        Ok(FirmwareManifest {
            body: body.to_vec(),
            signature: signature.to_vec(),
            info,
        })
    }
}

/// Top-level manifest fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ManifestInfo {
    /// Signature algorithm name.
    #[serde(rename = "signatureAlgorithm")]
    pub signature_algorithm: String,
    /// Signature encoding ("base64" or raw).
    #[serde(rename = "signatureEncoding")]
    pub signature_encoding: String,
    /// Images grouped by hardware revision.
    #[serde(rename = "hardwareMapping")]
    pub hardware_mapping: Vec<HardwareEntry>,
}

/// One hardware revision group and its firmware images.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HardwareEntry {
    /// PCBA revisions this entry applies to.
    #[serde(rename = "PCBA", deserialize_with = "hex_u32_list")]
    pub pcba: Vec<u32>,
    /// Hardware configurations this entry applies to.
    #[serde(rename = "hardwareConfiguration", deserialize_with = "hex_u32_list")]
    pub config: Vec<u32>,
    /// Available firmware images.
    pub images: Vec<ImageInfo>,
}

/// One downloadable firmware image.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageInfo {
    /// Release notes.
    pub notes: String,
    /// Download URL.
    pub url: String,
    /// Firmware version.
    #[serde(deserialize_with = "hex_u32")]
    pub version: u32,
    /// Minimum installed version required to apply this image.
    #[serde(rename = "minRequiredVersion", deserialize_with = "hex_u32")]
    pub min_required: u32,
    /// Compatible bootloader versions.
    #[serde(
        rename = "supportedBootloaderVersions",
        deserialize_with = "hex_u32_list"
    )]
    pub supported_bootloaders: Vec<u32>,
    /// Compatible second-controller versions.
    #[serde(
        rename = "supported2ndControllerVersions",
        deserialize_with = "hex_u32_list"
    )]
    pub supported_2nd_controllers: Vec<u32>,
    /// Compatible info sector versions.
    #[serde(
        rename = "supportedInfoSectorVersions",
        deserialize_with = "hex_u32_list"
    )]
    pub supported_info_sectors: Vec<u32>,
    /// Compatible memory map versions.
    #[serde(
        rename = "supportedMemoryMapVersions",
        deserialize_with = "hex_u32_list"
    )]
    pub supported_memory_maps: Vec<u32>,
    /// Compatible media content versions.
    #[serde(
        rename = "supportedMediaContentVersions",
        deserialize_with = "hex_u32_list"
    )]
    pub supported_media_contents: Vec<u32>,
    /// Digest of the image file, hex encoded.
    #[serde(rename = "fileChecksum")]
    pub checksum: String,
    /// Digest algorithm name.
    #[serde(rename = "fileChecksumType")]
    pub checksum_type: String,
    /// Country codes the image ships to.
    pub countries: Vec<String>,
}

fn parse_hex(value: &str) -> Result<u32, std::num::ParseIntError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    u32::from_str_radix(digits, 16)
}

fn hex_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_hex(&value).map_err(serde::de::Error::custom)
}

fn hex_u32_list<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<String>::deserialize(deserializer)?;
    values
        .iter()
        .map(|v| parse_hex(v).map_err(serde::de::Error::custom))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENT: &[u8] = include_bytes!("../tests/data/firmware_info.txt");

    #[test]
    fn test_parse_splits_at_last_separator() {
        let manifest = FirmwareManifest::parse(DOCUMENT).expect("parses");
        assert_eq!(manifest.body.last(), Some(&b'}'));
        // The signature is trimmed of the trailing newline.
        assert!(!manifest.signature.ends_with(b"\n"));
        assert_eq!(manifest.info.signature_algorithm, "SHA256WithRSA");
        assert_eq!(manifest.info.signature_encoding, "base64");
    }

    #[test]
    fn test_hex_fields_decode_to_integers() {
        let manifest = FirmwareManifest::parse(DOCUMENT).expect("parses");
        let hardware = &manifest.info.hardware_mapping[0];
        assert_eq!(hardware.pcba, vec![0x3C10, 0x3C11]);
        assert_eq!(hardware.config, vec![0x01]);

        let image = &hardware.images[0];
        assert_eq!(image.version, 0x010A);
        assert_eq!(image.min_required, 0x0104);
        assert_eq!(image.supported_bootloaders, vec![0x21, 0x22]);
        assert_eq!(image.checksum_type, "MD5");
        assert_eq!(image.countries, vec!["de", "it", "us"]);
    }

    #[test]
    fn test_missing_separator() {
        let result = FirmwareManifest::parse(b"{\"signatureAlgorithm\": \"SHA256WithRSA\"}");
        assert!(matches!(result, Err(ParseError::MissingSignatureMarker)));
    }

    #[test]
    fn test_invalid_json_body() {
        let mut document = b"not json".to_vec();
        document.extend_from_slice(SIGNATURE_SEPARATOR);
        document.extend_from_slice(b"c2lnbmF0dXJl");
        assert!(matches!(
            FirmwareManifest::parse(&document),
            Err(ParseError::Json(_))
        ));
    }

    #[test]
    fn test_hex_prefix_is_optional() {
        assert_eq!(parse_hex("0x3C10"), Ok(0x3C10));
        assert_eq!(parse_hex("3C10"), Ok(0x3C10));
        assert!(parse_hex("0xZZ").is_err());
    }
}
