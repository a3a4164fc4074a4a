//! Negotiated protocol version.

use crate::error::CodecError;

/// Protocol version negotiated with the device.
///
/// The version changes which fields exist in several records, so every
/// decode/encode call takes it as an explicit argument. It is never stored
/// inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum ProtocolVersion {
    /// Version could not be determined yet.
    #[default]
    Unknown = 0,
    V001 = 1,
    V002 = 2,
    V003 = 3,
    V004 = 4,
    V005 = 5,
    V006 = 6,
    V007 = 7,
    V008 = 8,
}

impl ProtocolVersion {
    /// Parse a version ordinal from its wire byte.
    pub fn from_byte(value: u8) -> Result<Self, CodecError> {
        match value {
            0 => Ok(ProtocolVersion::Unknown),
            1 => Ok(ProtocolVersion::V001),
            2 => Ok(ProtocolVersion::V002),
            3 => Ok(ProtocolVersion::V003),
            4 => Ok(ProtocolVersion::V004),
            5 => Ok(ProtocolVersion::V005),
            6 => Ok(ProtocolVersion::V006),
            7 => Ok(ProtocolVersion::V007),
            8 => Ok(ProtocolVersion::V008),
            _ => Err(CodecError::invalid_value("protocol_version", value)),
        }
    }

    /// Get the wire byte of this version.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether this version is at least the given ordinal.
    pub fn at_least(self, ordinal: u8) -> bool {
        self.as_byte() >= ordinal
    }
}

impl std::fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "V{:03}", self.as_byte())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_ordering() {
        assert!(ProtocolVersion::V006 < ProtocolVersion::V008);
        assert!(ProtocolVersion::Unknown < ProtocolVersion::V001);
        assert!(ProtocolVersion::V007.at_least(6));
        assert!(!ProtocolVersion::V005.at_least(6));
    }

    #[test]
    fn test_version_from_byte() {
        for value in 0u8..=8 {
            let version = ProtocolVersion::from_byte(value).expect("valid ordinal");
            assert_eq!(version.as_byte(), value);
        }
        assert!(ProtocolVersion::from_byte(9).is_err());
        assert!(ProtocolVersion::from_byte(0xFF).is_err());
    }
}
