//! Codec error types.

use thiserror::Error;

/// Errors that can occur when decoding or encoding characteristic values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Input length does not match the record layout.
    #[error("length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },

    /// A field value is outside its closed enumeration set.
    #[error("invalid value 0x{value:02X} for field {field}")]
    InvalidEnumValue {
        /// Name of the offending field.
        field: &'static str,
        /// Raw wire value.
        value: u8,
    },

    /// A marked sensor frame carries a variant tag that is not known.
    #[error("unknown sensor discriminator: 0x{0:02X}")]
    UnknownDiscriminator(u8),

    /// The record cannot be serialized for the requested characteristic.
    #[error("unsupported record variant: {0}")]
    UnsupportedVariant(&'static str),

    /// The identifier does not resolve to a registered characteristic.
    #[error("characteristic not found: {0}")]
    NotFound(String),

    /// A string field does not contain valid UTF-8.
    #[error("invalid UTF-8 in string field")]
    InvalidUtf8,
}

impl CodecError {
    /// Create a length mismatch error.
    pub fn length(expected: usize, actual: usize) -> Self {
        CodecError::LengthMismatch { expected, actual }
    }

    /// Create an invalid enum value error for the named field.
    pub fn invalid_value(field: &'static str, value: u8) -> Self {
        CodecError::InvalidEnumValue { field, value }
    }
}

/// Check that `data` has exactly `expected` bytes.
pub(crate) fn expect_len(data: &[u8], expected: usize) -> Result<(), CodecError> {
    if data.len() != expected {
        return Err(CodecError::length(expected, data.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CodecError::length(2, 5);
        assert!(err.to_string().contains("expected 2"));

        let err = CodecError::invalid_value("smiley.face", 0x42);
        assert!(err.to_string().contains("smiley.face"));
    }
}
