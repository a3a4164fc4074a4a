//! Control characteristic command model.
//!
//! The control characteristic multiplexes many device operations through a
//! two-byte `(command, parameter)` payload. For a handful of configuration
//! commands newer firmware dropped the parameter byte, so presence depends
//! on both the command value and the negotiated protocol version.

use crate::constants::*;
use crate::error::CodecError;
use crate::metadata::{DataReadKind, MetadataKind};
use crate::version::ProtocolVersion;

/// A command for the multiplexed control characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    /// Command value.
    pub command: u8,
    /// Parameter value (0 when the wire form suppresses it).
    pub parameter: u8,
}

impl Control {
    /// Create a control command.
    pub fn new(command: u8, parameter: u8) -> Self {
        Control { command, parameter }
    }

    /// Whether the parameter byte is present on the wire.
    ///
    /// The configuration-persist commands 40-44 plus 38 (RTC) and 47 (my
    /// color) lost their parameter byte after protocol version 6. This table
    /// is reverse engineered and deliberately not simplified; the ranges are
    /// exact.
    pub fn parameter_present(command: u8, version: ProtocolVersion) -> bool {
        if (40..=44).contains(&command) {
            return version.as_byte() <= 6;
        }
        if command == CTRL_RTC || command == CTRL_MY_COLOR {
            return version.as_byte() <= 6;
        }
        true
    }

    /// Encode the command payload for the given protocol version.
    pub fn encode(&self, version: ProtocolVersion) -> Vec<u8> {
        if Control::parameter_present(self.command, version) {
            vec![self.command, self.parameter]
        } else {
            vec![self.command]
        }
    }

    /// Decode a command payload under the given protocol version.
    pub fn decode(data: &[u8], version: ProtocolVersion) -> Result<Self, CodecError> {
        if data.is_empty() {
            return Err(CodecError::length(1, 0));
        }

        let command = data[0];
        let expected = if Control::parameter_present(command, version) {
            2
        } else {
            1
        };
        if data.len() != expected {
            return Err(CodecError::length(expected, data.len()));
        }

        let parameter = if expected == 2 { data[1] } else { 0 };
        Ok(Control { command, parameter })
    }

    /// Factory reset; the device expects a fixed magic parameter.
    pub fn factory_reset() -> Self {
        Control::new(CTRL_FACTORY_RESET, CTRL_FACTORY_RESET_PARAMETER)
    }

    /// Extend the BLE connection by the given amount of seconds.
    pub fn extend_connection(seconds: u8) -> Self {
        Control::new(CTRL_EXTEND_CONNECTION, seconds)
    }

    /// Read a metadata blob.
    pub fn read_metadata(kind: MetadataKind) -> Self {
        Control::new(CTRL_READ_METADATA, kind.to_wire())
    }

    /// Read a data blob.
    pub fn read_data(kind: DataReadKind) -> Self {
        Control::new(CTRL_READ_DATA, kind.to_wire())
    }

    /// Request a dashboard stream.
    pub fn dashboard() -> Self {
        Control::new(CTRL_DASHBOARD, 0)
    }

    /// Change the brushing mode to the given mode value.
    pub fn change_mode(mode: u8) -> Self {
        Control::new(CTRL_CHANGE_MODE, mode)
    }

    /// Configure the motor ramping profile.
    pub fn motor_ramping(profile: u8) -> Self {
        Control::new(CTRL_MOTOR_RAMPING, profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_suppression_above_v6() {
        // Command 41 keeps its parameter up to version 6 and loses it after.
        let control = Control::new(41, 5);
        assert_eq!(control.encode(ProtocolVersion::V006), vec![41, 5]);
        assert_eq!(control.encode(ProtocolVersion::V007), vec![41]);
        assert_eq!(control.encode(ProtocolVersion::V008), vec![41]);

        // Mode switching always carries its parameter.
        let control = Control::new(1, 0);
        assert_eq!(control.encode(ProtocolVersion::V006).len(), 2);
        assert_eq!(control.encode(ProtocolVersion::V008).len(), 2);
    }

    #[test]
    fn test_suppressed_command_table_is_exact() {
        for command in 40..=44 {
            assert!(Control::parameter_present(command, ProtocolVersion::V006));
            assert!(!Control::parameter_present(command, ProtocolVersion::V007));
        }
        for command in [CTRL_RTC, CTRL_MY_COLOR] {
            assert!(Control::parameter_present(command, ProtocolVersion::V005));
            assert!(!Control::parameter_present(command, ProtocolVersion::V008));
        }
        // Neighbours of the suppressed ranges are unaffected.
        for command in [39u8, 45, 46, 48] {
            assert!(Control::parameter_present(command, ProtocolVersion::V008));
        }
    }

    #[test]
    fn test_decode_matches_presence_rule() {
        let control = Control::decode(&[41, 7], ProtocolVersion::V006).expect("two bytes");
        assert_eq!(control, Control::new(41, 7));

        let control = Control::decode(&[41], ProtocolVersion::V007).expect("one byte");
        assert_eq!(control, Control::new(41, 0));

        assert_eq!(
            Control::decode(&[41, 7], ProtocolVersion::V007),
            Err(CodecError::length(1, 2))
        );
        assert_eq!(
            Control::decode(&[], ProtocolVersion::V006),
            Err(CodecError::length(1, 0))
        );
    }

    #[test]
    fn test_intent_constructors() {
        assert_eq!(Control::factory_reset(), Control::new(50, 82));
        assert_eq!(Control::extend_connection(30), Control::new(49, 30));
        assert_eq!(Control::dashboard(), Control::new(48, 0));
        assert_eq!(Control::change_mode(4), Control::new(16, 4));
        assert_eq!(
            Control::read_metadata(MetadataKind::SonosType),
            Control::new(5, 255)
        );
        assert_eq!(
            Control::read_data(DataReadKind::DateOfBuild),
            Control::new(2, 255)
        );
    }
}
