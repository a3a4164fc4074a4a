//! BLE advertisement payloads.
//!
//! Brushes announce their live state through manufacturer data under the
//! Procter & Gamble company identifier. Two fields of the payload change
//! their interpretation with the advertised protocol version: the status
//! byte carries a pressure state up to version 5 and a brush status from
//! version 6 on, and the mode byte follows the version's mode table.

use crate::constants::{ADVERTISEMENT_LEN, COMPANY_ID};
use crate::error::{expect_len, CodecError};
use crate::types::{
    BrushStatus, BrushType, BrushingMode, DeviceMainState, PressureState, Quadrant,
};
use crate::version::ProtocolVersion;

/// Version-dependent status field of an advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvertStatus {
    /// Pressure state, advertised up to protocol version 5.
    Pressure(PressureState),
    /// Brush status, advertised from protocol version 6 on.
    Status(BrushStatus),
}

impl AdvertStatus {
    fn from_wire(value: u8, version: ProtocolVersion) -> Result<Self, CodecError> {
        // Unlike the mode table, version 0 still reports a pressure state.
        if version.as_byte() <= 5 {
            Ok(AdvertStatus::Pressure(PressureState::from_wire(value)?))
        } else {
            Ok(AdvertStatus::Status(BrushStatus::from_wire(value)?))
        }
    }

    fn to_wire(self) -> u8 {
        match self {
            AdvertStatus::Pressure(state) => state.to_wire(),
            AdvertStatus::Status(status) => status.to_wire(),
        }
    }
}

/// Decoded manufacturer-data payload of a brush advertisement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushAdvertisement {
    /// Protocol version spoken by the device.
    pub protocol: ProtocolVersion,
    /// Hardware model family.
    pub brush_type: BrushType,
    /// Firmware version byte.
    pub version: u8,
    /// Current main state.
    pub state: DeviceMainState,
    /// Pressure or brush status, depending on the protocol version.
    pub status: AdvertStatus,
    /// Elapsed brushing minutes.
    pub brush_time_min: u8,
    /// Elapsed brushing seconds.
    pub brush_time_sec: u8,
    /// Active brushing mode.
    pub brush_mode: BrushingMode,
    /// Brushing progress indicator.
    pub brush_progress: u8,
    /// Completed quadrant indicator.
    pub quadrant_completion: Quadrant,
    /// Number of configured quadrants.
    pub total_quadrants: u8,
}

impl BrushAdvertisement {
    /// Decode a manufacturer-data payload. The protocol version is the first
    /// byte, so no external version argument is needed.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, ADVERTISEMENT_LEN)?;

        let protocol = ProtocolVersion::from_byte(data[0])?;
        Ok(BrushAdvertisement {
            protocol,
            brush_type: BrushType::from_wire(data[1])?,
            version: data[2],
            state: DeviceMainState::from_wire(data[3])?,
            status: AdvertStatus::from_wire(data[4], protocol)?,
            brush_time_min: data[5],
            brush_time_sec: data[6],
            brush_mode: BrushingMode::from_wire(data[7], protocol)?,
            brush_progress: data[8],
            quadrant_completion: Quadrant::from_wire(data[9])?,
            total_quadrants: data[10],
        })
    }

    /// Encode the manufacturer-data payload.
    pub fn encode(&self) -> [u8; ADVERTISEMENT_LEN] {
        [
            self.protocol.as_byte(),
            self.brush_type.to_wire(),
            self.version,
            self.state.to_wire(),
            self.status.to_wire(),
            self.brush_time_min,
            self.brush_time_sec,
            self.brush_mode.to_wire(),
            self.brush_progress,
            self.quadrant_completion.to_wire(),
            self.total_quadrants,
        ]
    }
}

/// Whether a manufacturer-data map identifies a brush.
pub fn is_brush(manufacturer_data: &std::collections::HashMap<u16, Vec<u8>>) -> bool {
    manufacturer_data.contains_key(&COMPANY_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Mode, V006Mode};

    #[test]
    fn test_advertisement_round_trip() {
        let advert = BrushAdvertisement {
            protocol: ProtocolVersion::V008,
            brush_type: BrushType::SonosG5,
            version: 0x21,
            state: DeviceMainState::Run,
            status: AdvertStatus::Status(BrushStatus::Run),
            brush_time_min: 1,
            brush_time_sec: 30,
            brush_mode: BrushingMode::V006(V006Mode::Clean),
            brush_progress: 45,
            quadrant_completion: Quadrant::SecondQuadrant,
            total_quadrants: 4,
        };
        let bytes = advert.encode();
        assert_eq!(bytes.len(), ADVERTISEMENT_LEN);
        assert_eq!(BrushAdvertisement::decode(&bytes), Ok(advert));
    }

    #[test]
    fn test_status_switches_with_version() {
        // Version 5: byte 4 is a pressure state, byte 7 uses the classic
        // mode table.
        let data = [5, 64, 0x10, 3, 2, 0, 45, 1, 20, 0, 4];
        let advert = BrushAdvertisement::decode(&data).expect("decodes");
        assert_eq!(
            advert.status,
            AdvertStatus::Pressure(PressureState::HighPressure)
        );
        assert_eq!(advert.brush_mode, BrushingMode::Classic(Mode::DailyClean));

        // Version 6 and later report a brush status instead.
        let data = [6, 49, 0x10, 3, 4, 0, 45, 1, 20, 0, 4];
        let advert = BrushAdvertisement::decode(&data).expect("decodes");
        assert_eq!(advert.status, AdvertStatus::Status(BrushStatus::Run));
        assert_eq!(advert.brush_mode, BrushingMode::V006(V006Mode::Soft));
    }

    #[test]
    fn test_truncated_advertisement() {
        assert_eq!(
            BrushAdvertisement::decode(&[6, 49, 0x10]),
            Err(CodecError::length(ADVERTISEMENT_LEN, 3))
        );
    }

    #[test]
    fn test_is_brush() {
        let mut data = std::collections::HashMap::new();
        assert!(!is_brush(&data));
        data.insert(COMPANY_ID, vec![0u8; 11]);
        assert!(is_brush(&data));
    }
}
