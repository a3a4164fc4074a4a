//! Metadata and data-read reply payloads.
//!
//! The control characteristic answers `READ_METADATA` and `READ_DATA`
//! commands with small structured blobs on the same characteristic. Most
//! replies start with a magic byte matching the request selector. These are
//! decode-only; the host never writes them back.

use uuid::Uuid;

use crate::error::{expect_len, CodecError};
use crate::types::closed_enum;

closed_enum! {
    /// Metadata selector for `Control::read_metadata`.
    pub enum MetadataKind ("control.metadata") {
        DeviceUuid = 1,
        BusinessUnit = 2,
        BleProfile = 3,
        DeviceType = 4,
        DevicePcba = 5,
        SwVerBluetoothController = 6,
        SwVerSystemController1 = 7,
        SwVerSystemController2 = 8,
        GitCommitHash = 9,
        SonosType = 255,
    }
}

closed_enum! {
    /// Data-blob selector for `Control::read_data`.
    pub enum DataReadKind ("control.data_read") {
        ServiceDataA = 250,
        ServiceDataB = 251,
        SwVerSecondaryController = 252,
        SwVerMainController = 253,
        TimeOfBuild = 254,
        DateOfBuild = 255,
    }
}

closed_enum! {
    /// Sonos hardware model.
    pub enum SonosModel ("sonos_metadata.model") {
        Undefined = 0,
        M9 = 1,
        M8 = 2,
        M7 = 3,
        M6 = 4,
        M5 = 5,
        M4 = 6,
        M10 = 16,
        E11 = 17,
    }
}

closed_enum! {
    /// Sonos handle color.
    pub enum SonosColor ("sonos_metadata.color") {
        Undefined = 0,
        White = 1,
        Onyx = 2,
        Violet = 3,
        RoseGold = 4,
        StormyGrey = 5,
        LightRose = 6,
        DarkBlue = 7,
        LightBlue = 8,
        IceBlue = 9,
        LilacMist = 10,
        SpeckledWhite = 11,
        SpeckledBlack = 12,
        PurpleRain = 13,
        DeepBlack = 14,
        ForestGreen = 15,
        OceanBlue = 16,
    }
}

closed_enum! {
    /// Sonos display language.
    pub enum SonosLanguage ("sonos_metadata.language") {
        EnglishEn = 0,
        DeutschDe = 1,
        ChineseCc = 2,
        ItalianIt = 3,
        JapaneseJp = 4,
        ArabicAr = 5,
        FrenchFr = 6,
        SpanishSp = 7,
        PolishPl = 8,
        RussianRu = 9,
        KoreanSk = 10,
        Undefined = 255,
    }
}

closed_enum! {
    /// Gum guard feature state.
    pub enum GumGuard ("sonos_metadata.gum_guard") {
        Off = 0,
        On = 1,
        Hd = 2,
        NotAvailable = 255,
    }
}

/// Sonos device metadata (selector 255).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SonosMetadata {
    /// Hardware model.
    pub model: SonosModel,
    /// Handle color.
    pub color: SonosColor,
    /// Display language.
    pub language: SonosLanguage,
    /// Raw brush mode slots.
    pub brush_modes: [u8; 8],
    /// Gum guard state.
    pub gum_guard: GumGuard,
}

impl SonosMetadata {
    const MAGIC: u8 = 0xFF;

    /// Decode a sonos metadata reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 13)?;
        if data[0] != Self::MAGIC {
            return Err(CodecError::invalid_value("sonos_metadata.magic", data[0]));
        }

        let mut brush_modes = [0u8; 8];
        brush_modes.copy_from_slice(&data[4..12]);
        Ok(SonosMetadata {
            model: SonosModel::from_wire(data[1])?,
            color: SonosColor::from_wire(data[2])?,
            language: SonosLanguage::from_wire(data[3])?,
            brush_modes,
            gum_guard: GumGuard::from_wire(data[12])?,
        })
    }
}

/// Version info of the first system controller (selector 7).
///
/// This layout is a reverse-engineering guess and has not been confirmed
/// against real hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemController1 {
    /// Media content version.
    pub media_content_version: u8,
    /// Hardware configuration.
    pub hardware_config: u8,
    /// Memory map version.
    pub mmap_version: u8,
    /// Info sector version.
    pub info_sector_version: u8,
}

impl SystemController1 {
    const MAGIC: u8 = 0x07;

    /// Decode a first-system-controller reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 5)?;
        if data[0] != Self::MAGIC {
            return Err(CodecError::invalid_value("system_controller_1.magic", data[0]));
        }
        Ok(SystemController1 {
            media_content_version: data[1],
            hardware_config: data[2],
            mmap_version: data[3],
            info_sector_version: data[4],
        })
    }
}

/// Version info of the second system controller (selector 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemController2 {
    /// Controller version.
    pub version: u8,
}

impl SystemController2 {
    const MAGIC: u8 = 0x07;

    /// Decode a second-system-controller reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 2)?;
        if data[0] != Self::MAGIC {
            return Err(CodecError::invalid_value("system_controller_2.magic", data[0]));
        }
        Ok(SystemController2 { version: data[1] })
    }
}

/// BLE profile versions (selector 3).
///
/// This layout is a reverse-engineering guess; devices have been observed
/// returning other data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BleProfile {
    /// ASCII prefix letter of the bootloader version.
    pub prefix_bootloader: u8,
    /// Bootloader version number.
    pub num_bootloader: u8,
    /// Bootloader build number.
    pub build_bootloader: u8,
    /// ASCII prefix letter of the secondary program version.
    pub prefix_sec_program: u8,
    /// Secondary program version number.
    pub num_sec_program: u8,
    /// Secondary program build number.
    pub build_sec_program: u8,
}

impl BleProfile {
    const MAGIC: u8 = 0x06;

    /// Decode a BLE profile reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 7)?;
        if data[0] != Self::MAGIC {
            return Err(CodecError::invalid_value("ble_profile.magic", data[0]));
        }
        Ok(BleProfile {
            prefix_bootloader: data[1],
            num_bootloader: data[2],
            build_bootloader: data[3],
            prefix_sec_program: data[4],
            num_sec_program: data[5],
            build_sec_program: data[6],
        })
    }
}

/// Unique device identifier (selector 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceUuid {
    /// The device UUID.
    pub id: Uuid,
}

impl DeviceUuid {
    /// Decode a device UUID reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 16)?;
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(data);
        Ok(DeviceUuid {
            id: Uuid::from_bytes(bytes),
        })
    }
}

/// Service counters, part A (selector 250).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDataA {
    /// Ideal full battery capacity.
    pub ideal_full_capacity: u16,
    /// Average motor current.
    pub average_motor_current: u16,
    /// Total monitored runtime.
    pub total_monitor_runtime: u32,
    /// Total pressure events.
    pub total_pressure: u32,
    /// Total charge time.
    pub total_charge_time: u32,
}

impl ServiceDataA {
    /// Decode a service-data-A reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 16)?;
        Ok(ServiceDataA {
            ideal_full_capacity: u16::from_le_bytes([data[0], data[1]]),
            average_motor_current: u16::from_le_bytes([data[2], data[3]]),
            total_monitor_runtime: u32::from_le_bytes([data[4], data[5], data[6], data[7]]),
            total_pressure: u32::from_le_bytes([data[8], data[9], data[10], data[11]]),
            total_charge_time: u32::from_le_bytes([data[12], data[13], data[14], data[15]]),
        })
    }
}

/// Service counters, part B (selector 251).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceDataB {
    /// Total charge events.
    pub total_charge_events: u16,
    /// Total full charge events.
    pub total_full_charge_events: u16,
    /// Total over-temperature events.
    pub total_over_temp_events: u16,
    /// Total low-temperature events.
    pub total_low_temp_events: u16,
    /// Total brushing cycles.
    pub total_brushing_cycles: u16,
    /// Short term motor current.
    pub short_term_motor_current: u16,
    /// Total recharging hours.
    pub total_recharging_hours: u16,
}

impl ServiceDataB {
    /// Decode a service-data-B reply.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, 14)?;
        Ok(ServiceDataB {
            total_charge_events: u16::from_le_bytes([data[0], data[1]]),
            total_full_charge_events: u16::from_le_bytes([data[2], data[3]]),
            total_over_temp_events: u16::from_le_bytes([data[4], data[5]]),
            total_low_temp_events: u16::from_le_bytes([data[6], data[7]]),
            total_brushing_cycles: u16::from_le_bytes([data[8], data[9]]),
            short_term_motor_current: u16::from_le_bytes([data[10], data[11]]),
            total_recharging_hours: u16::from_le_bytes([data[12], data[13]]),
        })
    }
}

/// A decoded metadata reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetadataReply {
    /// Device UUID.
    DeviceUuid(DeviceUuid),
    /// BLE profile versions.
    BleProfile(BleProfile),
    /// First system controller versions.
    SystemController1(SystemController1),
    /// Second system controller versions.
    SystemController2(SystemController2),
    /// Sonos device metadata.
    Sonos(SonosMetadata),
    /// Selectors without a known structure pass through as raw bytes.
    Raw(Vec<u8>),
}

impl MetadataReply {
    /// Decode a metadata reply for the selector it answers.
    pub fn decode(kind: MetadataKind, data: &[u8]) -> Result<Self, CodecError> {
        match kind {
            MetadataKind::DeviceUuid => Ok(MetadataReply::DeviceUuid(DeviceUuid::decode(data)?)),
            MetadataKind::BleProfile => Ok(MetadataReply::BleProfile(BleProfile::decode(data)?)),
            MetadataKind::SwVerSystemController1 => Ok(MetadataReply::SystemController1(
                SystemController1::decode(data)?,
            )),
            MetadataKind::SwVerSystemController2 => Ok(MetadataReply::SystemController2(
                SystemController2::decode(data)?,
            )),
            MetadataKind::SonosType => Ok(MetadataReply::Sonos(SonosMetadata::decode(data)?)),
            _ => Ok(MetadataReply::Raw(data.to_vec())),
        }
    }
}

/// A decoded data-read reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataReadReply {
    /// Service counters, part A.
    ServiceDataA(ServiceDataA),
    /// Service counters, part B.
    ServiceDataB(ServiceDataB),
    /// Version or build-date text.
    Text(String),
}

impl DataReadReply {
    /// Decode a data-read reply for the selector it answers.
    pub fn decode(kind: DataReadKind, data: &[u8]) -> Result<Self, CodecError> {
        match kind {
            DataReadKind::ServiceDataA => {
                Ok(DataReadReply::ServiceDataA(ServiceDataA::decode(data)?))
            }
            DataReadKind::ServiceDataB => {
                Ok(DataReadReply::ServiceDataB(ServiceDataB::decode(data)?))
            }
            // The main controller version string starts one byte in.
            DataReadKind::SwVerMainController => {
                if data.is_empty() {
                    return Err(CodecError::length(1, 0));
                }
                Ok(DataReadReply::Text(decode_cstring(&data[1..])?))
            }
            DataReadKind::SwVerSecondaryController
            | DataReadKind::TimeOfBuild
            | DataReadKind::DateOfBuild => Ok(DataReadReply::Text(decode_cstring(data)?)),
        }
    }
}

/// Decode a NUL-terminated (or unterminated) UTF-8 string.
fn decode_cstring(data: &[u8]) -> Result<String, CodecError> {
    let end = data.iter().position(|b| *b == 0).unwrap_or(data.len());
    std::str::from_utf8(&data[..end])
        .map(str::to_owned)
        .map_err(|_| CodecError::InvalidUtf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sonos_metadata_decode() {
        let data = [0xFF, 1, 4, 0, 1, 2, 3, 4, 5, 6, 7, 0, 1];
        let meta = SonosMetadata::decode(&data).expect("decodes");
        assert_eq!(meta.model, SonosModel::M9);
        assert_eq!(meta.color, SonosColor::RoseGold);
        assert_eq!(meta.language, SonosLanguage::EnglishEn);
        assert_eq!(meta.brush_modes, [1, 2, 3, 4, 5, 6, 7, 0]);
        assert_eq!(meta.gum_guard, GumGuard::On);
    }

    #[test]
    fn test_magic_byte_is_checked() {
        let data = [0x00, 1, 4, 0, 1, 2, 3, 4, 5, 6, 7, 0, 1];
        assert_eq!(
            SonosMetadata::decode(&data),
            Err(CodecError::invalid_value("sonos_metadata.magic", 0))
        );
        assert!(SystemController2::decode(&[0x08, 3]).is_err());
        assert!(BleProfile::decode(&[0x05, b'B', 1, 2, b'S', 3, 4]).is_err());
    }

    #[test]
    fn test_reply_dispatch() {
        let reply = MetadataReply::decode(MetadataKind::SwVerSystemController2, &[0x07, 9])
            .expect("decodes");
        assert_eq!(
            reply,
            MetadataReply::SystemController2(SystemController2 { version: 9 })
        );

        let reply =
            MetadataReply::decode(MetadataKind::GitCommitHash, b"deadbeef").expect("decodes");
        assert_eq!(reply, MetadataReply::Raw(b"deadbeef".to_vec()));
    }

    #[test]
    fn test_data_read_strings() {
        let reply =
            DataReadReply::decode(DataReadKind::DateOfBuild, b"2023-06-01\0").expect("decodes");
        assert_eq!(reply, DataReadReply::Text("2023-06-01".to_owned()));

        // Main controller text skips a one-byte prefix.
        let reply =
            DataReadReply::decode(DataReadKind::SwVerMainController, b"\x01V4.1\0").expect("decodes");
        assert_eq!(reply, DataReadReply::Text("V4.1".to_owned()));

        assert_eq!(
            DataReadReply::decode(DataReadKind::SwVerSecondaryController, &[0xFF, 0xFE]),
            Err(CodecError::InvalidUtf8)
        );
    }

    #[test]
    fn test_service_data_decode() {
        let mut data = vec![0u8; 16];
        data[0] = 0x10;
        data[1] = 0x27; // 0x2710 = 10000
        let a = ServiceDataA::decode(&data).expect("decodes");
        assert_eq!(a.ideal_full_capacity, 10000);

        assert_eq!(
            ServiceDataB::decode(&data),
            Err(CodecError::length(14, 16))
        );
    }
}
