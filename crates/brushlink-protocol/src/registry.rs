//! Characteristic registry.
//!
//! Maps 128-bit characteristic UUIDs (and their 16-bit short forms) to record
//! descriptors. Vendor characteristics share a fixed base UUID with the short
//! code substituted into the top 32 bits; the standard GATT device-name
//! characteristic sits on the Bluetooth base UUID instead. The registry is
//! built once and read-only afterwards; a miss is recoverable so callers can
//! fall back to raw-byte handling.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::constants::*;
use crate::error::CodecError;
use crate::records::{Record, RecordKind};
use crate::version::ProtocolVersion;

/// Expand a vendor short code into the full 128-bit characteristic UUID.
pub fn expand_short_id(short: u16) -> Uuid {
    Uuid::from_fields(
        0xA0F0_0000 | u32::from(short),
        0x5047,
        0x4D53,
        &[0x82, 0x08, 0x4F, 0x72, 0x61, 0x6C, 0x2D, 0x42],
    )
}

/// The standard GATT device-name characteristic UUID.
fn device_name_uuid() -> Uuid {
    Uuid::from_fields(
        u32::from(CH_DEVICE_NAME),
        0x0000,
        0x1000,
        &[0x80, 0x00, 0x00, 0x80, 0x5F, 0x9B, 0x34, 0xFB],
    )
}

/// Describes one registered characteristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicDescriptor {
    /// Full 128-bit identifier.
    pub uuid: Uuid,
    /// 16-bit short form.
    pub short_id: u16,
    /// Human-readable name.
    pub name: &'static str,
    /// Wire layout of the characteristic's value.
    pub kind: RecordKind,
}

/// Lookup table over all known characteristics.
#[derive(Debug, Default)]
pub struct CharacteristicRegistry {
    descriptors: Vec<CharacteristicDescriptor>,
    by_uuid: HashMap<Uuid, usize>,
    by_short: HashMap<u16, usize>,
}

impl CharacteristicRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        CharacteristicRegistry::default()
    }

    /// Create a registry holding every known brush characteristic.
    pub fn with_defaults() -> Self {
        let mut registry = CharacteristicRegistry::new();
        for &(short, name, kind) in DEFAULT_CHARACTERISTICS {
            registry.register(CharacteristicDescriptor {
                uuid: expand_short_id(short),
                short_id: short,
                name,
                kind,
            });
        }
        registry.register(CharacteristicDescriptor {
            uuid: device_name_uuid(),
            short_id: CH_DEVICE_NAME,
            name: "name",
            kind: RecordKind::DeviceName,
        });
        registry
    }

    /// Register a characteristic. A duplicate UUID replaces the old entry's
    /// lookup keys; lookup is by key, never by registration order.
    pub fn register(&mut self, descriptor: CharacteristicDescriptor) {
        let index = self.descriptors.len();
        self.by_uuid.insert(descriptor.uuid, index);
        self.by_short.insert(descriptor.short_id, index);
        self.descriptors.push(descriptor);
    }

    /// Resolve a full 128-bit identifier.
    pub fn resolve(&self, uuid: &Uuid) -> Option<&CharacteristicDescriptor> {
        self.by_uuid.get(uuid).map(|i| &self.descriptors[*i])
    }

    /// Resolve a 16-bit short identifier.
    pub fn resolve_short(&self, short: u16) -> Option<&CharacteristicDescriptor> {
        self.by_short.get(&short).map(|i| &self.descriptors[*i])
    }

    /// Resolve by human-readable name.
    pub fn resolve_by_name(&self, name: &str) -> Option<&CharacteristicDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Resolve a full identifier, turning a miss into an error.
    pub fn resolve_strict(&self, uuid: &Uuid) -> Result<&CharacteristicDescriptor, CodecError> {
        self.resolve(uuid)
            .ok_or_else(|| CodecError::NotFound(uuid.to_string()))
    }

    /// All registered descriptors in registration order.
    pub fn descriptors(&self) -> &[CharacteristicDescriptor] {
        &self.descriptors
    }

    /// Decode the value of the characteristic identified by `uuid`.
    pub fn decode_characteristic(
        &self,
        uuid: &Uuid,
        data: &[u8],
        version: ProtocolVersion,
    ) -> Result<Record, CodecError> {
        let descriptor = self.resolve_strict(uuid)?;
        log::trace!(
            "decode {} ({} bytes: {})",
            descriptor.name,
            data.len(),
            hex::encode(data)
        );
        Record::decode(descriptor.kind, data, version)
    }

    /// Encode `record` for the characteristic identified by `uuid`. The
    /// record's kind must match the characteristic's layout.
    pub fn encode_characteristic(
        &self,
        uuid: &Uuid,
        record: &Record,
        version: ProtocolVersion,
    ) -> Result<Vec<u8>, CodecError> {
        let descriptor = self.resolve_strict(uuid)?;
        if descriptor.kind != record.kind() {
            return Err(CodecError::UnsupportedVariant(record.kind().name()));
        }
        Ok(record.encode(version))
    }
}

/// Short code, name and layout of every vendor characteristic.
const DEFAULT_CHARACTERISTICS: &[(u16, &str, RecordKind)] = &[
    (CH_BRUSH_ID, "brush_id", RecordKind::BrushId),
    (CH_BRUSH_INFO, "brush_info", RecordKind::BrushInfo),
    (CH_USER_ID, "user_id", RecordKind::UserId),
    (CH_DEVICE_STATE, "device_state", RecordKind::DeviceState),
    (CH_BATTERY_LEVEL, "battery_level", RecordKind::BatteryLevel),
    (CH_BUTTON, "button", RecordKind::Button),
    (CH_BRUSHING_MODE, "brushing_mode", RecordKind::BrushingMode),
    (CH_BRUSHING_TIME, "brushing_time", RecordKind::BrushingTime),
    (CH_QUADRANT, "toothbrush_quadrant", RecordKind::Quadrant),
    (CH_SMILEY, "smiley", RecordKind::Smiley),
    (CH_PRESSURE, "pressure", RecordKind::Pressure),
    (CH_SENSOR_DATA, "sensor_data", RecordKind::SensorData),
    (CH_CONTROL, "control", RecordKind::Control),
    (CH_RTC, "rtc", RecordKind::Rtc),
    (CH_TIMEZONE, "timezone", RecordKind::Timezone),
    (CH_BRUSH_MODES, "brush_modes", RecordKind::BrushModes),
    (CH_TONGUE_TIME, "tongue_time", RecordKind::TongueTime),
    (CH_MY_COLOR, "my_color", RecordKind::Color),
    (CH_DASHBOARD_CONFIG, "dashboard", RecordKind::DashboardConfig),
    (
        CH_REFILL_REMAINDER,
        "refill_remainder",
        RecordKind::RefillRemainder,
    ),
    (CH_OTA_COMMAND, "ota_command", RecordKind::OtaCommand),
    (CH_OTA_PAYLOAD, "ota_payload", RecordKind::OtaPayload),
    (CH_OTA_STATE, "ota_state", RecordKind::OtaState),
    (
        CH_OTA_TRANSFER_SIZE,
        "ota_transfer_size",
        RecordKind::OtaTransferSize,
    ),
];

/// Process-wide registry of the default characteristics.
pub static REGISTRY: Lazy<CharacteristicRegistry> = Lazy::new(CharacteristicRegistry::with_defaults);
