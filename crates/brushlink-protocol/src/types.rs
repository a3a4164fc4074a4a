//! Record types and closed enumeration field sets.
//!
//! Every enum-valued wire field is a strict closed set: a byte outside the
//! declared values is a decode error, never a silently-accepted raw value.

use crate::error::CodecError;
use crate::version::ProtocolVersion;

/// Define a closed integer-keyed enumeration with strict wire conversions.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($field:literal) {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Parse the value from its wire byte.
            pub fn from_wire(value: u8) -> Result<Self, $crate::error::CodecError> {
                match value {
                    $( $value => Ok($name::$variant), )+
                    _ => Err($crate::error::CodecError::invalid_value($field, value)),
                }
            }

            /// Get the wire byte of this value.
            pub fn to_wire(self) -> u8 {
                match self {
                    $( $name::$variant => $value, )+
                }
            }
        }
    };
}

pub(crate) use closed_enum;

closed_enum! {
    /// Main state of the device.
    pub enum DeviceMainState ("device_state.state") {
        Unknown = 0,
        Init = 1,
        Idle = 2,
        Run = 3,
        Charge = 4,
        Setup = 5,
        FlightMenu = 6,
        ChargeForbidden = 7,
        PreRun = 8,
        PostRun = 9,
        FinalTest = 113,
        PcbTest = 114,
        Sleep = 115,
        Transport = 116,
        CalibrationTest = 117,
    }
}

closed_enum! {
    /// Sub-state of the device.
    pub enum DeviceSubState ("device_state.sub_state") {
        TransportDisabledDeactivateTimerDisabled = 0,
        TransportEnabledDeactivateTimerDisabled = 1,
        TransportEnabledDeactivateTimerEnabled = 2,
        Unknown = 0xFF,
    }
}

closed_enum! {
    /// Face shown on the smiley display.
    pub enum SmileyFace ("smiley.face") {
        Off = 0,
        Standard = 1,
        Special2 = 2,
        Special3 = 3,
        Special4 = 4,
        Special5 = 5,
        Special6 = 6,
        Special7 = 7,
    }
}

closed_enum! {
    /// Last pressed hardware button.
    pub enum ButtonState ("button.state") {
        NothingPressed = 0,
        PowerPressed = 1,
        ModePressed = 2,
        Unknown = 0xFF,
    }
}

closed_enum! {
    /// Reported pressure level.
    pub enum PressureState ("pressure.state") {
        LowPressure = 0,
        NormalPressure = 1,
        HighPressure = 2,
    }
}

closed_enum! {
    /// Refill reminder state.
    pub enum RefillState ("refill_remainder.state") {
        On = 0,
        Reset = 1,
        Snooze = 2,
        Interval = 0xFE,
        Off = 0xFF,
    }
}

closed_enum! {
    /// Dashboard stream resolution divider.
    pub enum DashboardDivider ("dashboard.divider") {
        FullResolution = 0,
        HalfResolution = 2,
        QuarterResolution = 4,
    }
}

closed_enum! {
    /// Commands accepted by the OTA command register.
    pub enum OtaCommand ("ota_command.command") {
        Standby = 0,
        Initialize = 17,
        FinishUpload = 19,
        FlashFirmware = 26,
        Reset = 27,
        Error = 30,
    }
}

closed_enum! {
    /// States reported by the OTA state register.
    pub enum OtaState ("ota_state.state") {
        Standby = 0,
        AppInitialized = 17,
        AppVerifySize = 18,
        AppReadyForPayload = 19,
        AppUnknownPause = 20,
        AppCompleted = 21,
        AppCompletedNotCharged = 22,
        AppError = 30,
        FlashStarted = 0xAA,
        Error = 0xEE,
        FlashConfirmed = 0xFF,
    }
}

closed_enum! {
    /// Brushing modes used by devices below protocol version 6.
    pub enum Mode ("brushing_mode.mode") {
        Off = 0,
        DailyClean = 1,
        Sensitive = 2,
        Massage = 3,
        Whitening = 4,
        DeepClean = 5,
        TongueClean = 6,
        ProClean = 7,
        Unknown = 0xFF,
    }
}

closed_enum! {
    /// Brushing modes used by protocol version 6 and later.
    pub enum V006Mode ("brushing_mode.mode") {
        Clean = 0,
        Soft = 1,
        Massage = 2,
        Polish = 3,
        Turbo = 4,
        SoftPlus = 5,
        Tongue = 6,
        Off = 7,
        Settings = 8,
        Unknown = 0xFF,
    }
}

closed_enum! {
    /// Mouth quadrant progress indicator.
    pub enum Quadrant ("quadrant.quadrant") {
        FirstQuadrant = 0,
        SecondQuadrant = 1,
        ThirdQuadrant = 2,
        FourthQuadrant = 3,
        FifthQuadrant = 4,
        SixthQuadrant = 5,
        SeventhQuadrant = 6,
        EighthQuadrant = 7,
        NoQuadrantsDefined = 0xF0,
        Unknown = 0xFE,
        LastQuadrant = 0xFF,
    }
}

closed_enum! {
    /// Brush hardware model family.
    pub enum BrushType ("brush_info.type") {
        D36XMode = 0,
        D36SixMode = 1,
        D36FiveMode = 2,
        D36Experimental = 63,
        D21XMode = 64,
        D21FourMode = 65,
        D21ThreeMode = 66,
        D21TwoAMode = 67,
        D21TwoBMode = 68,
        D21ThreeModeWhitening = 69,
        D21OneMode = 70,
        D21Experimental = 127,
        D706XMode = 112,
        D706SixMode = 113,
        D706FiveMode = 114,
        D706XModeChina = 117,
        D706SixModeChina = 118,
        D706FiveModeChina = 119,
        D701XMode = 32,
        D701SixMode = 33,
        D701FiveMode = 34,
        D700FiveMode = 39,
        D700FourMode = 40,
        D700SixMode = 41,
        D601XMode = 80,
        D601FiveMode = 81,
        D601FourMode = 82,
        D601ThreeAMode = 83,
        D601TwoAMode = 84,
        D601TwoBMode = 85,
        D601ThreeBMode = 86,
        D601OneMode = 87,
        SonosXMode = 48,
        Sonos = 49,
        SonosBigTi = 50,
        SonosG4 = 52,
        SonosG5 = 53,
        SonosEPlatform = 54,
        Unknown = 153,
        Experimental = 255,
    }
}

closed_enum! {
    /// Brush status advertised on protocol version 6 and later.
    pub enum BrushStatus ("advertisement.status") {
        NotConnected = 0,
        PreRun = 1,
        Idle = 2,
        Charging = 3,
        Run = 4,
        Setup = 5,
        FlightMenu = 6,
        FinalTest = 0x71,
        PcbTest = 0x72,
        Sleep = 0x73,
        Transport = 0x74,
        Unknown = 0xFF,
    }
}

closed_enum! {
    /// Status byte of a dashboard sensor record.
    pub enum DashboardStatus ("dashboard_data.status") {
        FirstPackage = 1,
        PackagesPending = 2,
        LastPackage = 8,
        SessionIdInvalid = 239,
    }
}

/// The selected brushing mode, whose wire interpretation switches at
/// protocol version 6 (version 0 is treated like the newer table).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrushingMode {
    /// Pre-V006 mode table.
    Classic(Mode),
    /// V006-and-later mode table.
    V006(V006Mode),
}

impl BrushingMode {
    /// Parse a mode byte under the given protocol version.
    pub fn from_wire(value: u8, version: ProtocolVersion) -> Result<Self, CodecError> {
        if version.at_least(6) || version == ProtocolVersion::Unknown {
            Ok(BrushingMode::V006(V006Mode::from_wire(value)?))
        } else {
            Ok(BrushingMode::Classic(Mode::from_wire(value)?))
        }
    }

    /// Get the wire byte of this mode.
    pub fn to_wire(self) -> u8 {
        match self {
            BrushingMode::Classic(mode) => mode.to_wire(),
            BrushingMode::V006(mode) => mode.to_wire(),
        }
    }
}

// ============================================================================
// Record structs
// ============================================================================

/// Active user slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId {
    /// The user ID.
    pub id: u8,
}

/// Signal color configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red component.
    pub red: u8,
    /// Green component.
    pub green: u8,
    /// Blue component.
    pub blue: u8,
    /// Color slot identifier.
    pub identifier: u8,
}

/// Main and sub-state of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    /// The main state.
    pub state: DeviceMainState,
    /// The sub-state.
    pub sub_state: DeviceSubState,
}

/// Real-time clock value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rtc {
    /// Milliseconds since the Unix epoch.
    pub epoch_millis: u32,
}

/// Smiley display selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Smiley {
    /// Selected face.
    pub face: SmileyFace,
}

/// Timezone selector. Layout is a best-effort guess and unverified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone {
    /// Zone selector byte.
    pub zone: u8,
}

/// Tongue cleaning duration. Layout is a best-effort guess and unverified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TongueTime {
    /// Duration byte.
    pub duration: u8,
}

/// OTA transfer size. Layout is a best-effort guess and unverified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtaTransferSize {
    /// Transfer size in bytes.
    pub value: u32,
}

/// Pressure sensor report (protocol version 6 and later).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pressure {
    /// Reported pressure level.
    pub state: PressureState,
    /// First event timestamp.
    pub timestamp_a: u16,
    /// First event record.
    pub record_a: u16,
    /// Second event timestamp.
    pub timestamp_b: u16,
    /// Second event record.
    pub record_b: u16,
    /// Report identifier.
    pub identifier: u8,
}

/// Brush head refill reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillRemainder {
    /// Reminder state.
    pub state: RefillState,
    /// Days left until a refill is due.
    pub days_left: u16,
    /// Brushing seconds left until a refill is due.
    pub brushing_seconds_left: u16,
}

/// Dashboard streaming configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Session to stream.
    pub session_id: u16,
    /// Stream resolution divider.
    pub divider: DashboardDivider,
}

/// Last pressed hardware button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    /// Button state.
    pub state: ButtonState,
}

/// Battery extension fields present from protocol version 8.
///
/// `milli_volts`, `dcmas` and `rcmas` are big-endian on the wire while the
/// rest of the record stays little-endian; that asymmetry is part of the
/// format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryExtension {
    /// Battery voltage in millivolts (big-endian).
    pub milli_volts: u16,
    /// Battery current in milliamperes.
    pub milli_amperes: u16,
    /// Battery temperature in degrees Celsius.
    pub temperature: i8,
    /// Available state of charge in percent.
    pub avail_soc: u8,
    /// Discharge capacity in milliampere-seconds (big-endian).
    pub dcmas: u32,
    /// Remaining capacity in milliampere-seconds (big-endian).
    pub rcmas: u32,
    /// State-of-charge estimator state.
    pub soc_state: u8,
}

/// Battery level. Field presence depends on the protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatteryLevel {
    /// Charge level in percent.
    pub level: u8,
    /// Remaining runtime in seconds (version >= 6).
    pub seconds_left: Option<u16>,
    /// Extended gauge readings (version >= 8).
    pub extension: Option<BatteryExtension>,
}

/// Elapsed brushing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushingTime {
    /// Minutes part.
    pub minutes: u8,
    /// Seconds part.
    pub seconds: u8,
}

/// Quadrant progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToothbrushQuadrant {
    /// Currently active quadrant.
    pub quadrant: Quadrant,
    /// Number of configured quadrants.
    pub num_quadrants: u8,
}

/// Configured brushing mode slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushModes {
    /// Raw mode slot bytes.
    pub modes: [u8; 8],
}

impl BrushModes {
    /// Interpret the slots against the classic mode table.
    pub fn modes(&self) -> Result<Vec<Mode>, CodecError> {
        self.modes.iter().map(|m| Mode::from_wire(*m)).collect()
    }
}

/// Brush model, protocol version and firmware version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushInfo {
    /// Hardware model family.
    pub brush_type: BrushType,
    /// Protocol version spoken by the device.
    pub protocol: ProtocolVersion,
    /// Firmware version byte.
    pub version: u8,
}

/// Brush serial/identity number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushId {
    /// Device identity.
    pub id: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_enum_rejects_unknown_values() {
        assert_eq!(SmileyFace::from_wire(3), Ok(SmileyFace::Special3));
        assert_eq!(
            SmileyFace::from_wire(8),
            Err(CodecError::invalid_value("smiley.face", 8))
        );
        assert!(DeviceMainState::from_wire(112).is_err());
        assert_eq!(
            DeviceMainState::from_wire(113),
            Ok(DeviceMainState::FinalTest)
        );
        assert_eq!(RefillState::from_wire(0xFE), Ok(RefillState::Interval));
        assert!(DashboardDivider::from_wire(1).is_err());
    }

    #[test]
    fn test_enum_wire_round_trip() {
        for value in [0u8, 1, 2, 0xFF] {
            let state = DeviceSubState::from_wire(value).expect("valid sub-state");
            assert_eq!(state.to_wire(), value);
        }
        for value in [0u8, 17, 19, 26, 27, 30] {
            let command = OtaCommand::from_wire(value).expect("valid command");
            assert_eq!(command.to_wire(), value);
        }
    }

    #[test]
    fn test_brushing_mode_switches_at_v6() {
        let mode = BrushingMode::from_wire(4, ProtocolVersion::V005).expect("classic table");
        assert_eq!(mode, BrushingMode::Classic(Mode::Whitening));

        let mode = BrushingMode::from_wire(4, ProtocolVersion::V006).expect("v006 table");
        assert_eq!(mode, BrushingMode::V006(V006Mode::Turbo));

        // An undetermined version falls back to the newer table.
        let mode = BrushingMode::from_wire(8, ProtocolVersion::Unknown).expect("v006 table");
        assert_eq!(mode, BrushingMode::V006(V006Mode::Settings));
        assert!(BrushingMode::from_wire(8, ProtocolVersion::V005).is_err());
    }
}
