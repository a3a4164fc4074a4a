//! Protocol constants
//!
//! Short characteristic codes, sensor frame markers, control command values
//! and wire sizes used by the brush GATT protocol.

// ============================================================================
// Characteristic Short Codes (16-bit, expanded through the base UUID template)
// ============================================================================

/// Capabilities service.
pub const SVC_CAPABILITIES: u16 = 0xFF00;
/// Configuration service.
pub const SVC_CONFIG: u16 = 0xFF20;
/// Firmware update (OTA) service.
pub const SVC_OTA: u16 = 0xFF80;

/// Brush serial/identity number.
pub const CH_BRUSH_ID: u16 = 0xFF01;
/// Brush model, protocol version and firmware version.
pub const CH_BRUSH_INFO: u16 = 0xFF02;
/// Active user slot.
pub const CH_USER_ID: u16 = 0xFF03;
/// Main state and sub-state of the device.
pub const CH_DEVICE_STATE: u16 = 0xFF04;
/// Battery level (layout grows with protocol version).
pub const CH_BATTERY_LEVEL: u16 = 0xFF05;
/// Last pressed hardware button.
pub const CH_BUTTON: u16 = 0xFF06;
/// Currently selected brushing mode.
pub const CH_BRUSHING_MODE: u16 = 0xFF07;
/// Elapsed brushing time.
pub const CH_BRUSHING_TIME: u16 = 0xFF08;
/// Quadrant progress.
pub const CH_QUADRANT: u16 = 0xFF09;
/// Smiley display selection.
pub const CH_SMILEY: u16 = 0xFF0A;
/// Pressure sensor report.
pub const CH_PRESSURE: u16 = 0xFF0B;
/// Polymorphic 20-byte sensor/telemetry frame.
pub const CH_SENSOR_DATA: u16 = 0xFF0D;
/// Multiplexed control characteristic.
pub const CH_CONTROL: u16 = 0xFF21;
/// Real-time clock (epoch milliseconds).
pub const CH_RTC: u16 = 0xFF22;
/// Timezone selector (layout unverified).
pub const CH_TIMEZONE: u16 = 0xFF23;
/// Configured brushing mode slots.
pub const CH_BRUSH_MODES: u16 = 0xFF25;
/// Tongue cleaning duration (layout unverified).
pub const CH_TONGUE_TIME: u16 = 0xFF27;
/// Signal color configuration.
pub const CH_MY_COLOR: u16 = 0xFF2B;
/// Dashboard streaming configuration.
pub const CH_DASHBOARD_CONFIG: u16 = 0xFF2C;
/// Brush head refill reminder.
pub const CH_REFILL_REMAINDER: u16 = 0xFF2D;
/// OTA command register.
pub const CH_OTA_COMMAND: u16 = 0xFF81;
/// OTA payload chunk.
pub const CH_OTA_PAYLOAD: u16 = 0xFF82;
/// OTA state register.
pub const CH_OTA_STATE: u16 = 0xFF84;
/// OTA transfer size (layout unverified).
pub const CH_OTA_TRANSFER_SIZE: u16 = 0xFF85;
/// Standard GATT device name characteristic.
pub const CH_DEVICE_NAME: u16 = 0x2A00;

// ============================================================================
// Sensor Frame Markers
// ============================================================================

/// Fixed length of every sensor-data frame.
pub const SENSOR_FRAME_LEN: usize = 20;
/// Offset of the variant tag byte within a marked frame.
pub const SENSOR_PAYLOAD_LEN: usize = 18;
/// Final frame byte indicating that a variant tag precedes it.
pub const SENSOR_MARKER_SPECIAL: u8 = 0x80;
/// Variant tag for gyro-augmented motion records.
pub const SENSOR_TAG_COMINO: u8 = 16;
/// Variant tag for a single high-resolution motion record.
pub const SENSOR_TAG_HIGH_RESOLUTION: u8 = 8;
/// Variant tag for calibration records.
pub const SENSOR_TAG_CALIBRATION: u8 = 7;
/// Variant tag for dashboard records.
pub const SENSOR_TAG_DASHBOARD: u8 = 32;

// ============================================================================
// Control Commands
// ============================================================================

/// Switch the motor off.
pub const CTRL_MOTOR_OFF: u8 = 0;
/// Select daily-clean mode.
pub const CTRL_SET_TO_DAILY_CLEAN_MODE: u8 = 1;
/// Read a data blob; the parameter selects which (see `DataReadKind`).
pub const CTRL_READ_DATA: u8 = 2;
/// Clear a pending notification.
pub const CTRL_NOTIFICATION_CLEAR: u8 = 3;
/// Read calibration values.
pub const CTRL_CALIBRATION_READ: u8 = 4;
/// Read device metadata; the parameter selects which (see `MetadataKind`).
pub const CTRL_READ_METADATA: u8 = 5;
/// Select mode-switch-on behaviour.
pub const CTRL_MODE_SWITCHING_ON: u8 = 14;
/// Select mode-switch-off behaviour.
pub const CTRL_MODE_SWITCHING_OFF: u8 = 15;
/// Change the brushing mode; the parameter carries the mode value.
pub const CTRL_CHANGE_MODE: u8 = 16;
/// Read the configured device color.
pub const CTRL_DEVICE_COLOR_READ: u8 = 18;
/// Stop the timer signal.
pub const CTRL_STOP_TIMER_SIGNAL: u8 = 32;
/// Trigger a short stutter.
pub const CTRL_TRIGGER_SHORT_STUTTER: u8 = 33;
/// Trigger a long stutter.
pub const CTRL_TRIGGER_LONG_STUTTER: u8 = 34;
/// Trigger a short visual signal.
pub const CTRL_TRIGGER_SHORT_VISUAL_SIGNAL: u8 = 35;
/// Trigger a long visual signal.
pub const CTRL_TRIGGER_LONG_VISUAL_SIGNAL: u8 = 36;
/// Persist the RTC configuration.
pub const CTRL_RTC: u8 = 38;
/// Persist the brush timer configuration.
pub const CTRL_BRUSH_TIMER: u8 = 40;
/// Persist the brush mode configuration / reset the memory timer.
pub const CTRL_BRUSH_MODES: u8 = 41;
/// Persist the quadrant timer configuration.
pub const CTRL_QUADRANT_TIMERS: u8 = 42;
/// Persist the tongue time configuration.
pub const CTRL_TONGUE_TIME: u8 = 43;
/// Persist the pressure configuration.
pub const CTRL_PRESSURE_CONFIGURATION: u8 = 44;
/// Configure motor ramping; the parameter carries the ramping profile.
pub const CTRL_MOTOR_RAMPING: u8 = 46;
/// Persist the signal color configuration.
pub const CTRL_MY_COLOR: u8 = 47;
/// Request a dashboard stream (parameter 0).
pub const CTRL_DASHBOARD: u8 = 48;
/// Extend the BLE connection by the parameter's amount of seconds.
pub const CTRL_EXTEND_CONNECTION: u8 = 49;
/// Factory reset (parameter is always 82).
pub const CTRL_FACTORY_RESET: u8 = 50;
/// Disable motion sensor streaming.
pub const CTRL_MOTION_DISABLE: u8 = 64;
/// Enable motion sensor streaming.
pub const CTRL_MOTION_ENABLE: u8 = 65;
/// Request a high-resolution measurement.
pub const CTRL_HIGH_RESOLUTION_MEASUREMENT: u8 = 66;
/// Disable the pressure sensor.
pub const CTRL_PRESSURE_DISABLE: u8 = 80;
/// Disable rainbow illumination.
pub const CTRL_RAINBOW_ILLUMINATION_DISABLE: u8 = 96;
/// Enable rainbow illumination.
pub const CTRL_RAINBOW_ILLUMINATION_ENABLE: u8 = 97;
/// Trigger rainbow illumination once.
pub const CTRL_TRIGGER_RAINBOW_ILLUMINATION: u8 = 98;
/// Disable charge illumination.
pub const CTRL_CHARGE_ILLUMINATION_DISABLE: u8 = 112;
/// Enable charge illumination.
pub const CTRL_CHARGE_ILLUMINATION_ENABLE: u8 = 113;
/// Trigger the connection illumination.
pub const CTRL_TRIGGER_CONNECTION_ILLUMINATION: u8 = 0x83;

/// Parameter value expected by [`CTRL_FACTORY_RESET`].
pub const CTRL_FACTORY_RESET_PARAMETER: u8 = 82;

// ============================================================================
// Advertisements
// ============================================================================

/// Bluetooth SIG company identifier for Procter & Gamble.
pub const COMPANY_ID: u16 = 0xDC;
/// Length of a brush advertisement manufacturer-data payload.
pub const ADVERTISEMENT_LEN: usize = 11;
