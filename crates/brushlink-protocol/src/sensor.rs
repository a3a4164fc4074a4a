//! Sensor-data frame codec.
//!
//! Every sensor notification is exactly 20 bytes. The default content is
//! four plain motion records filling the whole frame. All other shapes are
//! marked by the two trailing bytes: the final byte is `SENSOR_MARKER_SPECIAL`
//! and the byte before it selects the variant.
//!
//! ```text
//! +---------------------------+---------+---------+
//! | records (zero padded)     | tag     | 0x80    |
//! | 18 bytes                  | 1 byte  | 1 byte  |
//! +---------------------------+---------+---------+
//! ```
//!
//! A plain motion frame whose last byte happens to equal the marker value is
//! indistinguishable on the wire; the format owes its unambiguity to the
//! device never producing that value there.

use bytes::BufMut;

use crate::constants::*;
use crate::error::{expect_len, CodecError};
use crate::types::DashboardStatus;

/// A plain motion record (5 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionData {
    /// Sample timestamp.
    pub timestamp: u16,
    /// X axis acceleration.
    pub motion_x: i8,
    /// Y axis acceleration.
    pub motion_y: i8,
    /// Z axis acceleration.
    pub motion_z: i8,
}

/// A gyro-augmented motion record (8 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GyroMotionData {
    /// Sample timestamp.
    pub timestamp: u16,
    /// X axis rotation.
    pub gyro_x: i8,
    /// Y axis rotation.
    pub gyro_y: i8,
    /// Z axis rotation.
    pub gyro_z: i8,
    /// X axis acceleration.
    pub motion_x: i8,
    /// Y axis acceleration.
    pub motion_y: i8,
    /// Z axis acceleration.
    pub motion_z: i8,
}

/// A high-resolution motion record (6 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighResolutionMotionData {
    /// X axis acceleration.
    pub motion_x: i16,
    /// Y axis acceleration.
    pub motion_y: i16,
    /// Z axis acceleration.
    pub motion_z: i16,
}

/// A calibration record (6 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalibrationData {
    /// X axis calibration value.
    pub calibration_x: i16,
    /// Y axis calibration value.
    pub calibration_y: i16,
    /// Z axis calibration value.
    pub calibration_z: i16,
}

/// A dashboard record (9 bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardData {
    /// Stream package status.
    pub status: DashboardStatus,
    /// Sample timestamp.
    pub timestamp: u16,
    /// X axis rotation.
    pub gyro_x: i8,
    /// Y axis rotation.
    pub gyro_y: i8,
    /// Z axis rotation.
    pub gyro_z: i8,
    /// X axis acceleration.
    pub motion_x: i8,
    /// Y axis acceleration.
    pub motion_y: i8,
    /// Z axis acceleration.
    pub motion_z: i8,
}

/// One decoded 20-byte sensor frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorFrame {
    /// Four plain motion records (default, unmarked frame).
    Motion([MotionData; 4]),
    /// Two gyro-augmented motion records.
    Gyro([GyroMotionData; 2]),
    /// A single high-resolution motion record.
    HighResolution(HighResolutionMotionData),
    /// Three calibration records.
    Calibration([CalibrationData; 3]),
    /// Two dashboard records.
    Dashboard([DashboardData; 2]),
}

impl SensorFrame {
    /// Decode a 20-byte frame, dispatching on the trailing marker bytes.
    pub fn decode(data: &[u8]) -> Result<Self, CodecError> {
        expect_len(data, SENSOR_FRAME_LEN)?;

        if data[SENSOR_FRAME_LEN - 1] != SENSOR_MARKER_SPECIAL {
            // Default motion data takes up the whole frame.
            let mut records = [MotionData::default(); 4];
            for (i, record) in records.iter_mut().enumerate() {
                *record = decode_motion(&data[i * 5..]);
            }
            return Ok(SensorFrame::Motion(records));
        }

        match data[SENSOR_FRAME_LEN - 2] {
            SENSOR_TAG_COMINO => {
                let mut records = [GyroMotionData::default(); 2];
                for (i, record) in records.iter_mut().enumerate() {
                    *record = decode_gyro_motion(&data[i * 8..]);
                }
                Ok(SensorFrame::Gyro(records))
            }
            SENSOR_TAG_HIGH_RESOLUTION => {
                Ok(SensorFrame::HighResolution(decode_high_resolution(data)))
            }
            SENSOR_TAG_CALIBRATION => {
                let mut records = [CalibrationData::default(); 3];
                for (i, record) in records.iter_mut().enumerate() {
                    *record = decode_calibration(&data[i * 6..]);
                }
                Ok(SensorFrame::Calibration(records))
            }
            SENSOR_TAG_DASHBOARD => {
                let first = decode_dashboard(&data[..9])?;
                let second = decode_dashboard(&data[9..18])?;
                Ok(SensorFrame::Dashboard([first, second]))
            }
            tag => Err(CodecError::UnknownDiscriminator(tag)),
        }
    }

    /// Encode the frame back to its 20-byte wire form.
    ///
    /// Marked variants are zero padded up to 18 bytes, then the variant tag
    /// and the special marker are appended. A motion frame already fills the
    /// frame and carries no marker.
    pub fn encode(&self) -> [u8; SENSOR_FRAME_LEN] {
        let mut buf = Vec::with_capacity(SENSOR_FRAME_LEN);

        let tag = match self {
            SensorFrame::Motion(records) => {
                for record in records {
                    encode_motion(&mut buf, record);
                }
                None
            }
            SensorFrame::Gyro(records) => {
                for record in records {
                    encode_gyro_motion(&mut buf, record);
                }
                Some(SENSOR_TAG_COMINO)
            }
            SensorFrame::HighResolution(record) => {
                encode_high_resolution(&mut buf, record);
                Some(SENSOR_TAG_HIGH_RESOLUTION)
            }
            SensorFrame::Calibration(records) => {
                for record in records {
                    encode_calibration(&mut buf, record);
                }
                Some(SENSOR_TAG_CALIBRATION)
            }
            SensorFrame::Dashboard(records) => {
                for record in records {
                    encode_dashboard(&mut buf, record);
                }
                Some(SENSOR_TAG_DASHBOARD)
            }
        };

        if let Some(tag) = tag {
            buf.resize(SENSOR_PAYLOAD_LEN, 0);
            buf.put_u8(tag);
            buf.put_u8(SENSOR_MARKER_SPECIAL);
        }

        let mut frame = [0u8; SENSOR_FRAME_LEN];
        frame.copy_from_slice(&buf);
        frame
    }
}

fn decode_motion(data: &[u8]) -> MotionData {
    MotionData {
        timestamp: u16::from_le_bytes([data[0], data[1]]),
        motion_x: data[2] as i8,
        motion_y: data[3] as i8,
        motion_z: data[4] as i8,
    }
}

fn decode_gyro_motion(data: &[u8]) -> GyroMotionData {
    GyroMotionData {
        timestamp: u16::from_le_bytes([data[0], data[1]]),
        gyro_x: data[2] as i8,
        gyro_y: data[3] as i8,
        gyro_z: data[4] as i8,
        motion_x: data[5] as i8,
        motion_y: data[6] as i8,
        motion_z: data[7] as i8,
    }
}

fn decode_high_resolution(data: &[u8]) -> HighResolutionMotionData {
    HighResolutionMotionData {
        motion_x: i16::from_le_bytes([data[0], data[1]]),
        motion_y: i16::from_le_bytes([data[2], data[3]]),
        motion_z: i16::from_le_bytes([data[4], data[5]]),
    }
}

fn decode_calibration(data: &[u8]) -> CalibrationData {
    CalibrationData {
        calibration_x: i16::from_le_bytes([data[0], data[1]]),
        calibration_y: i16::from_le_bytes([data[2], data[3]]),
        calibration_z: i16::from_le_bytes([data[4], data[5]]),
    }
}

fn decode_dashboard(data: &[u8]) -> Result<DashboardData, CodecError> {
    Ok(DashboardData {
        status: DashboardStatus::from_wire(data[0])?,
        timestamp: u16::from_le_bytes([data[1], data[2]]),
        gyro_x: data[3] as i8,
        gyro_y: data[4] as i8,
        gyro_z: data[5] as i8,
        motion_x: data[6] as i8,
        motion_y: data[7] as i8,
        motion_z: data[8] as i8,
    })
}

fn encode_motion(buf: &mut Vec<u8>, record: &MotionData) {
    buf.put_u16_le(record.timestamp);
    buf.put_i8(record.motion_x);
    buf.put_i8(record.motion_y);
    buf.put_i8(record.motion_z);
}

fn encode_gyro_motion(buf: &mut Vec<u8>, record: &GyroMotionData) {
    buf.put_u16_le(record.timestamp);
    buf.put_i8(record.gyro_x);
    buf.put_i8(record.gyro_y);
    buf.put_i8(record.gyro_z);
    buf.put_i8(record.motion_x);
    buf.put_i8(record.motion_y);
    buf.put_i8(record.motion_z);
}

fn encode_high_resolution(buf: &mut Vec<u8>, record: &HighResolutionMotionData) {
    buf.put_i16_le(record.motion_x);
    buf.put_i16_le(record.motion_y);
    buf.put_i16_le(record.motion_z);
}

fn encode_calibration(buf: &mut Vec<u8>, record: &CalibrationData) {
    buf.put_i16_le(record.calibration_x);
    buf.put_i16_le(record.calibration_y);
    buf.put_i16_le(record.calibration_z);
}

fn encode_dashboard(buf: &mut Vec<u8>, record: &DashboardData) {
    buf.put_u8(record.status.to_wire());
    buf.put_u16_le(record.timestamp);
    buf.put_i8(record.gyro_x);
    buf.put_i8(record.gyro_y);
    buf.put_i8(record.gyro_z);
    buf.put_i8(record.motion_x);
    buf.put_i8(record.motion_y);
    buf.put_i8(record.motion_z);
}
