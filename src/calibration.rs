//! Calibration feature-report parsing and the IMU calibration math.
//!
//! A calibration report is always 37 bytes: byte 0 is the (transport-
//! specific) report ID, bytes 1..6 are three gyro biases (pitch, yaw, roll,
//! i16 LE), bytes 19..34 are the gyro speed pair and six accel plus/minus
//! references. Only bytes 7..18 — the gyro plus/minus references — differ
//! by layout:
//!
//! | layout | 7-8 | 9-10 | 11-12 | 13-14 | 15-16 | 17-18 |
//! |---|---|---|---|---|---|---|
//! | USB (interleaved per axis) | pitch+ | pitch- | yaw+ | yaw- | roll+ | roll- |
//! | Bluetooth (all-plus then all-minus) | pitch+ | yaw+ | roll+ | pitch- | yaw- | roll- |

use crate::bytes::read_i16_le;
use crate::model::{AccelAxis, CalibrationData, GyroAxis};

const REPORT_LEN: usize = 37;
const USB_REPORT_ID: u8 = 0x02;
const BT_REPORT_ID: u8 = 0x05;

/// Nominal gyro sensitivity (deg/s per LSB) used when no valid calibration
/// is available: ±2000 deg/s full-scale at 16-bit resolution.
const GYRO_NOMINAL_SCALE: f64 = 1.0 / 16.4;
/// Nominal accelerometer sensitivity (g per LSB) used as a fallback.
const ACCEL_NOMINAL_SCALE: f64 = 1.0 / 8192.0;

/// Errors parsing a calibration feature report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CalibrationError {
    #[error("calibration report too short: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("unexpected calibration report ID: expected 0x{expected:02X}, got 0x{got:02X}")]
    InvalidReportID { expected: u8, got: u8 },
}

/// Parse a USB calibration feature report (report ID 0x02).
pub fn parse_usb(buf: &[u8]) -> Result<CalibrationData, CalibrationError> {
    check_header(buf, USB_REPORT_ID)?;
    let mut data = parse_shared(buf);
    data.gyro_pitch_plus = read_i16_le(buf, 7);
    data.gyro_pitch_minus = read_i16_le(buf, 9);
    data.gyro_yaw_plus = read_i16_le(buf, 11);
    data.gyro_yaw_minus = read_i16_le(buf, 13);
    data.gyro_roll_plus = read_i16_le(buf, 15);
    data.gyro_roll_minus = read_i16_le(buf, 17);
    Ok(data)
}

/// Parse a Bluetooth calibration feature report (report ID 0x05).
pub fn parse_bt(buf: &[u8]) -> Result<CalibrationData, CalibrationError> {
    check_header(buf, BT_REPORT_ID)?;
    let mut data = parse_shared(buf);
    data.gyro_pitch_plus = read_i16_le(buf, 7);
    data.gyro_yaw_plus = read_i16_le(buf, 9);
    data.gyro_roll_plus = read_i16_le(buf, 11);
    data.gyro_pitch_minus = read_i16_le(buf, 13);
    data.gyro_yaw_minus = read_i16_le(buf, 15);
    data.gyro_roll_minus = read_i16_le(buf, 17);
    Ok(data)
}

fn check_header(buf: &[u8], expected_id: u8) -> Result<(), CalibrationError> {
    if buf.is_empty() {
        return Err(CalibrationError::InvalidLength { expected: REPORT_LEN, got: 0 });
    }
    if buf[0] != expected_id {
        return Err(CalibrationError::InvalidReportID { expected: expected_id, got: buf[0] });
    }
    if buf.len() < REPORT_LEN {
        return Err(CalibrationError::InvalidLength { expected: REPORT_LEN, got: buf.len() });
    }
    Ok(())
}

/// Fields shared by both layouts: biases (1..6), speed pair and accel
/// plus/minus (19..34). The layout-specific gyro plus/minus fields are left
/// at their default and filled in by the caller.
fn parse_shared(buf: &[u8]) -> CalibrationData {
    CalibrationData {
        gyro_pitch_bias: read_i16_le(buf, 1),
        gyro_yaw_bias: read_i16_le(buf, 3),
        gyro_roll_bias: read_i16_le(buf, 5),
        gyro_speed_plus: read_i16_le(buf, 19),
        gyro_speed_minus: read_i16_le(buf, 21),
        accel_x_plus: read_i16_le(buf, 23),
        accel_x_minus: read_i16_le(buf, 25),
        accel_y_plus: read_i16_le(buf, 27),
        accel_y_minus: read_i16_le(buf, 29),
        accel_z_plus: read_i16_le(buf, 31),
        accel_z_minus: read_i16_le(buf, 33),
        ..Default::default()
    }
}

struct GyroRefs {
    bias: i16,
    plus: i16,
    minus: i16,
}

fn gyro_refs(data: &CalibrationData, axis: GyroAxis) -> GyroRefs {
    match axis {
        GyroAxis::Pitch => GyroRefs { bias: data.gyro_pitch_bias, plus: data.gyro_pitch_plus, minus: data.gyro_pitch_minus },
        GyroAxis::Yaw => GyroRefs { bias: data.gyro_yaw_bias, plus: data.gyro_yaw_plus, minus: data.gyro_yaw_minus },
        GyroAxis::Roll => GyroRefs { bias: data.gyro_roll_bias, plus: data.gyro_roll_plus, minus: data.gyro_roll_minus },
    }
}

fn accel_refs(data: &CalibrationData, axis: AccelAxis) -> (i16, i16) {
    match axis {
        AccelAxis::X => (data.accel_x_plus, data.accel_x_minus),
        AccelAxis::Y => (data.accel_y_plus, data.accel_y_minus),
        AccelAxis::Z => (data.accel_z_plus, data.accel_z_minus),
    }
}

/// Convert a raw gyro sample to degrees/second using factory calibration:
///
/// `(raw − bias) × (speedPlus + speedMinus) / abs(plus − minus)`
///
/// evaluated in 32-bit signed integer arithmetic before the final float
/// conversion. The `abs()` in the denominator is load-bearing: DS4v1
/// controllers ship with the yaw-axis plus/minus references in swapped sign
/// order (plus < minus); without it the calibrated yaw would come out sign-
/// inverted. If `plus == minus`, the range is zero and this returns `raw` as
/// a floating-point passthrough — callers are expected to have consulted
/// [`CalibrationData::is_valid`], but this never divides by zero regardless.
pub fn calibrate_gyro(data: &CalibrationData, axis: GyroAxis, raw: i16) -> f64 {
    let refs = gyro_refs(data, axis);
    let range = refs.plus as i32 - refs.minus as i32;
    if range == 0 {
        log::debug!("{axis:?} gyro calibration range is zero, passing raw sample {raw} through");
        return raw as f64;
    }
    if range < 0 {
        log::trace!("{axis:?} gyro plus/minus references are inverted (DS4v1 hardware quirk)");
    }
    let numerator = (raw as i32 - refs.bias as i32) * (data.gyro_speed_plus as i32 + data.gyro_speed_minus as i32);
    numerator as f64 / range.unsigned_abs() as f64
}

/// Convert a raw accelerometer sample to g-force:
///
/// `(raw − center) / abs(halfRange)` where `center = (plus + minus) / 2`
/// (integer) and `halfRange = (plus − minus) / 2` (floating point). Same
/// `abs()` guard and zero-range passthrough as [`calibrate_gyro`].
pub fn calibrate_accel(data: &CalibrationData, axis: AccelAxis, raw: i16) -> f64 {
    let (plus, minus) = accel_refs(data, axis);
    let half_range = (plus as i32 - minus as i32) as f64 / 2.0;
    if half_range == 0.0 {
        log::debug!("{axis:?} accel calibration range is zero, passing raw sample {raw} through");
        return raw as f64;
    }
    if half_range < 0.0 {
        log::trace!("{axis:?} accel plus/minus references are inverted (DS4v1 hardware quirk)");
    }
    let center = (plus as i32 + minus as i32) / 2;
    (raw as i32 - center) as f64 / half_range.abs()
}

/// Nominal gyro conversion (deg/s) used when no calibration is available or
/// `CalibrationData::is_valid()` is `false`.
pub fn calibrate_gyro_nominal(raw: i16) -> f64 {
    raw as f64 * GYRO_NOMINAL_SCALE
}

/// Nominal accelerometer conversion (g) used when no calibration is
/// available or `CalibrationData::is_valid()` is `false`.
pub fn calibrate_accel_nominal(raw: i16) -> f64 {
    raw as f64 * ACCEL_NOMINAL_SCALE
}
