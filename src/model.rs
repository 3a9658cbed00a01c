//! The closed data-model set shared by the decoder, encoder, and calibration
//! applier. Every type here is value-like, `Copy`, `PartialEq`, and holds no
//! borrowed data — a codec operation borrows its input and returns an owned
//! value.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One analog stick's position. `0` = left/up, `128` = center, `255` =
/// right/down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StickState {
    pub x: u8,
    pub y: u8,
}

impl StickState {
    pub const CENTER: StickState = StickState { x: 128, y: 128 };
}

impl Default for StickState {
    fn default() -> Self {
        Self::CENTER
    }
}

/// D-pad (hat switch) direction. Raw wire codes 0–7 follow compass order
/// starting at North; any raw value 8–15 means no direction pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DPadDirection {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
    #[default]
    Neutral,
}

impl DPadDirection {
    /// Decode the 4-bit hat field. Values 0..=7 map to compass order; 8..=15
    /// (and anything else the mask can't reach) coerce to `Neutral`.
    pub fn from_raw(raw: u8) -> Self {
        match raw & 0x0F {
            0 => DPadDirection::North,
            1 => DPadDirection::NorthEast,
            2 => DPadDirection::East,
            3 => DPadDirection::SouthEast,
            4 => DPadDirection::South,
            5 => DPadDirection::SouthWest,
            6 => DPadDirection::West,
            7 => DPadDirection::NorthWest,
            _ => DPadDirection::Neutral,
        }
    }
}

/// Digital button state. Bit positions are fixed by the input report layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Buttons {
    pub square: bool,
    pub cross: bool,
    pub circle: bool,
    pub triangle: bool,
    pub l1: bool,
    pub r1: bool,
    pub l2: bool,
    pub r2: bool,
    pub share: bool,
    pub options: bool,
    pub l3: bool,
    pub r3: bool,
    pub ps: bool,
    pub touchpad_click: bool,
}

/// A single capacitive touch contact.
///
/// `active` is the logical negation of wire bit 7 — 0 on the wire means a
/// finger IS touching. When `active` is `false`, `tracking_id`/`x`/`y` still
/// hold whatever the raw bytes decoded to; consumers are expected to ignore
/// them rather than the decoder zeroing them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchFinger {
    pub active: bool,
    pub tracking_id: u8,
    pub x: u16,
    pub y: u16,
}

/// Both touchpad contacts plus the report's packet counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchpadState {
    pub touch0: TouchFinger,
    pub touch1: TouchFinger,
    pub packet_counter: u8,
}

/// Raw, uncalibrated six-axis IMU sample (three gyro, three accel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ImuSample {
    pub gyro_pitch: i16,
    pub gyro_yaw: i16,
    pub gyro_roll: i16,
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,
}

/// Battery level plus the three status flags packed into the same wire byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatteryState {
    /// 4-bit wire value: 0–8 when unwired, 0–11 when cable-connected.
    pub level: u8,
    pub cable_connected: bool,
    pub headphones: bool,
    pub microphone: bool,
}

impl BatteryState {
    /// Battery percentage, clamped to 100, derived from the wire level and
    /// the connection-dependent full-scale value (11 wired, 8 unwired).
    pub fn percentage(&self) -> u8 {
        let full_scale: u32 = if self.cable_connected { 11 } else { 8 };
        let pct = (self.level as u32 * 100) / full_scale;
        pct.min(100) as u8
    }
}

/// A fully decoded input report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputState {
    pub left_stick: StickState,
    pub right_stick: StickState,
    pub dpad: DPadDirection,
    pub buttons: Buttons,
    pub l2_trigger: u8,
    pub r2_trigger: u8,
    pub touchpad: TouchpadState,
    pub imu: ImuSample,
    pub battery: BatteryState,
    pub timestamp: u16,
    /// 6-bit rolling frame counter, `(byte >> 2) & 0x3F`.
    pub frame_counter: u8,
}

/// Desired output state: rumble motors, lightbar RGB, and flash timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OutputState {
    /// Strong / left motor.
    pub rumble_heavy: u8,
    /// Weak / right motor.
    pub rumble_light: u8,
    pub led_red: u8,
    pub led_green: u8,
    pub led_blue: u8,
    /// Flash-on duration, ~10ms units.
    pub flash_on: u8,
    /// Flash-off duration, ~10ms units.
    pub flash_off: u8,
}

/// Factory IMU calibration references read from a feature report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationData {
    pub gyro_pitch_bias: i16,
    pub gyro_yaw_bias: i16,
    pub gyro_roll_bias: i16,
    pub gyro_pitch_plus: i16,
    pub gyro_pitch_minus: i16,
    pub gyro_yaw_plus: i16,
    pub gyro_yaw_minus: i16,
    pub gyro_roll_plus: i16,
    pub gyro_roll_minus: i16,
    pub gyro_speed_plus: i16,
    pub gyro_speed_minus: i16,
    pub accel_x_plus: i16,
    pub accel_x_minus: i16,
    pub accel_y_plus: i16,
    pub accel_y_minus: i16,
    pub accel_z_plus: i16,
    pub accel_z_minus: i16,
}

impl CalibrationData {
    /// `true` iff all six (plus − minus) ranges are nonzero, computed in
    /// 32-bit signed arithmetic to avoid `i16` overflow on extreme references.
    pub fn is_valid(&self) -> bool {
        let ranges = [
            self.gyro_pitch_plus as i32 - self.gyro_pitch_minus as i32,
            self.gyro_yaw_plus as i32 - self.gyro_yaw_minus as i32,
            self.gyro_roll_plus as i32 - self.gyro_roll_minus as i32,
            self.accel_x_plus as i32 - self.accel_x_minus as i32,
            self.accel_y_plus as i32 - self.accel_y_minus as i32,
            self.accel_z_plus as i32 - self.accel_z_minus as i32,
        ];
        ranges.iter().all(|&r| r != 0)
    }
}

/// Which physical transport a report belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Transport {
    Usb,
    Bluetooth,
}

/// Gyro axis selector for [`crate::calibration::calibrate_gyro`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GyroAxis {
    Pitch,
    Yaw,
    Roll,
}

/// Accelerometer axis selector for [`crate::calibration::calibrate_accel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AccelAxis {
    X,
    Y,
    Z,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stick_default_is_center() {
        assert_eq!(StickState::default(), StickState { x: 128, y: 128 });
    }

    #[test]
    fn dpad_raw_coercion() {
        assert_eq!(DPadDirection::from_raw(0), DPadDirection::North);
        assert_eq!(DPadDirection::from_raw(7), DPadDirection::NorthWest);
        for raw in 8..=15u8 {
            assert_eq!(DPadDirection::from_raw(raw), DPadDirection::Neutral);
        }
    }

    #[test]
    fn battery_percentage() {
        let unwired = BatteryState { level: 8, cable_connected: false, ..Default::default() };
        assert_eq!(unwired.percentage(), 100);
        let wired = BatteryState { level: 11, cable_connected: true, ..Default::default() };
        assert_eq!(wired.percentage(), 100);
        let half_wired = BatteryState { level: 5, cable_connected: true, ..Default::default() };
        assert_eq!(half_wired.percentage(), ((5u32 * 100) / 11) as u8);
    }

    #[test]
    fn calibration_validity() {
        let mut cal = CalibrationData {
            gyro_pitch_plus: 100,
            gyro_pitch_minus: -100,
            gyro_yaw_plus: 100,
            gyro_yaw_minus: -100,
            gyro_roll_plus: 100,
            gyro_roll_minus: -100,
            accel_x_plus: 8192,
            accel_x_minus: -8192,
            accel_y_plus: 8192,
            accel_y_minus: -8192,
            accel_z_plus: 8192,
            accel_z_minus: -8192,
            ..Default::default()
        };
        assert!(cal.is_valid());
        cal.accel_z_plus = cal.accel_z_minus;
        assert!(!cal.is_valid());
    }
}
