//! Host-side codec for the DualShock 4 HID protocol.
//!
//! This crate speaks the wire format only — input-report decoding (USB and
//! Bluetooth), output-report encoding, the CRC-32 used on Bluetooth frames,
//! and IMU calibration-report parsing plus the calibration math. It does not
//! discover devices, open HID handles, or manage reconnection; those are a
//! transport's job, built on top of the types and functions here.
//!
//! Every operation is a pure function over byte buffers and value types: no
//! locks, no I/O, no async, safe to call from any thread as long as callers
//! do not share a mutable output buffer across calls.

pub mod bytes;
pub mod calibration;
pub mod crc32;
pub mod input;
pub mod model;
pub mod output;

pub use calibration::CalibrationError;
pub use input::DecodeError;
pub use model::{
    AccelAxis, BatteryState, Buttons, CalibrationData, DPadDirection, GyroAxis, ImuSample,
    InputState, OutputState, StickState, Transport, TouchFinger, TouchpadState,
};
