//! Input report decoding: raw HID bytes → [`InputState`].
//!
//! Both transports lay out the same 42-byte controller-state payload after
//! their own header: USB places it at offset 1 (past the 1-byte report ID),
//! Bluetooth at offset 3 (past the 1-byte report ID and 2 transport-flag
//! bytes). The shared parser below takes the buffer plus that data offset
//! and indexes everything relative to it.
//!
//! | offset | field |
//! |---|---|
//! | 0,1 | left stick x, y |
//! | 2,3 | right stick x, y |
//! | 4 | hat (low nibble) + square/cross/circle/triangle (bits 4..7) |
//! | 5 | L1/R1/L2/R2/share/options/L3/R3 |
//! | 6 | ps (bit0) / touchpad click (bit1) / frame counter (bits 2..7) |
//! | 7,8 | l2 analog, r2 analog |
//! | 9,10 | timestamp (u16 LE) |
//! | 11 | temperature — uncalibrated, unexposed (see module docs below) |
//! | 12..18 | gyro pitch/yaw/roll (i16 LE ×3) |
//! | 18..24 | accel x/y/z (i16 LE ×3) |
//! | 29 | battery: level (bits 0..3), cable (bit4), headphones (bit5), mic (bit6) |
//! | 32 | touchpad packet counter |
//! | 33..37 | touch finger 0 |
//! | 37..41 | touch finger 1 |
//!
//! The byte at offset 11 ("temperature") is read by no consumer anywhere in
//! this protocol and has no documented scale; it stays unexposed rather than
//! invent a calibration for it.

use crate::bytes::{read_i16_le, read_u16_le, split_touch_coords};
use crate::crc32;
use crate::model::{
    BatteryState, Buttons, DPadDirection, ImuSample, InputState, StickState, TouchFinger,
    TouchpadState,
};

const USB_REPORT_ID: u8 = 0x01;
const USB_MIN_LEN: usize = 64;
const USB_DATA_OFFSET: usize = 1;

const BT_REPORT_ID: u8 = 0x11;
const BT_MIN_LEN: usize = 78;
const BT_DATA_OFFSET: usize = 3;

/// Errors a decoder entry point can return. Nothing panics; every failure is
/// an explicit discriminated value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("report too short: expected at least {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
    #[error("unexpected report ID: expected 0x{expected:02X}, got 0x{got:02X}")]
    InvalidReportID { expected: u8, got: u8 },
    #[error("Bluetooth CRC-32 mismatch")]
    CrcMismatch,
}

/// Parse a USB input report. Requires `buf.len() >= 64` and `buf[0] == 0x01`.
pub fn decode_usb(buf: &[u8]) -> Result<InputState, DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::InvalidLength { expected: USB_MIN_LEN, got: 0 });
    }
    if buf[0] != USB_REPORT_ID {
        return Err(DecodeError::InvalidReportID { expected: USB_REPORT_ID, got: buf[0] });
    }
    if buf.len() < USB_MIN_LEN {
        return Err(DecodeError::InvalidLength { expected: USB_MIN_LEN, got: buf.len() });
    }
    Ok(parse_payload(buf, USB_DATA_OFFSET))
}

/// Parse a Bluetooth input report. Requires `buf.len() >= 78` and
/// `buf[0] == 0x11`. When `verify_crc` is set, also validates the trailing
/// CRC-32 and signals [`DecodeError::CrcMismatch`] on failure — pass `false`
/// only to replay hand-built frames in tests.
pub fn decode_bt(buf: &[u8], verify_crc: bool) -> Result<InputState, DecodeError> {
    if buf.is_empty() {
        return Err(DecodeError::InvalidLength { expected: BT_MIN_LEN, got: 0 });
    }
    if buf[0] != BT_REPORT_ID {
        return Err(DecodeError::InvalidReportID { expected: BT_REPORT_ID, got: buf[0] });
    }
    if buf.len() < BT_MIN_LEN {
        return Err(DecodeError::InvalidLength { expected: BT_MIN_LEN, got: buf.len() });
    }
    if verify_crc && !crc32::validate_input(buf) {
        return Err(DecodeError::CrcMismatch);
    }
    Ok(parse_payload(buf, BT_DATA_OFFSET))
}

/// Auto-select transport by the leading report-ID byte and dispatch to
/// [`decode_bt`] (with CRC verification) or [`decode_usb`].
///
/// A buffer whose ID byte is recognized but whose length falls short (e.g.
/// the Bluetooth "reduced" 10-byte pre-extended-mode report, ID 0x01) is
/// rejected with [`DecodeError::InvalidLength`] — never partially parsed.
pub fn decode(buf: &[u8]) -> Result<InputState, DecodeError> {
    match buf.first() {
        None => Err(DecodeError::InvalidLength { expected: USB_MIN_LEN, got: 0 }),
        Some(&BT_REPORT_ID) => decode_bt(buf, true),
        Some(&USB_REPORT_ID) => decode_usb(buf),
        Some(&id) => Err(DecodeError::InvalidReportID { expected: USB_REPORT_ID, got: id }),
    }
}

fn parse_payload(buf: &[u8], o: usize) -> InputState {
    let b4 = buf[o + 4];
    let b5 = buf[o + 5];
    let b6 = buf[o + 6];

    InputState {
        left_stick: StickState { x: buf[o], y: buf[o + 1] },
        right_stick: StickState { x: buf[o + 2], y: buf[o + 3] },
        dpad: DPadDirection::from_raw(b4),
        buttons: Buttons {
            square: b4 & 0x10 != 0,
            cross: b4 & 0x20 != 0,
            circle: b4 & 0x40 != 0,
            triangle: b4 & 0x80 != 0,
            l1: b5 & 0x01 != 0,
            r1: b5 & 0x02 != 0,
            l2: b5 & 0x04 != 0,
            r2: b5 & 0x08 != 0,
            share: b5 & 0x10 != 0,
            options: b5 & 0x20 != 0,
            l3: b5 & 0x40 != 0,
            r3: b5 & 0x80 != 0,
            ps: b6 & 0x01 != 0,
            touchpad_click: b6 & 0x02 != 0,
        },
        l2_trigger: buf[o + 7],
        r2_trigger: buf[o + 8],
        touchpad: TouchpadState {
            touch0: parse_touch_finger(buf, o + 33),
            touch1: parse_touch_finger(buf, o + 37),
            packet_counter: buf[o + 32],
        },
        imu: ImuSample {
            gyro_pitch: read_i16_le(buf, o + 12),
            gyro_yaw: read_i16_le(buf, o + 14),
            gyro_roll: read_i16_le(buf, o + 16),
            accel_x: read_i16_le(buf, o + 18),
            accel_y: read_i16_le(buf, o + 20),
            accel_z: read_i16_le(buf, o + 22),
        },
        battery: BatteryState {
            level: buf[o + 29] & 0x0F,
            cable_connected: buf[o + 29] & 0x10 != 0,
            headphones: buf[o + 29] & 0x20 != 0,
            microphone: buf[o + 29] & 0x40 != 0,
        },
        timestamp: read_u16_le(buf, o + 9),
        frame_counter: (b6 >> 2) & 0x3F,
    }
}

/// Decode one four-byte touch-finger group at `base`.
///
/// `active` is the logical negation of wire bit 7 of the first byte — 0
/// means the finger IS touching.
fn parse_touch_finger(buf: &[u8], base: usize) -> TouchFinger {
    let b0 = buf[base];
    let (x, y) = split_touch_coords(buf[base + 1], buf[base + 2], buf[base + 3]);
    TouchFinger {
        active: b0 & 0x80 == 0,
        tracking_id: b0 & 0x7F,
        x,
        y,
    }
}
