//! Output report building: [`OutputState`] → raw HID bytes.
//!
//! USB layout (32 bytes):
//!
//! | offset | value |
//! |---|---|
//! | 0 | 0x05 (report ID) |
//! | 1 | 0x07 (rumble \| lightbar \| flash) |
//! | 2 | 0x04 (fixed secondary flags) |
//! | 4 | rumble_light — weak/right motor |
//! | 5 | rumble_heavy — strong/left motor |
//! | 6,7,8 | led red, green, blue |
//! | 9,10 | flash_on, flash_off |
//!
//! Bluetooth layout (78 bytes), same field order shifted by +2 plus a
//! trailing CRC-32:
//!
//! | offset | value |
//! |---|---|
//! | 0 | 0x11 |
//! | 1 | 0xC0 (EnableHID \| EnableCRC) |
//! | 3 | 0x07 |
//! | 4 | 0x04 |
//! | 6 | rumble_light |
//! | 7 | rumble_heavy |
//! | 8,9,10 | led red, green, blue |
//! | 11,12 | flash_on, flash_off |
//! | 74..78 | CRC-32 (seed 0xA2), little-endian |
//!
//! Motor ordering is the classic source of bugs here: the byte that appears
//! *first* in the payload is the weak/right (light) motor, the one that
//! appears *second* is the strong/left (heavy) motor. Go by wire order, not
//! by the field names.

use crate::crc32;
use crate::model::OutputState;

/// Build a 32-byte USB output report.
pub fn build_usb(state: &OutputState) -> [u8; 32] {
    let mut buf = [0u8; 32];
    buf[0] = 0x05;
    buf[1] = 0x07;
    buf[2] = 0x04;
    buf[4] = state.rumble_light;
    buf[5] = state.rumble_heavy;
    buf[6] = state.led_red;
    buf[7] = state.led_green;
    buf[8] = state.led_blue;
    buf[9] = state.flash_on;
    buf[10] = state.flash_off;
    buf
}

/// Build a 78-byte Bluetooth output report, CRC-32 stamped.
pub fn build_bt(state: &OutputState) -> [u8; 78] {
    let mut buf = [0u8; 78];
    buf[0] = 0x11;
    buf[1] = 0xC0;
    buf[2] = 0x00;
    buf[3] = 0x07;
    buf[4] = 0x04;
    buf[6] = state.rumble_light;
    buf[7] = state.rumble_heavy;
    buf[8] = state.led_red;
    buf[9] = state.led_green;
    buf[10] = state.led_blue;
    buf[11] = state.flash_on;
    buf[12] = state.flash_off;
    crc32::append_output_crc(&mut buf);
    buf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s5_usb_byte_layout() {
        let state = OutputState { led_red: 255, led_green: 0, led_blue: 128, rumble_heavy: 128, ..Default::default() };
        let buf = build_usb(&state);
        let mut expected = [0u8; 32];
        expected[0] = 0x05;
        expected[1] = 0x07;
        expected[2] = 0x04;
        expected[5] = 128;
        expected[6] = 255;
        expected[8] = 128;
        assert_eq!(buf, expected);
    }

    #[test]
    fn motor_ordering() {
        let state = OutputState { rumble_heavy: 200, rumble_light: 50, ..Default::default() };
        let usb = build_usb(&state);
        assert_eq!(usb[4], 50);
        assert_eq!(usb[5], 200);
        let bt = build_bt(&state);
        assert_eq!(bt[6], 50);
        assert_eq!(bt[7], 200);
    }

    #[test]
    fn s6_bt_crc_round_trip_and_tamper() {
        let state = OutputState { led_red: 255, ..Default::default() };
        let mut buf = build_bt(&state);
        assert!(crc32::validate_output(&buf));
        buf[8] = 254; // tamper the red channel
        assert!(!crc32::validate_output(&buf));
    }

    #[test]
    fn build_bt_round_trips_for_arbitrary_states() {
        for heavy in [0u8, 1, 128, 255] {
            for light in [0u8, 77, 255] {
                let state = OutputState { rumble_heavy: heavy, rumble_light: light, ..Default::default() };
                assert!(crc32::validate_output(&build_bt(&state)));
            }
        }
    }

    #[test]
    fn report_sizes_and_ids() {
        let state = OutputState::default();
        let usb = build_usb(&state);
        assert_eq!(usb.len(), 32);
        assert_eq!(usb[0], 0x05);
        let bt = build_bt(&state);
        assert_eq!(bt.len(), 78);
        assert_eq!(bt[0], 0x11);
    }
}
