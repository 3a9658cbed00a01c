//! CRC-32 engine for Bluetooth HID report integrity.
//!
//! DS4 Bluetooth input and output reports carry a trailing CRC-32 computed
//! over the report with a single protocol-specific seed byte: 0xA1 for
//! host-bound (input) reports, 0xA2 for controller-bound (output) reports.
//! The variant is the familiar reflected one (PKZIP / Ethernet / POSIX
//! cksum-32): polynomial 0x04C11DB7 (reflected 0xEDB88320), init and final
//! XOR both 0xFFFF_FFFF.

/// CRC-32 seed byte for input (controller → host) Bluetooth reports.
pub const SEED_INPUT: u8 = 0xA1;
/// CRC-32 seed byte for output (host → controller) Bluetooth reports.
pub const SEED_OUTPUT: u8 = 0xA2;

const CRC32_TABLE: [u32; 256] = {
    let mut table = [0u32; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB8_8320;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
};

/// Compute the plain CRC-32 of `data`, with no seed byte prepended.
///
/// `compute(b"123456789") == 0xCBF4_3926` (the standard CRC-32 test vector);
/// `compute(&[]) == 0`.
pub fn compute(data: &[u8]) -> u32 {
    feed(0xFFFF_FFFF, data)
}

/// Compute the CRC-32 of `data` with `seed` fed into the rolling register
/// first, as if it were the first byte of the input. Equivalent to, but
/// avoids allocating, `compute(&[seed] ++ data)`.
pub fn compute_seeded(seed: u8, data: &[u8]) -> u32 {
    let crc = feed_byte(0xFFFF_FFFF, seed);
    feed_all(crc, data) ^ 0xFFFF_FFFF
}

#[inline]
fn feed_byte(crc: u32, byte: u8) -> u32 {
    (crc >> 8) ^ CRC32_TABLE[((crc as u8) ^ byte) as usize]
}

fn feed_all(mut crc: u32, data: &[u8]) -> u32 {
    for &b in data {
        crc = feed_byte(crc, b);
    }
    crc
}

fn feed(crc: u32, data: &[u8]) -> u32 {
    feed_all(crc, data) ^ 0xFFFF_FFFF
}

/// Validate a Bluetooth *input* frame: `frame.len() >= 78` and the CRC-32
/// over `[SEED_INPUT] ++ frame[0..74]` matches the little-endian word at
/// `frame[74..78]`. Returns `false` on any length shortfall; never panics.
pub fn validate_input(frame: &[u8]) -> bool {
    validate(SEED_INPUT, frame)
}

/// Validate a Bluetooth *output* frame, mirroring [`validate_input`] with
/// the output seed byte.
pub fn validate_output(frame: &[u8]) -> bool {
    validate(SEED_OUTPUT, frame)
}

fn validate(seed: u8, frame: &[u8]) -> bool {
    const MIN_LEN: usize = 78;
    if frame.len() < MIN_LEN {
        return false;
    }
    let payload = &frame[..MIN_LEN - 4];
    let tail = &frame[MIN_LEN - 4..MIN_LEN];
    let expected = u32::from_le_bytes([tail[0], tail[1], tail[2], tail[3]]);
    compute_seeded(seed, payload) == expected
}

/// Overwrite `frame[74..78]` with the little-endian CRC-32 of
/// `[SEED_OUTPUT] ++ frame[0..74]`.
///
/// Panics if `frame.len() < 78` — callers build fixed-size 78-byte output
/// buffers (see [`crate::output::build_bt`]), so a short buffer here is a
/// programmer error, not a recoverable runtime condition.
pub fn append_output_crc(frame: &mut [u8]) {
    assert!(frame.len() >= 78, "output frame too short for CRC stamp");
    let crc = compute_seeded(SEED_OUTPUT, &frame[..74]);
    frame[74..78].copy_from_slice(&crc.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_test_vector() {
        assert_eq!(compute(b"123456789"), 0xCBF4_3926);
        assert_eq!(compute(&[]), 0);
        assert_eq!(compute(&[0x00]), 0xD202_EF8D);
    }

    #[test]
    fn seeded_equals_prepend() {
        let data = b"hello world";
        let mut prefixed = vec![SEED_INPUT];
        prefixed.extend_from_slice(data);
        assert_eq!(compute_seeded(SEED_INPUT, data), compute(&prefixed));
    }

    #[test]
    fn stamp_and_validate_round_trip() {
        let mut frame = [0u8; 78];
        frame[0] = 0x11;
        frame[5] = 0xAB;
        append_output_crc(&mut frame);
        assert!(validate_output(&frame));
        assert!(!validate_input(&frame)); // wrong seed
    }

    #[test]
    fn validate_rejects_short_frames() {
        assert!(!validate_input(&[0u8; 77]));
        assert!(!validate_output(&[]));
    }

    #[test]
    fn tamper_detection_single_bit_flips() {
        let mut frame = [0u8; 78];
        for (i, b) in frame.iter_mut().enumerate() {
            *b = (i * 7 + 3) as u8;
        }
        append_output_crc(&mut frame);
        assert!(validate_output(&frame));

        for bit_index in 0..78 * 8 {
            let byte = bit_index / 8;
            let bit = bit_index % 8;
            let mut tampered = frame;
            tampered[byte] ^= 1 << bit;
            assert!(
                !validate_output(&tampered),
                "bit {bit} of byte {byte} flip went undetected"
            );
        }
    }
}
