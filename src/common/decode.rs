// src/common/decode.rs

//! Field layout of a validated frame.
//!
//! The decoder is pure arithmetic over the layout of the active mode. It assumes
//! the start marker and checksum were already checked by the assembler.

use super::{
    error::Ze15Error,
    frame::{Mode, RawFrame, CMD_READ_CONCENTRATION, PUSH_DECIMALS, PUSH_GAS_TYPE, PUSH_UNIT_PPM},
    types::Concentration,
};

/// Extracts the CO concentration from a well-formed frame.
///
/// # Arguments
///
/// * `frame`: A frame that already passed start marker and checksum validation.
/// * `mode`: The mode the sensor runs in; selects the byte layout.
///
/// # Returns
///
/// * `Ok(Concentration)` for a frame of the active mode's message class.
/// * `Err(Ze15Error::TypeMismatch)` if byte 1 does not match the mode, or for
///   uploads if the unit (byte 2) or decimal places (byte 3) differ from the
///   one-decimal ppm format. Callers drop such frames.
pub fn decode(frame: &RawFrame, mode: Mode) -> Result<Concentration, Ze15Error> {
    let bytes = frame.as_bytes();
    match mode {
        Mode::Push => {
            // FF 04 03 01 HB LB 13 88 CHK
            expect_byte(bytes, 1, PUSH_GAS_TYPE)?;
            expect_byte(bytes, 2, PUSH_UNIT_PPM)?;
            expect_byte(bytes, 3, PUSH_DECIMALS)?;
            Ok(Concentration::from_be_bytes(bytes[4], bytes[5]))
        }
        Mode::RequestResponse => {
            // FF 86 HB LB 00 00 00 00 CHK
            expect_byte(bytes, 1, CMD_READ_CONCENTRATION)?;
            Ok(Concentration::from_be_bytes(bytes[2], bytes[3]))
        }
    }
}

fn expect_byte(bytes: &[u8], index: usize, expected: u8) -> Result<(), Ze15Error> {
    let found = bytes[index];
    if found == expected {
        Ok(())
    } else {
        Err(Ze15Error::TypeMismatch { index, expected, found })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::checksum;

    fn sealed(payload: [u8; 7]) -> RawFrame {
        RawFrame::with_payload(payload)
    }

    #[test]
    fn test_push_frame_30_ppm() {
        let frame = RawFrame::from_bytes([0xFF, 0x04, 0x03, 0x01, 0x01, 0x2C, 0x13, 0x88, 0x30]);
        assert!(checksum::verify(frame.as_bytes()));
        let c = decode(&frame, Mode::Push).unwrap();
        assert_eq!(c.tenths(), 300);
        assert_eq!(format!("{}", c), "30.0");
    }

    #[test]
    fn test_push_ignores_full_range_bytes() {
        let frame = sealed([0x04, 0x03, 0x01, 0x00, 0x0A, 0x27, 0x10]);
        assert_eq!(decode(&frame, Mode::Push).unwrap().tenths(), 10);
    }

    #[test]
    fn test_response_frame() {
        // 0x0064 = 100 -> 10.0 ppm
        let frame = sealed([0x86, 0x00, 0x64, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(decode(&frame, Mode::RequestResponse).unwrap().tenths(), 100);
    }

    #[test]
    fn test_response_max_value() {
        let frame = sealed([0x86, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(decode(&frame, Mode::RequestResponse).unwrap().tenths(), u16::MAX);
    }

    #[test]
    fn test_push_frame_in_request_mode_is_type_mismatch() {
        let frame = sealed([0x04, 0x03, 0x01, 0x01, 0x2C, 0x13, 0x88]);
        assert_eq!(
            decode(&frame, Mode::RequestResponse),
            Err(Ze15Error::TypeMismatch { index: 1, expected: 0x86, found: 0x04 })
        );
    }

    #[test]
    fn test_response_frame_in_push_mode_is_type_mismatch() {
        let frame = sealed([0x86, 0x01, 0x2C, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(
            decode(&frame, Mode::Push),
            Err(Ze15Error::TypeMismatch { index: 1, expected: 0x04, found: 0x86 })
        );
    }

    #[test]
    fn test_push_wrong_unit_is_type_mismatch() {
        let frame = sealed([0x04, 0x02, 0x01, 0x01, 0x2C, 0x13, 0x88]);
        assert_eq!(
            decode(&frame, Mode::Push),
            Err(Ze15Error::TypeMismatch { index: 2, expected: 0x03, found: 0x02 })
        );
    }

    #[test]
    fn test_push_other_decimals_is_type_mismatch() {
        // Two decimal places would make the raw value hundredths, not tenths
        let frame = sealed([0x04, 0x03, 0x02, 0x01, 0x2C, 0x13, 0x88]);
        assert_eq!(
            decode(&frame, Mode::Push),
            Err(Ze15Error::TypeMismatch { index: 3, expected: 0x01, found: 0x02 })
        );
    }

    #[test]
    fn test_decode_does_not_check_checksum() {
        let frame = RawFrame::from_bytes([0xFF, 0x86, 0x00, 0x10, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert!(!frame.is_well_formed());
        assert_eq!(decode(&frame, Mode::RequestResponse).unwrap().tenths(), 16);
    }
}
