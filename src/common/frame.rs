// src/common/frame.rs

use core::fmt;

use super::{checksum, types::Concentration};

/// Every ZE15-CO frame, in either direction, is exactly this long.
pub const FRAME_LEN: usize = 9;

/// Byte 0 of every frame.
pub const START_MARKER: u8 = 0xFF;

// --- Push ("initiative upload") layout ---

/// Gas type identifier for CO in an uploaded frame (byte 1).
pub const PUSH_GAS_TYPE: u8 = 0x04;
/// Unit identifier for ppm in an uploaded frame (byte 2).
pub const PUSH_UNIT_PPM: u8 = 0x03;
/// Number of decimal places reported by the stock sensor (byte 3).
pub const PUSH_DECIMALS: u8 = 0x01;

// --- Request/response ("Q&A") layout ---

/// Sensor number addressed by the read request (byte 1).
pub const REQUEST_SENSOR_NUMBER: u8 = 0x01;
/// Read gas concentration command, echoed back in byte 1 of the reply.
pub const CMD_READ_CONCENTRATION: u8 = 0x86;

/// Transmission mode the sensor has been configured for.
///
/// The mode is fixed at construction; the sensor never mixes both.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Mode {
    /// The sensor uploads one frame per second on its own.
    Push,
    /// The host sends a read request and the sensor answers with one frame.
    RequestResponse,
}

impl Mode {
    /// The byte 1 value of frames that belong to this mode.
    pub const fn expected_type(self) -> u8 {
        match self {
            Mode::Push => PUSH_GAS_TYPE,
            Mode::RequestResponse => CMD_READ_CONCENTRATION,
        }
    }
}

/// A 9-byte frame as it appears on the wire.
///
/// Holding a `RawFrame` says nothing about validity; the assembler only hands
/// out frames whose start marker and checksum were checked.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    /// Wraps raw bytes without any validation.
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        RawFrame(bytes)
    }

    /// Builds a frame from bytes 1..=7 and fills in the start marker and checksum.
    pub fn with_payload(payload: [u8; FRAME_LEN - 2]) -> Self {
        let mut bytes = [0u8; FRAME_LEN];
        bytes[0] = START_MARKER;
        bytes[1..FRAME_LEN - 1].copy_from_slice(&payload);
        checksum::seal(&mut bytes);
        RawFrame(bytes)
    }

    /// The fixed Q&A read request: `FF 01 86 00 00 00 00 00 79`.
    pub fn read_request() -> Self {
        Self::with_payload([REQUEST_SENSOR_NUMBER, CMD_READ_CONCENTRATION, 0, 0, 0, 0, 0])
    }

    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Type/command byte (byte 1).
    pub fn kind(&self) -> u8 {
        self.0[1]
    }

    /// Start marker present and checksum matches.
    pub fn is_well_formed(&self) -> bool {
        self.0[0] == START_MARKER && checksum::verify(&self.0)
    }

    /// Full-scale range carried in bytes 6–7 of an uploaded frame.
    ///
    /// Only meaningful for push frames; the stock sensor reports 500.0 ppm.
    pub fn full_range(&self) -> Concentration {
        Concentration::from_tenths(u16::from_be_bytes([self.0[6], self.0[7]]))
    }
}

impl From<[u8; FRAME_LEN]> for RawFrame {
    fn from(bytes: [u8; FRAME_LEN]) -> Self {
        RawFrame(bytes)
    }
}

impl fmt::Debug for RawFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RawFrame({:02X?})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_request_bytes() {
        let request = RawFrame::read_request();
        assert_eq!(
            request.as_bytes(),
            &[0xFF, 0x01, 0x86, 0x00, 0x00, 0x00, 0x00, 0x00, 0x79]
        );
        assert!(request.is_well_formed());
    }

    #[test]
    fn test_expected_type_per_mode() {
        assert_eq!(Mode::Push.expected_type(), 0x04);
        assert_eq!(Mode::RequestResponse.expected_type(), 0x86);
    }

    #[test]
    fn test_full_range_of_stock_upload() {
        let frame = RawFrame::from_bytes([0xFF, 0x04, 0x03, 0x01, 0x00, 0x00, 0x13, 0x88, 0x5D]);
        assert_eq!(frame.full_range().tenths(), 5000);
        assert!(frame.is_well_formed());
    }

    #[test]
    fn test_is_well_formed_requires_start_marker() {
        let mut bytes = *RawFrame::read_request().as_bytes();
        bytes[0] = 0xFE;
        assert!(!RawFrame::from(bytes).is_well_formed());
    }
}
