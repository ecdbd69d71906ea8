// src/common/types.rs

use core::fmt;

// --- CO concentration ---

/// A CO concentration in parts per million with 0.1 ppm resolution.
///
/// Stored the way the sensor sends it: a 16-bit count of tenths of a ppm.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Concentration(u16);

impl Concentration {
    pub const ZERO: Concentration = Concentration(0);

    /// Creates a concentration from a raw count of 0.1 ppm steps.
    pub const fn from_tenths(tenths: u16) -> Self {
        Self(tenths)
    }

    /// Creates a concentration from the big-endian high/low byte pair of a frame.
    pub const fn from_be_bytes(high: u8, low: u8) -> Self {
        Self(u16::from_be_bytes([high, low]))
    }

    /// Raw count of 0.1 ppm steps.
    pub const fn tenths(&self) -> u16 {
        self.0
    }

    /// The concentration in ppm.
    pub fn ppm(&self) -> f32 {
        self.0 as f32 * 0.1
    }
}

impl fmt::Display for Concentration {
    /// Formats as `30.0`, without going through floating point.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}
