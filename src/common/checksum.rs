// src/common/checksum.rs

use super::frame::FRAME_LEN;

/// Index of the checksum byte within a frame.
pub const CHECKSUM_INDEX: usize = FRAME_LEN - 1;

/// Calculates the ZE15-CO checksum for the given payload region.
///
/// The checksum covers bytes 1 through 7 of a frame, i.e. everything between
/// the start marker and the checksum byte itself. The bytes are summed modulo
/// 256 and the result is negated in two's complement, which is the same as
/// the datasheet's `(0xFF - sum) + 1`.
///
/// # Arguments
///
/// * `payload`: The frame bytes `1..8` (command/type byte through the last payload byte).
///
/// # Returns
///
/// The checksum byte to place at index 8.
#[inline]
pub fn compute(payload: &[u8]) -> u8 {
    let sum = payload.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    0u8.wrapping_sub(sum)
}

/// Recomputes the checksum over bytes 1..=7 and compares it to byte 8.
///
/// Exact comparison, no tolerance. The start marker is not inspected here.
#[inline]
pub fn verify(frame: &[u8; FRAME_LEN]) -> bool {
    compute(&frame[1..CHECKSUM_INDEX]) == frame[CHECKSUM_INDEX]
}

/// Returns the checksum a frame *should* carry, for diagnostics.
#[inline]
pub fn expected(frame: &[u8; FRAME_LEN]) -> u8 {
    compute(&frame[1..CHECKSUM_INDEX])
}

/// Writes the computed checksum into byte 8 of a frame under construction.
pub fn seal(frame: &mut [u8; FRAME_LEN]) {
    frame[CHECKSUM_INDEX] = expected(frame);
}
