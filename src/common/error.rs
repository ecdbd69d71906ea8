// src/common/error.rs

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Ze15Error<E = ()>
where
    E: core::fmt::Debug, // Io variant formats E with {:?}
{
    /// Underlying I/O error from the HAL implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// A read was attempted before the warm-up interval elapsed.
    /// The transport was not touched; retry later.
    #[error("Sensor is still warming up")]
    WarmingUp,

    /// No valid reply arrived within the response timeout after a read request.
    #[error("Operation timed out")]
    Timeout,

    /// Checksum in byte 8 does not match the one calculated over bytes 1..=7.
    /// Raised inside the assembler only; such frames are dropped and logged.
    #[error("Checksum mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// A well-formed frame belongs to a different message class than the active mode expects.
    /// Dropped by the driver, never returned from a read.
    #[error("Type mismatch at byte {index}: expected {expected:#04x}, found {found:#04x}")]
    TypeMismatch { index: usize, expected: u8, found: u8 },
}
