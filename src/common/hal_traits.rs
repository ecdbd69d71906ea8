// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A point on a monotonic clock.
///
/// Only differences between instants are ever used, so any epoch works
/// (boot time, a free-running timer, ...).
pub trait Ze15Instant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> Ze15Instant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for the monotonic time source used for warm-up and response timeouts.
pub trait Ze15Timer {
    type Instant: Ze15Instant;

    /// Current time. Must never go backwards.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for non-blocking serial communication with the sensor (9600 baud, 8N1).
pub trait Ze15Serial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Ok(())` if the byte was accepted for transmission, or `Err(nb::Error::WouldBlock)`
    /// if the write buffer is full. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}

/// Bundles an `embedded-hal-nb` UART with a clock so it can drive the sensor.
///
/// Requires the `impl-native` feature.
#[cfg(feature = "impl-native")]
#[derive(Debug)]
pub struct NativeInterface<U, C> {
    uart: U,
    clock: C,
}

#[cfg(feature = "impl-native")]
impl<U, C> NativeInterface<U, C>
where
    U: embedded_hal_nb::serial::Read<u8> + embedded_hal_nb::serial::Write<u8>,
    C: Ze15Timer,
{
    pub fn new(uart: U, clock: C) -> Self {
        NativeInterface { uart, clock }
    }

    /// Gives back the UART and the clock.
    pub fn release(self) -> (U, C) {
        (self.uart, self.clock)
    }
}

#[cfg(feature = "impl-native")]
impl<U, C> Ze15Serial for NativeInterface<U, C>
where
    U: embedded_hal_nb::serial::Read<u8> + embedded_hal_nb::serial::Write<u8>,
{
    type Error = U::Error;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.uart.read()
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.uart.write(byte)
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        self.uart.flush()
    }
}

#[cfg(feature = "impl-native")]
impl<U, C> Ze15Timer for NativeInterface<U, C>
where
    C: Ze15Timer,
{
    type Instant = C::Instant;

    fn now(&self) -> Self::Instant {
        self.clock.now()
    }
}
