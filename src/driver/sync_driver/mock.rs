// src/driver/sync_driver/mock.rs

// Test doubles shared by the facade and I/O helper tests.

use crate::common::hal_traits::{Ze15Serial, Ze15Timer};
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use heapless::{Deque, Vec as HVec};
use std::{cell::Cell, rc::Rc};

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(u64);
impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}
impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Clock (shared between interface and delay) ---
#[derive(Debug, Clone, Default)]
pub struct MockClock(Rc<Cell<u64>>);
impl MockClock {
    pub fn advance(&self, by: Duration) {
        self.0.set(self.0.get().saturating_add(by.as_micros() as u64));
    }
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.0.get())
    }
}

// --- Mock Delay ---
pub struct MockDelay(pub MockClock);
impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.advance(Duration::from_nanos(ns as u64));
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MockCommError;

// --- Mock Interface ---
pub struct MockInterface {
    clock: MockClock,
    rx: Deque<u8, 512>,
    // Bytes that arrive once the clock reaches the given time (µs).
    scheduled: std::vec::Vec<(u64, std::vec::Vec<u8>)>,
    pub tx_log: HVec<u8, 64>,
    /// Bytes the transmitter accepts before reporting WouldBlock.
    pub tx_room: usize,
    pub fail_reads: bool,
    pub fail_writes: bool,
    pub read_calls: u32,
    pub write_calls: u32,
}

impl MockInterface {
    pub fn new(clock: MockClock) -> Self {
        MockInterface {
            clock,
            rx: Deque::new(),
            scheduled: std::vec::Vec::new(),
            tx_log: HVec::new(),
            tx_room: usize::MAX,
            fail_reads: false,
            fail_writes: false,
            read_calls: 0,
            write_calls: 0,
        }
    }

    /// Makes bytes available right away.
    pub fn stage(&mut self, data: &[u8]) {
        for byte in data {
            self.rx.push_back(*byte).expect("mock rx queue full");
        }
    }

    /// Makes bytes available once the clock reaches `at`.
    pub fn schedule(&mut self, at: Duration, data: &[u8]) {
        self.scheduled.push((at.as_micros() as u64, data.to_vec()));
    }

    pub fn rx_len(&self) -> usize {
        self.rx.len()
    }

    fn deliver_due(&mut self) {
        let now = self.clock.elapsed().as_micros() as u64;
        let mut due = std::vec::Vec::new();
        self.scheduled.retain(|(at, data)| {
            if *at <= now {
                due.push(data.clone());
                false
            } else {
                true
            }
        });
        for data in due {
            self.stage(&data);
        }
    }
}

impl Ze15Timer for MockInterface {
    type Instant = MockInstant;
    fn now(&self) -> Self::Instant {
        MockInstant(self.clock.elapsed().as_micros() as u64)
    }
}

impl Ze15Serial for MockInterface {
    type Error = MockCommError;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        self.read_calls += 1;
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        self.deliver_due();
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        self.write_calls += 1;
        if self.fail_writes {
            return Err(nb::Error::Other(MockCommError));
        }
        if self.tx_room == 0 {
            return Err(nb::Error::WouldBlock);
        }
        self.tx_room -= 1;
        self.tx_log.push(byte).map_err(|_| nb::Error::Other(MockCommError))
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        Ok(())
    }
}
