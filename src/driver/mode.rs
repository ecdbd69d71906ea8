// src/driver/mode.rs

use core::time::Duration;

use crate::common::{hal_traits::Ze15Instant, Mode, RawFrame};

/// Owns the operating mode and, in request/response mode, the outstanding request.
#[derive(Debug, Clone)]
pub struct ModeController<I> {
    mode: Mode,
    response_timeout: Duration,
    // When the outstanding request was sent; `None` when idle.
    sent_at: Option<I>,
}

impl<I: Ze15Instant> ModeController<I> {
    pub fn new(mode: Mode, response_timeout: Duration) -> Self {
        ModeController {
            mode,
            response_timeout,
            sent_at: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Type byte the assembler should accept.
    pub fn expected_type(&self) -> u8 {
        self.mode.expected_type()
    }

    /// The Q&A read request, `FF 01 86 00 00 00 00 00 79`.
    pub fn build_request(&self) -> RawFrame {
        RawFrame::read_request()
    }

    /// A new request has to go out before the next reply can be expected.
    ///
    /// Always false in push mode.
    pub fn needs_request(&self) -> bool {
        self.mode == Mode::RequestResponse && self.sent_at.is_none()
    }

    /// Starts the response timeout.
    pub fn arm(&mut self, now: I) {
        self.sent_at = Some(now);
    }

    /// Ends the current request cycle (reply received or given up).
    pub fn disarm(&mut self) {
        self.sent_at = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sent_at.is_some()
    }

    /// The outstanding request got no reply within the response timeout.
    pub fn timed_out(&self, now: I) -> bool {
        match self.sent_at {
            Some(sent_at) => now - sent_at >= self.response_timeout,
            None => false,
        }
    }
}
