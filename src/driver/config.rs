// src/driver/config.rs

use core::time::Duration;

use crate::common::{timing, Mode};

/// Construction parameters for [`Ze15`](super::Ze15).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    /// Transmission mode the sensor has been set to. Fixed for the driver's lifetime.
    pub mode: Mode,
    /// Settling time after construction during which reads are refused.
    pub warmup: Duration,
    /// How long to wait for a reply after a Q&A request. Unused in push mode.
    pub response_timeout: Duration,
    /// Log raw bytes, checksum outcomes and resync events.
    pub debug: bool,
}

impl Config {
    /// Push ("initiative upload") mode, the sensor's factory default.
    pub const fn push() -> Self {
        Config {
            mode: Mode::Push,
            warmup: timing::DEFAULT_WARMUP,
            response_timeout: timing::DEFAULT_RESPONSE_TIMEOUT,
            debug: false,
        }
    }

    /// Request/response ("Q&A") mode.
    pub const fn request_response() -> Self {
        Config {
            mode: Mode::RequestResponse,
            ..Self::push()
        }
    }

    pub const fn with_warmup(self, warmup: Duration) -> Self {
        Config { warmup, ..self }
    }

    pub const fn with_response_timeout(self, response_timeout: Duration) -> Self {
        Config { response_timeout, ..self }
    }

    pub const fn with_debug(self, debug: bool) -> Self {
        Config { debug, ..self }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::push()
    }
}
