// src/common/timing.rs

use core::time::Duration;

// The UART itself (9600 baud, 8N1) is configured by the caller.

// === Sensor behaviour ===

/// Upload period in push mode.
pub const PUSH_INTERVAL: Duration = Duration::from_secs(1);
/// Default settling time after power-up before readings are trusted.
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(10);
/// Default bound on the wait for a Q&A reply.
pub const DEFAULT_RESPONSE_TIMEOUT: Duration = Duration::from_secs(1);

// === Driver ===

/// Upper bound on bytes pulled from the transport in a single poll, so a
/// chattering line cannot keep `read` busy forever. Several frames' worth.
pub const MAX_BYTES_PER_POLL: usize = 64;
/// Pause between polls in the blocking helper.
pub const BLOCKING_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// How long the blocking helper waits for an upload in push mode.
/// Three periods tolerate one lost and one corrupted frame.
pub const PUSH_RECEIVE_WINDOW: Duration = PUSH_INTERVAL.saturating_mul(3);
