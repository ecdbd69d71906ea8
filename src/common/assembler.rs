// src/common/assembler.rs

//! Incremental frame assembly and resynchronization.
//!
//! The ZE15-CO protocol has no length prefix and no end delimiter. A frame is
//! recognised only by its `0xFF` start marker and a valid checksum, so the
//! assembler has to recover on its own from dropped, duplicated or corrupted
//! bytes. Bytes may arrive in any chunking; the emitted frames only depend on
//! the byte sequence, never on how it was split.

use arrayvec::ArrayVec;
use log::{debug, trace, warn};

use super::{
    checksum,
    error::Ze15Error,
    frame::{Mode, RawFrame, FRAME_LEN, START_MARKER},
};

/// Where the assembler is in the byte stream.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum State {
    /// No partial frame; scanning for a start marker.
    Seeking,
    /// A start marker was seen; collecting the rest of the frame.
    Accumulating,
}

/// Running counters, for diagnostics only.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct AssemblerStats {
    /// Frames handed out.
    pub frames: u32,
    /// Nine-byte candidates that failed the checksum.
    pub checksum_errors: u32,
    /// Checksum-valid frames of another message class.
    pub type_mismatches: u32,
    /// Times a later start marker inside a rejected candidate was reused.
    pub resyncs: u32,
    /// Bytes thrown away while looking for a start marker.
    pub skipped_bytes: u32,
}

/// Turns a stream of bytes into checksum-valid 9-byte frames.
#[derive(Debug, Clone)]
pub struct FrameAssembler {
    // Never holds FRAME_LEN bytes between calls to `push`.
    buffer: ArrayVec<u8, FRAME_LEN>,
    expected_type: Option<u8>,
    stats: AssemblerStats,
    debug: bool,
}

impl Default for FrameAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameAssembler {
    /// Creates an assembler that emits every well-formed frame regardless of type.
    pub fn new() -> Self {
        FrameAssembler {
            buffer: ArrayVec::new(),
            expected_type: None,
            stats: AssemblerStats::default(),
            debug: false,
        }
    }

    /// Creates an assembler that only emits frames whose type byte matches `mode`.
    pub fn for_mode(mode: Mode) -> Self {
        FrameAssembler {
            expected_type: Some(mode.expected_type()),
            ..Self::new()
        }
    }

    /// Enables diagnostic logging of raw bytes, checksum outcomes and resync events.
    ///
    /// Only changes what is logged, never which frames are emitted.
    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn state(&self) -> State {
        if self.buffer.is_empty() {
            State::Seeking
        } else {
            State::Accumulating
        }
    }

    pub fn stats(&self) -> &AssemblerStats {
        &self.stats
    }

    /// Drops any partial frame and goes back to seeking.
    pub fn reset(&mut self) {
        if self.debug && !self.buffer.is_empty() {
            debug!("ze15: dropping partial frame {:02X?}", self.buffer.as_slice());
        }
        self.buffer.clear();
    }

    /// Bytes collected toward the next frame.
    pub(crate) fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// Feeds a single byte.
    ///
    /// # Returns
    ///
    /// `Some(frame)` when this byte completes a checksum-valid frame of the
    /// expected type, `None` otherwise.
    pub fn push(&mut self, byte: u8) -> Option<RawFrame> {
        if self.buffer.is_empty() && byte != START_MARKER {
            self.stats.skipped_bytes = self.stats.skipped_bytes.wrapping_add(1);
            if self.debug {
                trace!("ze15: skipping {:#04x} while seeking", byte);
            }
            return None;
        }

        // Length is below FRAME_LEN here, see `extract`.
        self.buffer.push(byte);
        if self.buffer.is_full() {
            self.extract()
        } else {
            None
        }
    }

    /// Feeds a chunk of bytes, yielding each completed frame in order.
    ///
    /// Bytes are consumed lazily; dropping the iterator early leaves the rest
    /// of `bytes` unread.
    pub fn feed<'a, 'b>(&'a mut self, bytes: &'b [u8]) -> Frames<'a, 'b> {
        Frames {
            assembler: self,
            bytes: bytes.iter(),
        }
    }

    fn extract(&mut self) -> Option<RawFrame> {
        let mut bytes = [0u8; FRAME_LEN];
        bytes.copy_from_slice(&self.buffer);

        if self.debug {
            trace!("ze15: candidate frame {:02X?}", bytes);
        }

        if !checksum::verify(&bytes) {
            self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1);
            if self.debug {
                let err: Ze15Error = Ze15Error::ChecksumMismatch {
                    expected: bytes[FRAME_LEN - 1],
                    calculated: checksum::expected(&bytes),
                };
                warn!("ze15: {}, resynchronizing", err);
            }
            self.resync();
            return None;
        }

        if let Some(expected) = self.expected_type {
            if bytes[1] != expected {
                self.stats.type_mismatches = self.stats.type_mismatches.wrapping_add(1);
                if self.debug {
                    let err: Ze15Error = Ze15Error::TypeMismatch { index: 1, expected, found: bytes[1] };
                    warn!("ze15: {}, resynchronizing", err);
                }
                // A misaligned window can pass the checksum by chance; the
                // real frame may start inside it.
                self.resync();
                return None;
            }
        }

        self.buffer.clear();
        self.stats.frames = self.stats.frames.wrapping_add(1);
        Some(RawFrame::from_bytes(bytes))
    }

    /// Drops the failed start marker and restarts from the next `0xFF` in the buffer.
    ///
    /// Index 8 (the checksum slot) is included: a marker there starts a new frame.
    fn resync(&mut self) {
        match self.buffer[1..].iter().position(|b| *b == START_MARKER) {
            Some(offset) => {
                let dropped = offset + 1;
                self.buffer.drain(..dropped);
                self.stats.resyncs = self.stats.resyncs.wrapping_add(1);
                self.stats.skipped_bytes = self.stats.skipped_bytes.wrapping_add(dropped as u32);
                if self.debug {
                    debug!(
                        "ze15: resync dropped {} byte(s), keeping {:02X?}",
                        dropped,
                        self.buffer.as_slice()
                    );
                }
            }
            None => {
                self.stats.skipped_bytes =
                    self.stats.skipped_bytes.wrapping_add(self.buffer.len() as u32);
                if self.debug {
                    debug!("ze15: no start marker in failed frame, seeking");
                }
                self.buffer.clear();
            }
        }
    }
}

/// Iterator returned by [`FrameAssembler::feed`].
pub struct Frames<'a, 'b> {
    assembler: &'a mut FrameAssembler,
    bytes: core::slice::Iter<'b, u8>,
}

impl Iterator for Frames<'_, '_> {
    type Item = RawFrame;

    fn next(&mut self) -> Option<RawFrame> {
        for byte in self.bytes.by_ref() {
            if let Some(frame) = self.assembler.push(*byte) {
                return Some(frame);
            }
        }
        None
    }
}
