// src/driver/sync_driver/io_helpers.rs

use super::{Outbound, Ze15}; // Access Ze15 definition
use crate::common::{
    decode,
    error::Ze15Error,
    hal_traits::{Ze15Serial, Ze15Timer},
    timing, Concentration, Mode, FRAME_LEN,
};
use log::{debug, trace, warn};

/// Upper bound on bytes thrown away by one flush of stale input.
const MAX_DISCARD_PER_FLUSH: usize = 256;

// Implementation block for I/O related helpers
impl<IF> Ze15<IF>
where
    IF: Ze15Serial + Ze15Timer,
{
    /// Reads and drops whatever input is pending, and any partial frame.
    ///
    /// Returns how many bytes were dropped from the transport.
    pub(super) fn discard_input(&mut self) -> Result<usize, Ze15Error<IF::Error>> {
        self.assembler.reset();

        let mut discarded = 0;
        while discarded < MAX_DISCARD_PER_FLUSH {
            match self.interface.read_byte() {
                Ok(_) => discarded += 1,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(Ze15Error::Io(e)),
            }
        }
        Ok(discarded)
    }

    /// Flushes stale input, queues the read request and arms the response timeout.
    pub(super) fn start_request(&mut self, now: IF::Instant) -> Result<(), Ze15Error<IF::Error>> {
        let stale = self.discard_input()?;
        if self.config.debug && stale > 0 {
            debug!("ze15: flushed {} stale byte(s) before request", stale);
        }

        let frame = self.controller.build_request();
        self.outbound = Some(Outbound { frame, sent: 0 });
        self.controller.arm(now);

        if self.config.debug {
            debug!("ze15: sending read request {:02X?}", frame.as_bytes());
        }
        Ok(())
    }

    /// Hands queued request bytes to the transport until it pushes back.
    ///
    /// A full transmit buffer is not an error; the remainder goes out on a later poll.
    pub(super) fn pump_outbound(&mut self) -> Result<(), Ze15Error<IF::Error>> {
        let Some(outbound) = self.outbound.as_mut() else {
            return Ok(());
        };

        while outbound.sent < FRAME_LEN {
            match self.interface.write_byte(outbound.frame.as_bytes()[outbound.sent]) {
                Ok(()) => outbound.sent += 1,
                Err(nb::Error::WouldBlock) => return Ok(()),
                Err(nb::Error::Other(e)) => return Err(Ze15Error::Io(e)),
            }
        }

        match self.interface.flush() {
            Ok(()) | Err(nb::Error::WouldBlock) => {}
            Err(nb::Error::Other(e)) => return Err(Ze15Error::Io(e)),
        }
        self.outbound = None;
        Ok(())
    }

    /// Pulls available bytes through the assembler and decoder.
    ///
    /// Reads at most [`timing::MAX_BYTES_PER_POLL`] bytes. Frames of the wrong
    /// class are dropped here. In push mode every complete frame overrides the
    /// previous one so the freshest reading wins; a request/response cycle ends
    /// at its first valid reply.
    pub(super) fn drain_input(&mut self) -> Result<Option<Concentration>, Ze15Error<IF::Error>> {
        let mode = self.controller.mode();
        let mut latest = None;

        for _ in 0..timing::MAX_BYTES_PER_POLL {
            let byte = match self.interface.read_byte() {
                Ok(byte) => byte,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(Ze15Error::Io(e)),
            };

            let Some(frame) = self.assembler.push(byte) else {
                continue;
            };

            match decode(&frame, mode) {
                Ok(concentration) => {
                    if self.config.debug {
                        trace!("ze15: {:?} -> {} ppm", frame, concentration);
                    }
                    latest = Some(concentration);
                    if mode == Mode::RequestResponse {
                        break;
                    }
                }
                Err(e) => {
                    if self.config.debug {
                        warn!("ze15: {}, dropping {:?}", e, frame);
                    }
                }
            }
        }

        Ok(latest)
    }
}
