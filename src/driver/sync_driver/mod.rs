// src/driver/sync_driver/mod.rs

mod io_helpers;
#[cfg(test)]
mod mock;

use crate::common::{
    assembler::{AssemblerStats, FrameAssembler},
    error::Ze15Error,
    hal_traits::{Ze15Serial, Ze15Timer},
    timing, Concentration, Mode, RawFrame,
};
use crate::driver::{config::Config, mode::ModeController, warmup::WarmupGate};
use embedded_hal::delay::DelayNs;
use log::debug;

/// A ZE15-CO sensor on a UART, polled without ever blocking.
///
/// All protocol state (partial frame, outstanding request, warm-up) lives in
/// this value; create one per sensor and keep calling [`Ze15::read`].
pub struct Ze15<IF>
where
    IF: Ze15Serial + Ze15Timer,
{
    interface: IF,
    config: Config,
    assembler: FrameAssembler,
    controller: ModeController<IF::Instant>,
    warmup: WarmupGate<IF::Instant>,
    // Request bytes not yet accepted by the transport.
    outbound: Option<Outbound>,
    // Input that piled up during warm-up has been thrown away.
    input_flushed: bool,
}

#[derive(Debug, Copy, Clone)]
struct Outbound {
    frame: RawFrame,
    sent: usize,
}

impl<IF> Ze15<IF>
where
    IF: Ze15Serial + Ze15Timer,
{
    /// Takes ownership of the interface; the warm-up interval starts now.
    pub fn new(interface: IF, config: Config) -> Self {
        let now = interface.now();
        let mut assembler = FrameAssembler::for_mode(config.mode);
        assembler.set_debug(config.debug);

        Ze15 {
            interface,
            config,
            assembler,
            controller: ModeController::new(config.mode, config.response_timeout),
            warmup: WarmupGate::new(now, config.warmup),
            outbound: None,
            input_flushed: false,
        }
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Frame assembly counters, useful when chasing a noisy line.
    pub fn stats(&self) -> &AssemblerStats {
        self.assembler.stats()
    }

    /// Whether the warm-up interval has elapsed.
    pub fn is_ready(&mut self) -> bool {
        let now = self.interface.now();
        self.warmup.is_ready(now)
    }

    /// Gives back the interface.
    pub fn release(self) -> IF {
        self.interface
    }

    /// Polls for a concentration reading.
    ///
    /// Never waits on the transport. In request/response mode the first poll of
    /// a cycle sends the read request; following polls look for the reply.
    ///
    /// # Returns
    ///
    /// * `Ok(Concentration)`: the most recent valid reading seen in this poll.
    ///   A poll reads at most [`timing::MAX_BYTES_PER_POLL`] bytes, so with a
    ///   larger backlog this is the newest frame within that prefix; later
    ///   polls catch up on the rest.
    /// * `Err(nb::Error::WouldBlock)`: no complete frame yet; poll again.
    /// * `Err(nb::Error::Other(Ze15Error::WarmingUp))`: too early, the transport was not touched.
    /// * `Err(nb::Error::Other(Ze15Error::Timeout))`: the request went unanswered.
    ///   The next poll sends a fresh one.
    /// * `Err(nb::Error::Other(Ze15Error::Io(_)))`: the transport failed.
    pub fn read(&mut self) -> nb::Result<Concentration, Ze15Error<IF::Error>> {
        let now = self.interface.now();
        if !self.warmup.is_ready(now) {
            return Err(nb::Error::Other(Ze15Error::WarmingUp));
        }

        if !self.input_flushed {
            let discarded = self.discard_input()?;
            self.input_flushed = true;
            if self.config.debug {
                debug!(
                    "ze15: warm-up of {:?} complete, discarded {} stale byte(s)",
                    self.config.warmup, discarded
                );
            }
        }

        if self.controller.needs_request() {
            self.start_request(now)?;
        }
        self.pump_outbound()?;

        if let Some(concentration) = self.drain_input()? {
            self.controller.disarm();
            return Ok(concentration);
        }

        if self.controller.timed_out(now) {
            if self.config.debug {
                debug!(
                    "ze15: no reply within {:?}, abandoning request",
                    self.config.response_timeout
                );
            }
            self.controller.disarm();
            self.outbound = None;
            self.assembler.reset();
            return Err(nb::Error::Other(Ze15Error::Timeout));
        }

        Err(nb::Error::WouldBlock)
    }

    /// Polls [`Ze15::read`] until it yields a reading or a definite error.
    ///
    /// Waits through warm-up. In request/response mode the wait is bounded by the
    /// response timeout; in push mode by [`timing::PUSH_RECEIVE_WINDOW`], after
    /// which `Timeout` is returned.
    pub fn read_blocking<D: DelayNs>(
        &mut self,
        delay: &mut D,
    ) -> Result<Concentration, Ze15Error<IF::Error>> {
        let poll_ms = timing::BLOCKING_POLL_INTERVAL.as_millis() as u32;
        let mut deadline: Option<IF::Instant> = None;

        loop {
            match self.read() {
                Ok(concentration) => return Ok(concentration),
                Err(nb::Error::Other(Ze15Error::WarmingUp)) => {}
                Err(nb::Error::Other(e)) => return Err(e),
                Err(nb::Error::WouldBlock) => {
                    if self.controller.mode() == Mode::Push {
                        let now = self.interface.now();
                        match deadline {
                            None => deadline = Some(now + timing::PUSH_RECEIVE_WINDOW),
                            Some(deadline) if now >= deadline => return Err(Ze15Error::Timeout),
                            Some(_) => {}
                        }
                    }
                }
            }
            delay.delay_ms(poll_ms);
        }
    }
}
