//! Trigger sites that arm the engine and drive its timer.
//!
//! [`DebounceTrigger`] binds a [`DebounceGate`] to the [`PeriodicTimer`] that
//! drives the engine. The polling task calls [`DebounceTrigger::poll`], edge
//! interrupts call [`DebounceTrigger::on_interrupt`], and the timer callback
//! calls [`DebounceTrigger::on_timer`].

use crate::config::{DebounceConfig, SamplingMode};
use crate::debouncer::{ButtonSampler, Debouncer, EventHandler, ProcessOutcome};
use crate::gate::DebounceGate;
use crate::timer::{CallContext, PeriodicTimer};
use crate::types::ButtonMask;

/// Result of an attempt to start a burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmOutcome {
    /// The gate was idle and is now armed; the timer was started.
    pub armed: bool,

    /// Starting the timer woke a higher-priority task. An interrupt handler
    /// should request a context switch after its body completes.
    pub yield_requested: bool,
}

impl ArmOutcome {
    const NOT_ARMED: ArmOutcome = ArmOutcome {
        armed: false,
        yield_requested: false,
    };
}

/// Arms a button group's engine and controls its periodic timer.
///
/// Holds shared references only, so the same trigger can be used from the
/// polling task, interrupt handlers and the timer callback.
pub struct DebounceTrigger<'a, T: PeriodicTimer> {
    gate: &'a DebounceGate,
    timer: &'a T,
    mode: SamplingMode,
}

impl<'a, T: PeriodicTimer> DebounceTrigger<'a, T> {
    /// Creates a trigger using the sampling mode from `config`.
    pub fn new(gate: &'a DebounceGate, timer: &'a T, config: &DebounceConfig) -> Self {
        Self {
            gate,
            timer,
            mode: config.sampling,
        }
    }

    /// Starts a burst with `mask` if none is in progress.
    ///
    /// The gate is checked and armed in one critical section; only when that
    /// succeeds is the timer started, with the variant matching `ctx`.
    pub fn start_debounce(&self, mask: ButtonMask, ctx: CallContext) -> ArmOutcome {
        if !self.gate.try_arm(mask) {
            return ArmOutcome::NOT_ARMED;
        }

        let yield_requested = match ctx {
            CallContext::Task => {
                self.timer.start();
                false
            }
            CallContext::Interrupt => self.timer.start_from_isr(),
        };

        ArmOutcome {
            armed: true,
            yield_requested,
        }
    }

    /// Body of the polling task: arms the engine if any button is down.
    ///
    /// Each pressed button is offered in bit order; the first one arms the
    /// gate and the rest are no-ops. Returns true if a burst was started.
    /// Does nothing in [`SamplingMode::Interrupt`].
    pub fn poll<S: ButtonSampler>(&self, sampler: &S) -> bool {
        if self.mode == SamplingMode::Interrupt {
            return false;
        }

        let mut armed = false;
        for bit in sampler.sample().single_bits() {
            armed |= self.start_debounce(bit, CallContext::Task).armed;
        }
        armed
    }

    /// Edge interrupt entry point for the buttons in `mask`.
    ///
    /// Does nothing in [`SamplingMode::Polling`].
    pub fn on_interrupt(&self, mask: ButtonMask) -> ArmOutcome {
        match self.mode {
            SamplingMode::Interrupt => self.start_debounce(mask, CallContext::Interrupt),
            SamplingMode::Polling { .. } => ArmOutcome::NOT_ARMED,
        }
    }

    /// Timer callback body: advances the engine and stops the timer once the
    /// burst is over.
    ///
    /// The timer is stopped before the gate is freed, so an edge that arms
    /// the gate afterwards always finds the timer stopped and restarts it.
    pub fn on_timer<S: ButtonSampler, H: EventHandler>(
        &self,
        debouncer: &mut Debouncer<'_, S, H>,
    ) -> ProcessOutcome {
        let outcome = debouncer.step();
        match outcome {
            ProcessOutcome::Continue => {}
            ProcessOutcome::Stop => {
                self.timer.stop();
                debouncer.release_gate();
            }
            ProcessOutcome::Idle => {
                warn!("debounce timer fired with nothing armed");
                self.timer.stop();
                // Armed between the empty check and the stop.
                if self.gate.is_pending() {
                    self.timer.start();
                }
            }
        }
        outcome
    }

    /// Stops the timer and returns the engine to idle.
    pub fn shutdown<S: ButtonSampler, H: EventHandler>(&self, debouncer: &mut Debouncer<'_, S, H>) {
        self.timer.stop();
        debouncer.reset();
    }

    /// Polling interval for the polling task, if polling is configured.
    pub fn poll_interval_ms(&self) -> Option<u32> {
        match self.mode {
            SamplingMode::Polling { interval_ms } => Some(interval_ms),
            SamplingMode::Interrupt => None,
        }
    }

    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    pub fn gate(&self) -> &'a DebounceGate {
        self.gate
    }
}
