//! Button debounce engine with press, repeat and long-press classification.
//!
//! Provides [`Debouncer`], which turns a raw, possibly bouncing button mask
//! into a clean stream of [`ButtonEvent`]s, and the two capability traits it
//! is built from: [`ButtonSampler`] for reading the input and
//! [`EventHandler`] for consuming events.

use crate::config::DebounceConfig;
use crate::gate::DebounceGate;
use crate::types::{ButtonEvent, ButtonMask, EventKind};

/// Trait for reading the raw button state.
///
/// Called from both task and timer context; implementations must be a cheap,
/// non-blocking read of the current pin state.
pub trait ButtonSampler {
    /// Returns the currently active buttons.
    fn sample(&self) -> ButtonMask;
}

impl<F> ButtonSampler for F
where
    F: Fn() -> ButtonMask,
{
    fn sample(&self) -> ButtonMask {
        self()
    }
}

/// Trait for consuming debounced events.
///
/// Invoked synchronously from whatever context drives
/// [`Debouncer::process`], usually a timer service. Implementations must not
/// block; slow work belongs in the consumer's own task.
pub trait EventHandler {
    /// Handles one event.
    fn on_event(&mut self, event: ButtonEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(EventKind, ButtonMask),
{
    fn on_event(&mut self, event: ButtonEvent) {
        self(event.kind, event.buttons)
    }
}

/// The current state of a debounce engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DebounceState {
    /// No activity. The next burst may start.
    Idle,
    /// Initiating mask captured. Transient: left within the same call.
    Start,
    /// Waiting for the mask to stay unchanged for the debounce time.
    Debouncing,
    /// Press reported, waiting for the first repeat or the long press.
    StablePressed,
    /// Repeats are being reported.
    StablePressedRepeat,
    /// Long press reported, waiting for the first long repeat.
    LongPressed,
    /// Long repeats are being reported.
    LongPressedRepeat,
    /// Burst finished. Transient: the engine returns to `Idle` in the same call.
    End,
}

impl DebounceState {
    /// Returns true for the states in which a press has been reported.
    pub fn is_pressed(&self) -> bool {
        matches!(
            self,
            DebounceState::StablePressed
                | DebounceState::StablePressedRepeat
                | DebounceState::LongPressed
                | DebounceState::LongPressedRepeat
        )
    }

    fn is_long(&self) -> bool {
        matches!(
            self,
            DebounceState::LongPressed | DebounceState::LongPressedRepeat
        )
    }
}

/// What the driving timer should do after a [`Debouncer::process`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProcessOutcome {
    /// Nothing armed. The timer should not be running.
    Idle,
    /// Burst in progress. Keep ticking.
    Continue,
    /// Burst finished. Stop the timer.
    Stop,
}

/// Converts a raw button mask into debounced events for one button group.
///
/// Each engine owns its state and capabilities; create one per independent
/// button group. All buttons of a group travel through a burst as one
/// combined mask. Use one engine per button when presses must be classified
/// independently.
///
/// [`process`](Self::process) must run from a single context (the periodic
/// timer callback). Bursts are started either with [`start`](Self::start)
/// from that same context, or by arming the shared [`DebounceGate`] from any
/// task or interrupt, in which case the next `process` call picks the burst
/// up.
///
/// # Type Parameters
/// * `'g` - Lifetime of the gate reference
/// * `S` - Sampler implementation type
/// * `H` - Event handler implementation type
pub struct Debouncer<'g, S: ButtonSampler, H: EventHandler> {
    config: DebounceConfig,
    gate: &'g DebounceGate,
    sampler: S,
    handler: H,
    state: DebounceState,
    scan_value: ButtonMask,
    elapsed_ms: u32,
    held_ms: u32,
    pressed_reported: bool,
}

impl<'g, S: ButtonSampler, H: EventHandler> Debouncer<'g, S, H> {
    /// Creates an idle engine.
    ///
    /// `config` is expected to pass [`DebounceConfig::validate`]; build the
    /// driving timer with [`create_timer`](crate::create_timer) to have it
    /// checked. A zero timer period never advances the windows, so the burst
    /// would never end.
    pub fn new(config: DebounceConfig, gate: &'g DebounceGate, sampler: S, handler: H) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid debounce configuration");
        Self {
            config,
            gate,
            sampler,
            handler,
            state: DebounceState::Idle,
            scan_value: ButtonMask::EMPTY,
            elapsed_ms: 0,
            held_ms: 0,
            pressed_reported: false,
        }
    }

    /// Starts a burst with `mask` if the engine is idle.
    ///
    /// Runs the start step immediately, so the engine is `Debouncing` when
    /// this returns `true`. Returns `false` and changes nothing if a burst is
    /// already armed or in progress, or if `mask` is empty.
    pub fn start(&mut self, mask: ButtonMask) -> bool {
        if self.state != DebounceState::Idle || !self.gate.try_arm(mask) {
            return false;
        }

        match self.gate.take_pending() {
            Some(mask) => {
                self.begin(mask);
                true
            }
            None => false,
        }
    }

    /// Advances the engine by one timer period.
    ///
    /// Picks up a burst armed through the gate when idle. Emits at most one
    /// event per call. On [`ProcessOutcome::Stop`] the gate is already free,
    /// so a timer-driven caller should use
    /// [`DebounceTrigger::on_timer`](crate::DebounceTrigger::on_timer), which
    /// stops the timer before the gate opens.
    pub fn process(&mut self) -> ProcessOutcome {
        let outcome = self.step();
        if outcome == ProcessOutcome::Stop {
            self.release_gate();
        }
        outcome
    }

    /// One period of [`process`](Self::process) that leaves the gate held on
    /// `Stop`. The caller must follow up with [`release_gate`](Self::release_gate).
    pub(crate) fn step(&mut self) -> ProcessOutcome {
        if self.state == DebounceState::Idle {
            match self.gate.take_pending() {
                Some(mask) => self.begin(mask),
                None => return ProcessOutcome::Idle,
            }
        }

        let period = self.config.timer_period_ms;
        self.elapsed_ms = self.elapsed_ms.saturating_add(period);
        self.held_ms = self.held_ms.saturating_add(period);

        let sample = self.sampler.sample();
        match self.state {
            DebounceState::Debouncing => self.debounce(sample),
            DebounceState::StablePressed
            | DebounceState::StablePressedRepeat
            | DebounceState::LongPressed
            | DebounceState::LongPressedRepeat => self.hold(sample),
            DebounceState::Idle | DebounceState::Start | DebounceState::End => {}
        }

        if self.state == DebounceState::End {
            self.finish();
            ProcessOutcome::Stop
        } else {
            ProcessOutcome::Continue
        }
    }

    /// Abandons any burst and returns to `Idle` without emitting an event.
    ///
    /// Also drops a burst that was armed through the gate but not yet picked
    /// up. The caller is responsible for stopping the driving timer.
    pub fn reset(&mut self) {
        if self.state != DebounceState::Idle {
            debug!("debounce reset in {}", self.state);
        }
        self.state = DebounceState::Idle;
        self.elapsed_ms = 0;
        self.held_ms = 0;
        self.pressed_reported = false;
        self.gate.release();
    }

    pub(crate) fn release_gate(&self) {
        self.gate.release();
    }

    fn begin(&mut self, mask: ButtonMask) {
        self.state = DebounceState::Start;
        self.scan_value = mask;
        self.elapsed_ms = 0;
        self.held_ms = 0;
        self.pressed_reported = false;
        trace!("debounce start {}", mask);
        self.state = DebounceState::Debouncing;
    }

    fn debounce(&mut self, sample: ButtonMask) {
        if sample.is_empty() && self.pressed_reported {
            // Released while re-debouncing a changed mask: the earlier press
            // still needs its release.
            self.state = DebounceState::End;
            self.emit(EventKind::Released, ButtonMask::EMPTY);
        } else if sample != self.scan_value {
            // Bounce: restart the window with the new mask.
            trace!("bounce {} -> {}", self.scan_value, sample);
            self.scan_value = sample;
            self.elapsed_ms = 0;
            self.held_ms = 0;
        } else if self.elapsed_ms >= self.config.debounce_time_ms {
            if sample.is_empty() {
                debug!("burst settled released, no press reported");
                self.state = DebounceState::End;
            } else {
                self.state = DebounceState::StablePressed;
                self.elapsed_ms = 0;
                self.pressed_reported = true;
                self.emit(EventKind::Pressed, sample);
            }
        }
    }

    /// Classifies a pressed tick.
    ///
    /// A different non-empty mask goes back to `Debouncing` with both
    /// windows restarted, so the new combination is reported with another
    /// `Pressed` and its long press is timed from the change. No `Released`
    /// is emitted for the old combination.
    fn hold(&mut self, sample: ButtonMask) {
        if sample.is_empty() {
            self.state = DebounceState::End;
            self.emit(EventKind::Released, ButtonMask::EMPTY);
            return;
        }

        if sample != self.scan_value {
            // Different combination held: debounce it as a new press.
            trace!("mask changed {} -> {}", self.scan_value, sample);
            self.scan_value = sample;
            self.elapsed_ms = 0;
            self.held_ms = 0;
            self.state = DebounceState::Debouncing;
            return;
        }

        let long = self.state.is_long();
        if !long && self.held_ms >= self.config.long_press_time_ms {
            self.state = DebounceState::LongPressed;
            self.elapsed_ms = 0;
            self.emit(EventKind::LongPressed, sample);
        } else if self.elapsed_ms >= self.config.repeat_time_ms {
            self.elapsed_ms = 0;
            if long {
                self.state = DebounceState::LongPressedRepeat;
                self.emit(EventKind::LongPressedRepeat, sample);
            } else {
                self.state = DebounceState::StablePressedRepeat;
                self.emit(EventKind::PressedRepeat, sample);
            }
        }
    }

    fn finish(&mut self) {
        trace!("debounce end");
        self.state = DebounceState::Idle;
        self.elapsed_ms = 0;
        self.held_ms = 0;
        self.pressed_reported = false;
    }

    fn emit(&mut self, kind: EventKind, buttons: ButtonMask) {
        trace!("event {} {}", kind, buttons);
        self.handler.on_event(ButtonEvent::new(kind, buttons));
    }

    /// Returns the current state.
    pub fn state(&self) -> DebounceState {
        self.state
    }

    /// Returns true if no burst is in progress.
    pub fn is_idle(&self) -> bool {
        self.state == DebounceState::Idle
    }

    /// Returns the mask of the current burst, or of the last one when idle.
    pub fn scan_value(&self) -> ButtonMask {
        self.scan_value
    }

    /// Time since the current state was entered or the last event fired.
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Time the current mask has been held unchanged.
    pub fn held_ms(&self) -> u32 {
        self.held_ms
    }

    pub fn config(&self) -> &DebounceConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    /// Consumes the engine, returning its sampler and handler.
    pub fn into_parts(self) -> (S, H) {
        (self.sampler, self.handler)
    }
}
