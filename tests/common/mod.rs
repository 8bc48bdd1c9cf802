//! Shared test infrastructure for button-debounce integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use button_debounce::{
    ButtonEvent, ButtonSampler, DebounceConfig, Debouncer, EventHandler, EventKind,
    PeriodicTimer, ProcessOutcome,
};
use core::cell::Cell;

// ============================================================================
// Mock Clock
// ============================================================================

/// Simulated millisecond clock shared by inputs and recorders
pub struct MockClock {
    now_ms: Cell<u32>,
}

impl MockClock {
    pub fn new() -> Self {
        Self {
            now_ms: Cell::new(0),
        }
    }

    pub fn now(&self) -> u32 {
        self.now_ms.get()
    }

    pub fn set(&self, ms: u32) {
        self.now_ms.set(ms);
    }

    pub fn advance(&self, ms: u32) {
        self.now_ms.set(self.now_ms.get() + ms);
    }
}

// ============================================================================
// Timed Event Recorder
// ============================================================================

/// Event handler that records every event with the simulated time it fired at
pub struct TimedRecorder<'c> {
    clock: &'c MockClock,
    events: heapless::Vec<(u32, ButtonEvent), 64>,
}

impl<'c> TimedRecorder<'c> {
    pub fn new(clock: &'c MockClock) -> Self {
        Self {
            clock,
            events: heapless::Vec::new(),
        }
    }

    pub fn events(&self) -> &[(u32, ButtonEvent)] {
        &self.events
    }

    pub fn kinds(&self) -> heapless::Vec<EventKind, 64> {
        self.events.iter().map(|(_, e)| e.kind).collect()
    }

    pub fn times_of(&self, kind: EventKind) -> heapless::Vec<u32, 64> {
        self.events
            .iter()
            .filter(|(_, e)| e.kind == kind)
            .map(|(t, _)| *t)
            .collect()
    }
}

impl EventHandler for TimedRecorder<'_> {
    fn on_event(&mut self, event: ButtonEvent) {
        let _ = self.events.push((self.clock.now(), event));
    }
}

// ============================================================================
// Mock Timer
// ============================================================================

/// Mock periodic timer that counts start/stop calls
pub struct MockTimer {
    pub period_ms: u32,
    running: Cell<bool>,
    starts: Cell<u32>,
    isr_starts: Cell<u32>,
    stops: Cell<u32>,
    wakes_task: Cell<bool>,
}

impl MockTimer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            running: Cell::new(false),
            starts: Cell::new(0),
            isr_starts: Cell::new(0),
            stops: Cell::new(0),
            wakes_task: Cell::new(false),
        }
    }

    /// Make `start_from_isr` report a woken higher-priority task
    pub fn set_wakes_task(&self, wakes: bool) {
        self.wakes_task.set(wakes);
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn starts(&self) -> u32 {
        self.starts.get()
    }

    pub fn isr_starts(&self) -> u32 {
        self.isr_starts.get()
    }

    pub fn stops(&self) -> u32 {
        self.stops.get()
    }
}

impl PeriodicTimer for MockTimer {
    type Error = ();

    fn create(period_ms: u32) -> Result<Self, Self::Error> {
        Ok(MockTimer::new(period_ms))
    }

    fn start(&self) {
        self.running.set(true);
        self.starts.set(self.starts.get() + 1);
    }

    fn start_from_isr(&self) -> bool {
        self.running.set(true);
        self.isr_starts.set(self.isr_starts.get() + 1);
        self.wakes_task.get()
    }

    fn stop(&self) {
        self.running.set(false);
        self.stops.set(self.stops.get() + 1);
    }
}

/// Timer whose creation always fails, like an exhausted RTOS heap
pub struct ExhaustedTimer;

impl PeriodicTimer for ExhaustedTimer {
    type Error = ();

    fn create(_period_ms: u32) -> Result<Self, Self::Error> {
        Err(())
    }

    fn start(&self) {}

    fn start_from_isr(&self) -> bool {
        false
    }

    fn stop(&self) {}
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Reference board timings: 20 ms tick, 100 ms debounce, 300 ms repeat, 1 s long press
pub fn reference_config() -> DebounceConfig {
    DebounceConfig::new(20, 100, 300, 1000)
}

/// Tick the engine once per timer period until the burst stops or `limit_ms` passes.
///
/// Returns the time of the tick that stopped the burst.
pub fn run_until_stop<S: ButtonSampler, H: EventHandler>(
    debouncer: &mut Debouncer<'_, S, H>,
    clock: &MockClock,
    limit_ms: u32,
) -> Option<u32> {
    let period = debouncer.config().timer_period_ms;
    while clock.now() < limit_ms {
        clock.advance(period);
        if debouncer.process() == ProcessOutcome::Stop {
            return Some(clock.now());
        }
    }
    None
}
