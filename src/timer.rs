//! Periodic timer abstraction for platform-agnostic driving of the engine.

use crate::config::DebounceConfig;
use crate::types::InitError;

/// Execution context of a trigger call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CallContext {
    /// Task or thread context. The timer may be started with a blocking call.
    Task,
    /// Interrupt handler. Only interrupt-safe timer calls are allowed.
    Interrupt,
}

/// Trait for abstracting the periodic timer service that drives the engine.
///
/// Implement this for your RTOS software timer or hardware timer. The
/// timer's callback must call [`Debouncer::process`](crate::Debouncer::process)
/// (or [`DebounceTrigger::on_timer`](crate::DebounceTrigger::on_timer)) every
/// period, always from the same execution context.
///
/// Handles are used through shared references because trigger sites and
/// the timer callback both hold one.
pub trait PeriodicTimer: Sized {
    /// Error returned when the timer cannot be created.
    type Error;

    /// Creates an auto-reloading timer with the given period. Not started.
    fn create(period_ms: u32) -> Result<Self, Self::Error>;

    /// Starts the timer from task context. Starting a running timer restarts it.
    fn start(&self);

    /// Starts the timer from interrupt context.
    ///
    /// Returns true if a higher-priority task was woken, in which case the
    /// interrupt handler should request a context switch on exit.
    fn start_from_isr(&self) -> bool;

    /// Stops the timer.
    fn stop(&self);
}

/// Validates `config` and creates the timer that will drive the engine.
///
/// The whole event path depends on this timer, so callers should treat an
/// error as fatal for the button group.
pub fn create_timer<T: PeriodicTimer>(config: &DebounceConfig) -> Result<T, InitError> {
    config.validate()?;

    T::create(config.timer_period_ms).map_err(|_| {
        error!("debounce timer creation failed");
        InitError::TimerUnavailable
    })
}
