//! Timing configuration for a debounced button group.

/// How the first activity of a burst is detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SamplingMode {
    /// A task samples the buttons every `interval_ms` and arms the engine.
    Polling { interval_ms: u32 },

    /// Edge interrupts arm the engine from interrupt context.
    Interrupt,
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// A period or threshold is zero.
    ZeroDuration(&'static str),

    /// Thresholds are not ordered `debounce <= repeat <= long press`.
    Misordered,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroDuration(field) => {
                write!(f, "{} must be greater than zero", field)
            }
            ConfigError::Misordered => {
                write!(
                    f,
                    "timing thresholds must satisfy debounce <= repeat <= long press"
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

/// Timing constants of one debounce engine, all in milliseconds.
///
/// Set once at initialization and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebounceConfig {
    /// Period of the timer that drives [`Debouncer::process`](crate::Debouncer::process).
    pub timer_period_ms: u32,

    /// Time the mask must stay unchanged before a press is reported.
    pub debounce_time_ms: u32,

    /// Interval between repeat events while held.
    pub repeat_time_ms: u32,

    /// Held time after which a press becomes a long press.
    pub long_press_time_ms: u32,

    /// Triggering strategy used to start a burst.
    pub sampling: SamplingMode,
}

impl DebounceConfig {
    /// Creates a polling configuration with the given timings.
    pub const fn new(
        timer_period_ms: u32,
        debounce_time_ms: u32,
        repeat_time_ms: u32,
        long_press_time_ms: u32,
    ) -> Self {
        Self {
            timer_period_ms,
            debounce_time_ms,
            repeat_time_ms,
            long_press_time_ms,
            sampling: SamplingMode::Polling { interval_ms: 50 },
        }
    }

    /// Sets the triggering strategy.
    pub const fn sampling(mut self, sampling: SamplingMode) -> Self {
        self.sampling = sampling;
        self
    }

    /// Sets the timer period.
    pub const fn timer_period(mut self, ms: u32) -> Self {
        self.timer_period_ms = ms;
        self
    }

    /// Sets the debounce time.
    pub const fn debounce_time(mut self, ms: u32) -> Self {
        self.debounce_time_ms = ms;
        self
    }

    /// Sets the repeat interval.
    pub const fn repeat_time(mut self, ms: u32) -> Self {
        self.repeat_time_ms = ms;
        self
    }

    /// Sets the long-press threshold.
    pub const fn long_press_time(mut self, ms: u32) -> Self {
        self.long_press_time_ms = ms;
        self
    }

    /// Checks that every period and threshold is non-zero.
    ///
    /// Threshold ordering is deliberately not checked here; see
    /// [`check_ordering`](Self::check_ordering).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer_period_ms == 0 {
            return Err(ConfigError::ZeroDuration("timer period"));
        }
        if self.debounce_time_ms == 0 {
            return Err(ConfigError::ZeroDuration("debounce time"));
        }
        if self.repeat_time_ms == 0 {
            return Err(ConfigError::ZeroDuration("repeat time"));
        }
        if self.long_press_time_ms == 0 {
            return Err(ConfigError::ZeroDuration("long press time"));
        }
        if let SamplingMode::Polling { interval_ms: 0 } = self.sampling {
            return Err(ConfigError::ZeroDuration("polling interval"));
        }
        Ok(())
    }

    /// Checks `debounce <= repeat <= long press`.
    ///
    /// The engine runs with any ordering, but the event stream only reads
    /// as press, repeats, long press, long repeats when this holds.
    pub fn check_ordering(&self) -> Result<(), ConfigError> {
        if self.debounce_time_ms <= self.repeat_time_ms
            && self.repeat_time_ms <= self.long_press_time_ms
        {
            Ok(())
        } else {
            Err(ConfigError::Misordered)
        }
    }
}

impl Default for DebounceConfig {
    /// Timings of the reference navigation switch: 20 ms tick, 100 ms
    /// debounce, 300 ms repeat, 1 s long press, polled every 50 ms.
    fn default() -> Self {
        DebounceConfig::new(20, 100, 300, 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid_and_ordered() {
        let config = DebounceConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.check_ordering(), Ok(()));
        assert_eq!(config.sampling, SamplingMode::Polling { interval_ms: 50 });
    }

    #[test]
    fn zero_timer_period_is_rejected() {
        let config = DebounceConfig::default().timer_period(0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDuration("timer period"))
        );
    }

    #[test]
    fn zero_polling_interval_is_rejected() {
        let config = DebounceConfig::default().sampling(SamplingMode::Polling { interval_ms: 0 });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDuration(_))
        ));
    }

    #[test]
    fn misordered_thresholds_validate_but_fail_ordering_check() {
        // repeat shorter than debounce: latent misconfiguration, not an error
        let config = DebounceConfig::new(20, 300, 100, 1000);
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.check_ordering(), Err(ConfigError::Misordered));
    }
}
