#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonMask`**: Bitset of active buttons, one bit per logical button
//! - **`Debouncer`**: Converts a bouncing mask into press, repeat, long-press and release events
//! - **`DebounceConfig`**: Timer period, debounce, repeat and long-press times in milliseconds
//! - **`DebounceGate`**: Interrupt-safe arm-if-idle guard shared by trigger sites and the engine
//! - **`DebounceTrigger`**: Polling task, interrupt and timer callback entry points
//! - **`ButtonSampler`**: Trait to implement for reading your buttons
//! - **`EventHandler`**: Trait to implement for consuming events
//! - **`PeriodicTimer`**: Trait to implement for your timer service
//!
//! The engine never allocates, never blocks, and signals no errors while
//! running. Only setup can fail, see [`create_timer`].

mod fmt;

pub mod config;
pub mod debouncer;
pub mod gate;
pub mod recorder;
pub mod sampler;
pub mod timer;
pub mod trigger;
pub mod types;

pub use config::{ConfigError, DebounceConfig, SamplingMode};
pub use debouncer::{ButtonSampler, DebounceState, Debouncer, EventHandler, ProcessOutcome};
pub use gate::DebounceGate;
pub use recorder::EventRecorder;
pub use sampler::{PinSampler, Polarity};
pub use timer::{CallContext, PeriodicTimer, create_timer};
pub use trigger::{ArmOutcome, DebounceTrigger};
pub use types::{Button, ButtonEvent, ButtonMask, EventKind, InitError};
