//! Button sampling from `embedded-hal` input pins.

use crate::debouncer::ButtonSampler;
use crate::types::{Button, ButtonMask};
use core::cell::RefCell;
use critical_section::Mutex;
use embedded_hal::digital::InputPin;

/// Electrical level that means "pressed".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Button pulls the pin to ground (pull-up wiring).
    ActiveLow,
    /// Button pulls the pin to the supply (pull-down wiring).
    ActiveHigh,
}

/// Builds a [`ButtonMask`] from a set of input pins.
///
/// Each pin is paired with the mask bit it reports. Pins sit behind a
/// critical-section mutex so the sampler can be shared between the polling
/// task and the timer callback. A pin that fails to read counts as released.
///
/// # Type Parameters
/// * `P` - Pin type (use your HAL's type-erased input pin for mixed ports)
/// * `N` - Number of pins
pub struct PinSampler<P: InputPin, const N: usize> {
    pins: Mutex<RefCell<[(P, ButtonMask); N]>>,
    polarity: Polarity,
}

impl<P: InputPin, const N: usize> PinSampler<P, N> {
    /// Creates a sampler. Pins must already be configured as inputs.
    pub fn new(pins: [(P, ButtonMask); N], polarity: Polarity) -> Self {
        Self {
            pins: Mutex::new(RefCell::new(pins)),
            polarity,
        }
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Reads only the pins that report `button`.
    pub fn is_pressed(&self, button: Button) -> bool {
        critical_section::with(|cs| {
            let mut pins = self.pins.borrow_ref_mut(cs);
            pins.iter_mut()
                .filter(|(_, bits)| bits.contains(button))
                .any(|(pin, _)| read_pressed(pin, self.polarity))
        })
    }

    /// Consumes the sampler, returning the pins.
    pub fn release(self) -> [(P, ButtonMask); N] {
        self.pins.into_inner().into_inner()
    }
}

impl<P: InputPin, const N: usize> ButtonSampler for PinSampler<P, N> {
    fn sample(&self) -> ButtonMask {
        critical_section::with(|cs| {
            let mut pins = self.pins.borrow_ref_mut(cs);
            let mut mask = ButtonMask::EMPTY;
            for (pin, bits) in pins.iter_mut() {
                if read_pressed(pin, self.polarity) {
                    mask |= *bits;
                }
            }
            mask
        })
    }
}

fn read_pressed<P: InputPin>(pin: &mut P, polarity: Polarity) -> bool {
    let pressed = match polarity {
        Polarity::ActiveLow => pin.is_low(),
        Polarity::ActiveHigh => pin.is_high(),
    };
    pressed.unwrap_or(false)
}
