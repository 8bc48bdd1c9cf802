//! Core types shared by the debounce engine and its collaborators.

use crate::config::ConfigError;
use core::ops::{BitAnd, BitOr, BitOrAssign};

/// A logical button of the five-way navigation switch.
///
/// The engine never interprets mask bits, so any other assignment works too;
/// these are the bits the reference board reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Center,
}

impl Button {
    /// All buttons in bit order.
    pub const ALL: [Button; 5] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Center,
    ];

    /// Returns the single-bit mask of this button.
    #[inline]
    pub const fn mask(self) -> ButtonMask {
        ButtonMask(match self {
            Button::Up => 0x01,
            Button::Down => 0x02,
            Button::Left => 0x04,
            Button::Right => 0x08,
            Button::Center => 0x10,
        })
    }
}

/// Bitset of currently active buttons, one bit per logical button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(u32);

impl ButtonMask {
    /// No button pressed.
    pub const EMPTY: ButtonMask = ButtonMask(0);

    /// Creates a mask from raw bits.
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        ButtonMask(bits)
    }

    /// Returns the raw bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `button` is set in this mask.
    #[inline]
    pub const fn contains(self, button: Button) -> bool {
        self.0 & button.mask().0 != 0
    }

    pub fn insert(&mut self, button: Button) {
        self.0 |= button.mask().0;
    }

    pub fn remove(&mut self, button: Button) {
        self.0 &= !button.mask().0;
    }

    /// Number of set bits, including bits without a named [`Button`].
    #[inline]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Iterates the named buttons contained in this mask, lowest bit first.
    pub fn iter(self) -> impl Iterator<Item = Button> {
        Button::ALL.into_iter().filter(move |b| self.contains(*b))
    }

    /// Iterates every set bit as a single-bit mask, lowest bit first.
    pub fn single_bits(self) -> impl Iterator<Item = ButtonMask> {
        (0..u32::BITS)
            .map(|bit| 1u32 << bit)
            .filter(move |bit| self.0 & bit != 0)
            .map(ButtonMask)
    }
}

impl From<Button> for ButtonMask {
    fn from(button: Button) -> Self {
        button.mask()
    }
}

impl From<u32> for ButtonMask {
    fn from(bits: u32) -> Self {
        ButtonMask(bits)
    }
}

impl BitOr for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: Self) -> Self {
        ButtonMask(self.0 | rhs.0)
    }
}

impl BitOr<Button> for ButtonMask {
    type Output = ButtonMask;

    fn bitor(self, rhs: Button) -> Self {
        ButtonMask(self.0 | rhs.mask().0)
    }
}

impl BitOr for Button {
    type Output = ButtonMask;

    fn bitor(self, rhs: Self) -> ButtonMask {
        self.mask() | rhs.mask()
    }
}

impl BitOrAssign for ButtonMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ButtonMask {
    type Output = ButtonMask;

    fn bitand(self, rhs: Self) -> Self {
        ButtonMask(self.0 & rhs.0)
    }
}

/// Kind of a debounced button event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Input became stable with at least one button down.
    Pressed,

    /// Periodic re-emission while held, before the long-press threshold.
    PressedRepeat,

    /// Held for the long-press threshold.
    LongPressed,

    /// Periodic re-emission while held after a long press.
    LongPressedRepeat,

    /// All buttons released. Always carries an empty mask.
    Released,
}

/// A single event emitted by the debounce engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvent {
    pub kind: EventKind,
    pub buttons: ButtonMask,
}

impl ButtonEvent {
    #[inline]
    pub const fn new(kind: EventKind, buttons: ButtonMask) -> Self {
        Self { kind, buttons }
    }
}

/// Errors reported while setting up a button group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError {
    /// Configuration rejected by [`DebounceConfig::validate`](crate::DebounceConfig::validate).
    InvalidConfig(ConfigError),

    /// The periodic timer driving the engine could not be created.
    TimerUnavailable,
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::InvalidConfig(err) => write!(f, "invalid debounce configuration: {}", err),
            InitError::TimerUnavailable => {
                write!(f, "debounce timer could not be created")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

impl From<ConfigError> for InitError {
    fn from(err: ConfigError) -> Self {
        InitError::InvalidConfig(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mask_iterates_named_buttons_in_bit_order() {
        let mask = Button::Center | Button::Up;
        let mut iter = mask.iter();
        assert_eq!(iter.next(), Some(Button::Up));
        assert_eq!(iter.next(), Some(Button::Center));
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn single_bits_include_unnamed_bits() {
        let mask = ButtonMask::from_bits(0x8000_0001);
        let mut iter = mask.single_bits();
        assert_eq!(iter.next(), Some(ButtonMask::from_bits(0x01)));
        assert_eq!(iter.next(), Some(ButtonMask::from_bits(0x8000_0000)));
        assert_eq!(iter.next(), None);
        assert_eq!(mask.len(), 2);
    }

    #[test]
    fn insert_and_remove_toggle_single_button() {
        let mut mask = ButtonMask::EMPTY;
        mask.insert(Button::Left);
        assert!(mask.contains(Button::Left));
        assert!(!mask.contains(Button::Right));

        mask.remove(Button::Left);
        assert!(mask.is_empty());
    }
}
