//! Interrupt-safe arm-if-idle guard shared by trigger sites and the engine.

use crate::types::ButtonMask;
use core::cell::Cell;
use critical_section::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Idle,
    Pending(ButtonMask),
    Active,
}

/// Guards a debounce engine against starting a second burst.
///
/// Trigger sites (a polling task or an edge interrupt) call
/// [`try_arm`](Self::try_arm); the engine picks the armed mask up on its next
/// timer tick and hands the gate back with [`release`](Self::release) when
/// the burst ends. Every state change happens inside one critical section,
/// so a task and an interrupt can race on the same gate.
///
/// `DebounceGate::new` is `const`, so a gate can live in a `static`.
pub struct DebounceGate {
    slot: Mutex<Cell<Slot>>,
}

impl DebounceGate {
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(Cell::new(Slot::Idle)),
        }
    }

    /// Arms the gate with `mask` if no burst is in progress.
    ///
    /// Returns `false` without touching the stored mask if the gate is
    /// already armed or active, or if `mask` is empty.
    pub fn try_arm(&self, mask: ButtonMask) -> bool {
        if mask.is_empty() {
            return false;
        }

        critical_section::with(|cs| {
            let slot = self.slot.borrow(cs);
            if slot.get() == Slot::Idle {
                slot.set(Slot::Pending(mask));
                true
            } else {
                false
            }
        })
    }

    /// Claims the armed mask, moving the gate to active.
    pub(crate) fn take_pending(&self) -> Option<ButtonMask> {
        critical_section::with(|cs| {
            let slot = self.slot.borrow(cs);
            match slot.get() {
                Slot::Pending(mask) => {
                    slot.set(Slot::Active);
                    Some(mask)
                }
                _ => None,
            }
        })
    }

    /// Returns the gate to idle so the next burst can be armed.
    pub(crate) fn release(&self) {
        critical_section::with(|cs| self.slot.borrow(cs).set(Slot::Idle));
    }

    /// Returns true if no burst is armed or in progress.
    pub fn is_idle(&self) -> bool {
        critical_section::with(|cs| self.slot.borrow(cs).get() == Slot::Idle)
    }

    /// Returns true if a burst is armed but not yet picked up by the engine.
    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| matches!(self.slot.borrow(cs).get(), Slot::Pending(_)))
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new()
    }
}
