//! Fixed-capacity log of recent button events.

use crate::debouncer::EventHandler;
use crate::types::{ButtonEvent, EventKind};
use heapless::Deque;

/// Event handler that keeps the last `N` events.
///
/// When full, the oldest event is dropped to make room and counted in
/// [`dropped`](Self::dropped). Useful as a diagnostic sink or to hand events
/// from the timer callback to a consumer task that drains them later.
pub struct EventRecorder<const N: usize> {
    events: Deque<ButtonEvent, N>,
    dropped: u32,
}

impl<const N: usize> EventRecorder<N> {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Removes and returns the oldest recorded event.
    pub fn pop(&mut self) -> Option<ButtonEvent> {
        self.events.pop_front()
    }

    /// Returns the most recent event.
    pub fn last(&self) -> Option<&ButtonEvent> {
        self.events.back()
    }

    /// Iterates recorded events, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &ButtonEvent> {
        self.events.iter()
    }

    /// Kinds of the recorded events, oldest first.
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.events.iter().map(|event| event.kind)
    }

    /// Number of recorded events of `kind`.
    pub fn count(&self, kind: EventKind) -> usize {
        self.kinds().filter(|k| *k == kind).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events discarded because the log was full.
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    pub fn clear(&mut self) {
        self.events.clear();
        self.dropped = 0;
    }
}

impl<const N: usize> Default for EventRecorder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventHandler for EventRecorder<N> {
    fn on_event(&mut self, event: ButtonEvent) {
        if self.events.is_full() {
            self.events.pop_front();
            self.dropped = self.dropped.saturating_add(1);
        }
        if self.events.push_back(event).is_err() {
            // Only reachable with N == 0.
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}
