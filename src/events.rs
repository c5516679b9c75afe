//! Broadcast of form state changes.
//!
//! The form emits an [`Event`] for every transition; the REPL and tests
//! subscribe via [`EventBus::subscribe`]. Built on
//! [`tokio::sync::broadcast`] so multiple listeners react independently.

use tokio::sync::broadcast;

/// Transitions of the summarize form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Input was replaced (carries the new character count).
    InputChanged { chars: usize },
    /// A request left for the provider; the form is now busy.
    Started { token: u64 },
    /// The request settled and its result was applied; the form is idle.
    Settled { token: u64, succeeded: bool },
    /// The request settled after the form was cleared; its result was dropped.
    Discarded { token: u64 },
    /// Input, summary and error were reset.
    Cleared,
}

impl Event {
    /// True for events that end a busy period.
    pub fn ends_request(&self) -> bool {
        matches!(self, Self::Settled { .. } | Self::Discarded { .. })
    }
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}
