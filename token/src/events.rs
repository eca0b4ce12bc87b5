//! Synchronous fan-out of token events to observers.

use wlt_types::TokenEvent;

type Listener = Box<dyn Fn(&TokenEvent) + Send + Sync>;

/// Listeners are invoked inline, in subscription order, while the caller
/// still holds the service; keep handlers fast and never call back into the
/// token from one.
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Listener) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &TokenEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    /// Emit every event in order.
    pub fn publish(&self, events: &[TokenEvent]) {
        for event in events {
            self.emit(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
