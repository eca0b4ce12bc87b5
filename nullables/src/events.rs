//! Recording event listener.

use std::sync::{Arc, Mutex, PoisonError};

use wlt_types::TokenEvent;

/// Collects events published by a token.
///
/// Cheap to clone; all clones share the same log.
#[derive(Clone, Default)]
pub struct EventRecorder {
    log: Arc<Mutex<Vec<TokenEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A listener suitable for `TokenService::subscribe`.
    pub fn listener(&self) -> Box<dyn Fn(&TokenEvent) + Send + Sync> {
        let log = Arc::clone(&self.log);
        Box::new(move |event| {
            log.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        })
    }

    /// Everything recorded so far, in publication order.
    pub fn events(&self) -> Vec<TokenEvent> {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Event names in publication order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events().iter().map(TokenEvent::name).collect()
    }

    pub fn len(&self) -> usize {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.log.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}
