//! In-memory change notifier for tests and development.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::notifier::base::ChangeNotifier;
use crate::types::{Event, EventType};

/// Change notifier that captures every event in memory.
///
/// [`MemoryChangeNotifier`] records notifications in emission order so tests
/// can assert on exactly what a run dispatched. Clones share the same
/// underlying buffer.
#[derive(Debug, Clone, Default)]
pub struct MemoryChangeNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl MemoryChangeNotifier {
    /// Creates a new notifier with an empty event buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all captured events, in emission order.
    pub async fn events(&self) -> Vec<Event> {
        let events = self.events.lock().await;
        events.clone()
    }

    /// Returns the captured events of one [`EventType`], in emission order.
    pub async fn events_of_type(&self, event_type: EventType) -> Vec<Event> {
        let events = self.events.lock().await;
        events
            .iter()
            .filter(|event| event.event_type() == event_type)
            .cloned()
            .collect()
    }

    /// Clears the captured events.
    pub async fn clear(&self) {
        let mut events = self.events.lock().await;
        events.clear();
    }
}

impl ChangeNotifier for MemoryChangeNotifier {
    async fn notify(&self, event: Event) {
        let mut events = self.events.lock().await;
        events.push(event);
    }
}
