use crate::input::events::{MapEvent, MapEventKind};
use fxhash::FxHashMap;
use std::collections::VecDeque;

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Queue of map events plus the listeners subscribed to them
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event kind
    listeners: FxHashMap<MapEventKind, Vec<EventCallback>>,
    /// Event queue for processing
    event_queue: VecDeque<MapEvent>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, kind: MapEventKind, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(kind)
            .or_default()
            .push(Box::new(callback));
    }

    /// Emit an event to the queue
    pub fn emit(&mut self, event: MapEvent) {
        self.event_queue.push_back(event);
    }

    /// Dispatches every queued event to its listeners, in emission order,
    /// and returns the drained events
    pub fn process_events(&mut self) -> Vec<MapEvent> {
        let events: Vec<_> = self.event_queue.drain(..).collect();

        for event in &events {
            if let Some(callbacks) = self.listeners.get(&event.kind()) {
                for callback in callbacks {
                    callback(event);
                }
            }
        }

        events
    }
}
