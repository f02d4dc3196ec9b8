use dashmap::DashMap;
use tokio::sync::broadcast;

use crate::model::{Category, Event};

const CHANNEL_CAPACITY: usize = 256;

/// Broadcast hub for fleet changes, one channel per category.
pub struct NotifyHub {
    channels: DashMap<Category, broadcast::Sender<Event>>,
}

impl Default for NotifyHub {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyHub {
    pub fn new() -> Self {
        Self {
            channels: DashMap::new(),
        }
    }

    /// Subscribe to changes in a category. Creates the channel if needed.
    pub fn subscribe(&self, category: Category) -> broadcast::Receiver<Event> {
        let sender = self
            .channels
            .entry(category)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0);
        sender.subscribe()
    }

    /// Send to the event's category. No-op if nobody is listening.
    pub fn send(&self, event: &Event) {
        if let Some(sender) = self.channels.get(&event.category()) {
            let _ = sender.send(event.clone());
        }
    }
}
