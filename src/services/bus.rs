use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::models::MessageView;

/// Events fanned out to conversation rooms
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", content = "payload", rename_all = "kebab-case")]
pub enum BusEvent {
    MessageReceived(MessageView),
}

/// Publish/subscribe channel keyed by room identifier
///
/// The real-time transport behind it is interchangeable; the API only ever
/// publishes and subscribes.
pub trait MessageBus: Send + Sync {
    /// Deliver an event to every current subscriber of a room. Fire and
    /// forget: rooms with no subscribers swallow the event.
    fn publish(&self, room_id: &str, event: BusEvent);

    /// Subscribe to a room's event stream
    fn subscribe(&self, room_id: &str) -> broadcast::Receiver<BusEvent>;
}

/// In-process bus backed by one broadcast channel per room
pub struct InProcessBus {
    rooms: RwLock<HashMap<String, broadcast::Sender<BusEvent>>>,
    capacity: usize,
}

impl InProcessBus {
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            capacity,
        }
    }

    fn sender(&self, room_id: &str) -> broadcast::Sender<BusEvent> {
        if let Ok(rooms) = self.rooms.read() {
            if let Some(sender) = rooms.get(room_id) {
                return sender.clone();
            }
        }

        let mut rooms = match self.rooms.write() {
            Ok(rooms) => rooms,
            Err(poisoned) => poisoned.into_inner(),
        };
        rooms
            .entry(room_id.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .clone()
    }
}

impl Default for InProcessBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl std::fmt::Debug for InProcessBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessBus").finish_non_exhaustive()
    }
}

impl MessageBus for InProcessBus {
    fn publish(&self, room_id: &str, event: BusEvent) {
        // send() errors only when the room has no subscribers, which is fine
        let _ = self.sender(room_id).send(event);
    }

    fn subscribe(&self, room_id: &str) -> broadcast::Receiver<BusEvent> {
        self.sender(room_id).subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserSummary;
    use chrono::Utc;
    use uuid::Uuid;

    fn event(content: &str) -> BusEvent {
        BusEvent::MessageReceived(MessageView {
            id: Uuid::new_v4(),
            conversation: Uuid::new_v4(),
            sender: UserSummary {
                id: Uuid::new_v4(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                profile_image: String::new(),
            },
            content: content.to_string(),
            read: false,
            created_at: Utc::now(),
        })
    }

    #[tokio::test]
    async fn test_subscribers_receive_published_events() {
        let bus = InProcessBus::default();
        let mut rx = bus.subscribe("room-1");

        bus.publish("room-1", event("hello"));

        let BusEvent::MessageReceived(view) = rx.recv().await.unwrap();
        assert_eq!(view.content, "hello");
    }

    #[tokio::test]
    async fn test_rooms_are_isolated() {
        let bus = InProcessBus::default();
        let mut rx = bus.subscribe("room-a");

        bus.publish("room-b", event("elsewhere"));
        bus.publish("room-a", event("here"));

        let BusEvent::MessageReceived(view) = rx.recv().await.unwrap();
        assert_eq!(view.content, "here");
    }

    #[test]
    fn test_publish_without_subscribers_is_silent() {
        let bus = InProcessBus::default();
        bus.publish("empty-room", event("nobody listening"));
    }
}
