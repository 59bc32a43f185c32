//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{CharacterEvent, ProjectionEvent, ReferenceEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Reference table loads
    Reference,
    /// Character snapshot replacement
    Character,
    /// Reports and rejections for completed actions
    Projection,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Reference, Topic::Character, Topic::Projection];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Reference(ReferenceEvent),
    Character(CharacterEvent),
    Projection(ProjectionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Reference(_) => Topic::Reference,
            Event::Character(_) => Topic::Character,
            Event::Projection(_) => Topic::Projection,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about. Every topic channel is created up front and the
/// set never changes, so the map is shared without a lock.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    pub const DEFAULT_CAPACITY: usize = 64;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    ///
    /// A zero capacity is raised to one, the smallest broadcast channel.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let channels: HashMap<Topic, broadcast::Sender<Event>> = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity).0))
            .collect();

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    ///
    /// Never blocks. Returns the number of subscribers that will see it.
    pub fn publish(&self, event: Event) -> usize {
        let topic = event.topic();

        match self.channels.get(&topic).map(|tx| tx.send(event)) {
            Some(Ok(receivers)) => receivers,
            Some(Err(_)) => {
                // No subscribers for this topic - this is normal, not an error
                tracing::trace!("No subscribers for topic {:?}", topic);
                0
            }
            None => 0,
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events published after
    /// this call, and only for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(tx) => tx.subscribe(),
            // Unreachable with `Topic::ALL` pre-created; hand back a closed receiver.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
