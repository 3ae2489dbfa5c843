//! Structural change notifications
//!
//! Events are dispatched synchronously on the caller's thread, after the
//! corresponding mutation has been committed to the registries. A listener
//! failure therefore cannot corrupt graph state.

use super::types::EntityId;
use serde::{Deserialize, Serialize};

/// A committed structural change to a graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphEvent {
    VertexAdded { entity: EntityId },
    VertexRemoved { entity: EntityId },
    EdgeAdded { entity: EntityId },
    EdgeRemoved { entity: EntityId },
}

/// Observer of committed structural changes
pub trait GraphListener {
    fn on_graph_event(&self, event: &GraphEvent);
}

/// Channel senders make convenient listeners: events queue up for whoever
/// holds the receiving end, and a dropped receiver is silently ignored.
impl GraphListener for std::sync::mpsc::Sender<GraphEvent> {
    fn on_graph_event(&self, event: &GraphEvent) {
        let _ = self.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_sender_listener_forwards_events() {
        let (tx, rx) = channel();
        let event = GraphEvent::VertexAdded {
            entity: EntityId::new(4),
        };
        tx.on_graph_event(&event);
        assert_eq!(rx.recv().unwrap(), event);
    }

    #[test]
    fn test_sender_listener_ignores_closed_receiver() {
        let (tx, rx) = channel();
        drop(rx);
        // must not panic
        tx.on_graph_event(&GraphEvent::EdgeRemoved {
            entity: EntityId::new(1),
        });
    }
}
