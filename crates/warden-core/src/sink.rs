//! Event sinks.
//!
//! A Target is handed an [`EventSink`] at construction and writes every
//! committed event to it, in order. Reverted invocations never reach the sink.

use warden_proto::MessageEvent;

/// Ordered, append-only destination for events.
pub trait EventSink {
    /// Append one event.
    fn emit(&mut self, event: MessageEvent);
}

impl EventSink for Vec<MessageEvent> {
    fn emit(&mut self, event: MessageEvent) {
        self.push(event);
    }
}

/// In-memory sink that buffers events until drained.
///
/// The ledger drains it after each committed invocation to build the
/// invocation's receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventBuffer {
    events: Vec<MessageEvent>,
}

impl EventBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffered events, oldest first.
    pub fn events(&self) -> &[MessageEvent] {
        &self.events
    }

    /// Number of buffered events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take all buffered events, leaving the buffer empty.
    pub fn drain(&mut self) -> Vec<MessageEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for EventBuffer {
    fn emit(&mut self, event: MessageEvent) {
        self.events.push(event);
    }
}
