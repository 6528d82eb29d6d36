use std::fmt::Debug;

use tracing::trace;

/// A recorded event with its position in the emission sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded<E> {
    pub seq: u64,
    pub event: E,
}

/// Single-threaded event log.
///
/// Events are appended in emission order and kept for the life of the bus,
/// so UI state transitions can be replayed and asserted on.
#[derive(Debug)]
pub struct EventBus<E> {
    next_seq: u64,
    events: Vec<Recorded<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self {
            next_seq: 0,
            events: Vec::new(),
        }
    }
}

impl<E: Debug> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: E) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        trace!(seq, ?event, "event");
        self.events.push(Recorded { seq, event });
        seq
    }

    pub fn events(&self) -> &[Recorded<E>] {
        &self.events
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;

    #[test]
    fn records_events_in_order() {
        let mut bus = EventBus::new();
        assert_eq!(bus.emit("first"), 0);
        assert_eq!(bus.emit("second"), 1);
        assert_eq!(bus.events().len(), 2);
        assert_eq!(bus.events()[1].event, "second");
    }
}
