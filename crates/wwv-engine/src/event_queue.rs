//! Priority queue for scheduled events.

use wwv_ir::{Event, TransportTime};

/// A queue of events sorted by transport time.
///
/// During playback, events are consumed via a cursor that advances forward
/// without removing elements, so the per-sample drain path never allocates.
/// Consumed events are dropped by `compact`, which runs once per minute tick.
#[derive(Clone, Debug, Default)]
pub struct EventQueue {
    events: Vec<Event>,
    /// Next event index to process (advances during playback).
    cursor: usize,
}

impl EventQueue {
    /// Create a new empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new(), cursor: 0 }
    }

    /// Create a queue with room for `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { events: Vec::with_capacity(capacity), cursor: 0 }
    }

    /// Push an event, keeping time order. Events with equal times keep
    /// their insertion order.
    pub fn push(&mut self, event: Event) {
        let pos = self.events.partition_point(|e| e.time <= event.time);
        self.events.insert(pos.max(self.cursor), event);
    }

    /// Return the index range of pending events strictly before `limit`
    /// (cursor-based, zero allocation).
    pub fn drain_before(&mut self, limit: TransportTime) -> core::ops::Range<usize> {
        let start = self.cursor;
        while self.cursor < self.events.len() {
            if self.events[self.cursor].time < limit {
                self.cursor += 1;
            } else {
                break;
            }
        }
        start..self.cursor
    }

    /// Get an event by index (for use with `drain_before` ranges).
    pub fn get(&self, index: usize) -> Option<&Event> {
        self.events.get(index)
    }

    /// Peek at the next pending event.
    pub fn peek(&self) -> Option<&Event> {
        self.events.get(self.cursor)
    }

    /// Drop events already consumed by the cursor.
    pub fn compact(&mut self) {
        self.events.drain(..self.cursor);
        self.cursor = 0;
    }

    /// Clear all events and reset cursor.
    pub fn clear(&mut self) {
        self.events.clear();
        self.cursor = 0;
    }

    /// Number of events not yet consumed.
    pub fn pending(&self) -> usize {
        self.events.len() - self.cursor
    }

    /// Iterate over pending events in time order.
    pub fn iter_pending(&self) -> impl Iterator<Item = &Event> {
        self.events[self.cursor..].iter()
    }

    /// Returns true if no events are pending.
    pub fn is_empty(&self) -> bool {
        self.pending() == 0
    }
}
