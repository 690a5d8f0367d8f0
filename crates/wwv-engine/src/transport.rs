//! Sample-driven transport clock.
//!
//! The transport owns the one-shot event queue and at most one repeating
//! tick. The engine advances it exactly one output sample at a time, so
//! every scheduled edge lands on a deterministic sample.

use wwv_ir::{Event, TransportTime};

use crate::event_queue::EventQueue;

/// Transport run state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransportState {
    #[default]
    Stopped,
    /// Started, still counting down the forward start offset.
    Pending,
    /// Rolling; position advances every sample.
    Started,
}

/// A repeating tick subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Repeat {
    interval: TransportTime,
    next: TransportTime,
}

/// The shared transport clock.
#[derive(Debug)]
pub struct Transport {
    sample_rate: u32,
    state: TransportState,
    /// Samples rolled since the transport started
    position: u64,
    /// Samples left before rolling begins
    start_delay: u64,
    queue: EventQueue,
    repeat: Option<Repeat>,
}

impl Transport {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            state: TransportState::Stopped,
            position: 0,
            start_delay: 0,
            queue: EventQueue::with_capacity(256),
            repeat: None,
        }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    /// Current transport time.
    pub fn position(&self) -> TransportTime {
        TransportTime::from_samples(self.position, self.sample_rate)
    }

    /// Schedule a one-shot event.
    pub fn schedule(&mut self, event: Event) {
        self.queue.push(event);
    }

    /// Schedule a batch of one-shot events, dropping consumed ones first.
    pub fn schedule_all(&mut self, events: &[Event]) {
        self.queue.compact();
        for event in events {
            self.queue.push(*event);
        }
    }

    /// Install the repeating tick, replacing any existing one.
    pub fn schedule_repeat(&mut self, interval: TransportTime, start: TransportTime) {
        self.repeat = Some(Repeat { interval, next: start });
    }

    /// Whether a repeating tick is installed.
    pub fn has_repeat(&self) -> bool {
        self.repeat.is_some()
    }

    /// Start rolling after `offset` of wall time.
    pub fn start(&mut self, offset: TransportTime) {
        self.start_delay = offset.to_samples(self.sample_rate);
        self.state = if self.start_delay == 0 {
            TransportState::Started
        } else {
            TransportState::Pending
        };
    }

    /// Stop and rewind to zero. Scheduled events are kept; see `cancel_all`.
    pub fn stop(&mut self) {
        self.state = TransportState::Stopped;
        self.position = 0;
        self.start_delay = 0;
    }

    /// Drop every pending event and the repeating tick.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.repeat = None;
    }

    /// Count down the start offset. Returns true when the transport is
    /// rolling for the current sample.
    pub fn is_rolling(&mut self) -> bool {
        match self.state {
            TransportState::Stopped => false,
            TransportState::Pending if self.start_delay > 0 => {
                self.start_delay -= 1;
                false
            }
            TransportState::Pending => {
                self.state = TransportState::Started;
                true
            }
            TransportState::Started => true,
        }
    }

    /// If the repeating tick is due at the current sample, return its time
    /// and arm the next one.
    pub fn take_due_repeat(&mut self) -> Option<TransportTime> {
        let limit = self.next_sample_time();
        let repeat = self.repeat.as_mut()?;
        if repeat.next >= limit {
            return None;
        }
        let due = repeat.next;
        repeat.next = add_time(repeat.next, repeat.interval);
        Some(due)
    }

    /// Index range of events due at the current sample.
    pub fn drain_due(&mut self) -> core::ops::Range<usize> {
        let limit = self.next_sample_time();
        self.queue.drain_before(limit)
    }

    /// Get a drained event by index.
    pub fn event(&self, index: usize) -> Option<&Event> {
        self.queue.get(index)
    }

    /// Advance one sample.
    pub fn advance(&mut self) {
        if self.state == TransportState::Started {
            self.position += 1;
        }
    }

    /// Number of events scheduled but not yet fired.
    pub fn pending_events(&self) -> usize {
        self.queue.pending()
    }

    /// Pending events in time order.
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.queue.iter_pending()
    }

    fn next_sample_time(&self) -> TransportTime {
        TransportTime::from_samples(self.position + 1, self.sample_rate)
    }
}

fn add_time(a: TransportTime, b: TransportTime) -> TransportTime {
    let sub = a.sub_second as u64 + b.sub_second as u64;
    let unit = wwv_ir::SUB_SECOND_UNIT as u64;
    TransportTime {
        second: a.second + b.second + sub / unit,
        sub_second: (sub % unit) as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wwv_ir::SoundId;

    const RATE: u32 = 1000;

    fn roll(transport: &mut Transport, samples: u64) -> Vec<Event> {
        let mut fired = Vec::new();
        for _ in 0..samples {
            if transport.is_rolling() {
                for i in transport.drain_due() {
                    fired.push(*transport.event(i).unwrap());
                }
            }
            transport.advance();
        }
        fired
    }

    #[test]
    fn stopped_transport_does_not_roll() {
        let mut t = Transport::new(RATE);
        t.schedule(Event::retrigger(TransportTime::zero(), SoundId::Zero));
        assert!(roll(&mut t, 10).is_empty());
        assert_eq!(t.position(), TransportTime::zero());
    }

    #[test]
    fn start_offset_delays_rolling() {
        let mut t = Transport::new(RATE);
        t.schedule(Event::retrigger(TransportTime::zero(), SoundId::Zero));
        t.start(TransportTime::from_millis(100));

        assert!(roll(&mut t, 100).is_empty());
        assert_eq!(t.state(), TransportState::Pending);
        assert_eq!(roll(&mut t, 1).len(), 1);
        assert_eq!(t.state(), TransportState::Started);
    }

    #[test]
    fn events_fire_on_their_sample() {
        let mut t = Transport::new(RATE);
        t.schedule(Event::retrigger(TransportTime::from_millis(5), SoundId::One));
        t.start(TransportTime::zero());

        assert!(roll(&mut t, 5).is_empty());
        assert_eq!(roll(&mut t, 1).len(), 1);
        assert_eq!(t.pending_events(), 0);
    }

    #[test]
    fn repeat_fires_every_interval() {
        let mut t = Transport::new(RATE);
        t.schedule_repeat(TransportTime::from_seconds(1), TransportTime::zero());
        t.start(TransportTime::zero());

        let mut ticks = Vec::new();
        for _ in 0..3000 {
            if t.is_rolling() {
                if let Some(at) = t.take_due_repeat() {
                    ticks.push(at);
                }
            }
            t.advance();
        }
        assert_eq!(
            ticks,
            vec![
                TransportTime::from_seconds(0),
                TransportTime::from_seconds(1),
                TransportTime::from_seconds(2)
            ]
        );
    }

    #[test]
    fn schedule_repeat_replaces_previous() {
        let mut t = Transport::new(RATE);
        t.schedule_repeat(TransportTime::from_seconds(1), TransportTime::zero());
        t.schedule_repeat(TransportTime::from_seconds(5), TransportTime::zero());
        t.start(TransportTime::zero());

        let mut count = 0;
        for _ in 0..2000 {
            if t.is_rolling() && t.take_due_repeat().is_some() {
                count += 1;
            }
            t.advance();
        }
        assert_eq!(count, 1);
    }

    #[test]
    fn stop_rewinds_and_cancel_clears() {
        let mut t = Transport::new(RATE);
        t.schedule_repeat(TransportTime::from_seconds(60), TransportTime::zero());
        t.schedule(Event::retrigger(TransportTime::from_seconds(30), SoundId::Marker));
        t.start(TransportTime::zero());
        roll(&mut t, 10);

        t.stop();
        assert_eq!(t.position(), TransportTime::zero());
        assert_eq!(t.pending_events(), 1);

        t.cancel_all();
        assert_eq!(t.pending_events(), 0);
        assert!(!t.has_repeat());
    }

    #[test]
    fn add_time_carries() {
        let half = TransportTime::from_millis(500);
        assert_eq!(add_time(half, half), TransportTime::from_seconds(1));
    }
}
