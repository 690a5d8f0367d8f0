//! Event types for the scheduled playback engine.

use crate::symbol::SoundId;
use crate::transport_time::TransportTime;

/// A scheduled audio event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Event {
    /// When the event should fire
    pub time: TransportTime,
    /// Where the event is routed
    pub target: EventTarget,
    /// What the event does
    pub payload: EventPayload,
}

impl Event {
    /// Create a new event.
    pub fn new(time: TransportTime, target: EventTarget, payload: EventPayload) -> Self {
        Self {
            time,
            target,
            payload,
        }
    }

    /// Restart a named sound from its beginning.
    pub fn retrigger(time: TransportTime, sound: SoundId) -> Self {
        Self::new(time, EventTarget::Sound(sound), EventPayload::Retrigger)
    }

    /// Step the carrier gain.
    pub fn carrier_gain(time: TransportTime, gain: f32) -> Self {
        Self::new(time, EventTarget::Carrier, EventPayload::SetGain(gain))
    }
}

/// Where an event is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventTarget {
    /// A sample player for one of the symbol sounds
    Sound(SoundId),
    /// The continuously running sub-carrier tone
    Carrier,
}

/// What an event does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventPayload {
    /// Stop the target and start it again from the top
    Retrigger,
    /// Set the target's gain (0.0-1.0)
    SetGain(f32),
}
