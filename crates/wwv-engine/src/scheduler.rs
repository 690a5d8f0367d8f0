//! Frame-to-event scheduling.
//!
//! A `SymbolRenderer` decides how one symbol becomes sound; `schedule_frame`
//! walks the 60 slots once and hands each symbol to the renderer at its
//! slot offset. Both playback variants share this traversal.

use wwv_ir::{Event, Symbol, TimeFrame, TransportTime};

/// Turns one time code symbol into audio events.
pub trait SymbolRenderer: Send {
    /// Append the events for `symbol`, whose slot begins at `at`.
    fn render(&self, symbol: Symbol, at: TransportTime, events: &mut Vec<Event>);

    /// Short name for logging.
    fn name(&self) -> &'static str;
}

/// Schedule every slot of `frame`, with slot 0 at `base`.
pub fn schedule_frame(
    frame: &TimeFrame,
    base: TransportTime,
    renderer: &dyn SymbolRenderer,
    events: &mut Vec<Event>,
) {
    for (second, symbol) in frame.iter() {
        renderer.render(symbol, base.add_seconds(second as u64), events);
    }
}

/// Fires the recorded sound for each coded symbol at its slot boundary.
#[derive(Clone, Copy, Debug, Default)]
pub struct SampleTrigger;

impl SymbolRenderer for SampleTrigger {
    fn render(&self, symbol: Symbol, at: TransportTime, events: &mut Vec<Event>) {
        if let Some(sound) = symbol.sound() {
            events.push(Event::retrigger(at, sound));
        }
    }

    fn name(&self) -> &'static str {
        "trigger"
    }
}

/// Gain envelope timing for the sub-carrier pulse.
///
/// Hold times are measured from the slot boundary, so a `Zero` pulse with
/// the defaults is high from 30 ms to 200 ms.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnvelopeShape {
    /// Delay from slot boundary to the rising edge (ms)
    pub rise_ms: u64,
    /// Falling edge for `Zero` (ms from slot boundary)
    pub zero_ms: u64,
    /// Falling edge for `One`
    pub one_ms: u64,
    /// Falling edge for `Marker`
    pub marker_ms: u64,
    /// Plateau gain
    pub high: f32,
    /// Gain between pulses
    pub floor: f32,
}

impl Default for EnvelopeShape {
    fn default() -> Self {
        Self {
            rise_ms: 30,
            zero_ms: 200,
            one_ms: 500,
            marker_ms: 800,
            high: 0.8,
            floor: 0.0,
        }
    }
}

impl EnvelopeShape {
    /// Falling edge for `symbol`, or `None` if it carries no pulse.
    pub fn fall_ms(&self, symbol: Symbol) -> Option<u64> {
        match symbol {
            Symbol::Unmarked => None,
            Symbol::Zero => Some(self.zero_ms),
            Symbol::One => Some(self.one_ms),
            Symbol::Marker => Some(self.marker_ms),
        }
    }
}

/// Shapes a continuous sub-carrier with a per-second gain envelope.
#[derive(Clone, Copy, Debug, Default)]
pub struct PulseEnvelope {
    pub shape: EnvelopeShape,
}

impl PulseEnvelope {
    pub fn new(shape: EnvelopeShape) -> Self {
        Self { shape }
    }
}

impl SymbolRenderer for PulseEnvelope {
    fn render(&self, symbol: Symbol, at: TransportTime, events: &mut Vec<Event>) {
        events.push(Event::carrier_gain(at, self.shape.floor));
        if let Some(fall) = self.shape.fall_ms(symbol) {
            events.push(Event::carrier_gain(at.add_millis(self.shape.rise_ms), self.shape.high));
            events.push(Event::carrier_gain(at.add_millis(fall), self.shape.floor));
        }
    }

    fn name(&self) -> &'static str {
        "envelope"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;
    use wwv_ir::{encode_frame, EventPayload, EventTarget, SoundId};

    fn frame() -> TimeFrame {
        encode_frame(datetime!(2023-06-15 14:22 UTC))
    }

    #[test]
    fn trigger_one_event_per_coded_slot() {
        let frame = frame();
        let base = TransportTime::from_seconds(120);
        let mut events = Vec::new();
        schedule_frame(&frame, base, &SampleTrigger, &mut events);

        assert_eq!(events.len(), 59);
        for event in &events {
            assert_eq!(event.payload, EventPayload::Retrigger);
            assert_eq!(event.time.sub_second, 0);
        }
        let seconds: Vec<u64> = events.iter().map(|e| e.time.second - 120).collect();
        assert_eq!(seconds, (1..60).collect::<Vec<u64>>());
    }

    #[test]
    fn trigger_maps_symbols_to_sounds() {
        let frame = frame();
        let mut events = Vec::new();
        schedule_frame(&frame, TransportTime::zero(), &SampleTrigger, &mut events);

        for event in &events {
            let slot = event.time.second as usize;
            assert_eq!(event.target, EventTarget::Sound(frame.slot(slot).sound().unwrap()));
        }
        assert_eq!(events[8].target, EventTarget::Sound(SoundId::Marker)); // slot 9
        assert_eq!(events[49].target, EventTarget::Sound(SoundId::One)); // slot 50
    }

    #[test]
    fn trigger_skips_slot_zero() {
        let mut events = Vec::new();
        SampleTrigger.render(Symbol::Unmarked, TransportTime::zero(), &mut events);
        assert!(events.is_empty());
    }

    #[test]
    fn envelope_pulse_edges() {
        let env = PulseEnvelope::default();
        let at = TransportTime::from_seconds(7);

        let mut events = Vec::new();
        env.render(Symbol::One, at, &mut events);

        assert_eq!(
            events,
            vec![
                Event::carrier_gain(at, 0.0),
                Event::carrier_gain(at.add_millis(30), 0.8),
                Event::carrier_gain(at.add_millis(500), 0.0),
            ]
        );
    }

    #[test]
    fn envelope_hold_orders_zero_one_marker() {
        let env = PulseEnvelope::default();
        let fall = |symbol| {
            let mut events = Vec::new();
            env.render(symbol, TransportTime::zero(), &mut events);
            events[2].time
        };
        assert!(fall(Symbol::Zero) < fall(Symbol::One));
        assert!(fall(Symbol::One) < fall(Symbol::Marker));
    }

    #[test]
    fn envelope_unmarked_is_silence_only() {
        let mut events = Vec::new();
        PulseEnvelope::default().render(Symbol::Unmarked, TransportTime::zero(), &mut events);
        assert_eq!(events, vec![Event::carrier_gain(TransportTime::zero(), 0.0)]);
    }

    #[test]
    fn both_renderers_agree_on_symbols() {
        let frame = frame();
        let mut triggers = Vec::new();
        let mut gains = Vec::new();
        schedule_frame(&frame, TransportTime::zero(), &SampleTrigger, &mut triggers);
        schedule_frame(&frame, TransportTime::zero(), &PulseEnvelope::default(), &mut gains);

        let shape = EnvelopeShape::default();
        for trigger in &triggers {
            let EventTarget::Sound(sound) = trigger.target else { panic!("not a sound") };
            let second = trigger.time.second;
            let fall = gains
                .iter()
                .filter(|e| e.time.second == second && e.payload == EventPayload::SetGain(shape.floor))
                .map(|e| e.time)
                .max()
                .unwrap();
            let expected = match sound {
                SoundId::Zero => shape.zero_ms,
                SoundId::One => shape.one_ms,
                SoundId::Marker => shape.marker_ms,
            };
            assert_eq!(fall, TransportTime::from_seconds(second).add_millis(expected));
        }
    }
}
