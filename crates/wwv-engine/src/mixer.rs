//! Main playback engine.

use tracing::info;
use wwv_ir::{Event, EventPayload, EventTarget, SoundId, TimeFrame, TransportTime};

use crate::carrier::{Carrier, DEFAULT_CARRIER_HZ};
use crate::frame::Frame;
use crate::minute_loop::{offset_to_next_minute, MinuteLoop, UtcClock, MINUTE};
use crate::scheduler::{EnvelopeShape, PulseEnvelope, SampleTrigger, SymbolRenderer};
use crate::sound_bank::SoundBank;
use crate::transport::{Transport, TransportState};
use crate::voice::Voice;

/// How a symbol becomes sound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Retrigger a recorded sound per symbol.
    #[default]
    Trigger,
    /// Gate a continuous sub-carrier with a gain envelope.
    Envelope,
}

impl RenderMode {
    pub fn renderer(self, shape: EnvelopeShape) -> Box<dyn SymbolRenderer> {
        match self {
            RenderMode::Trigger => Box::new(SampleTrigger),
            RenderMode::Envelope => Box::new(PulseEnvelope::new(shape)),
        }
    }
}

/// Engine settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    pub mode: RenderMode,
    pub shape: EnvelopeShape,
    /// Sub-carrier frequency for the envelope variant (Hz)
    pub carrier_hz: f32,
    /// Voice gain for the trigger variant
    pub trigger_gain: f32,
    /// Forward offset between `start` and transport zero
    pub start_offset: TransportTime,
    /// Put transport zero on a UTC minute boundary
    pub align_to_minute: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Trigger,
            shape: EnvelopeShape::default(),
            carrier_hz: DEFAULT_CARRIER_HZ,
            trigger_gain: 0.8,
            start_offset: TransportTime::from_millis(100),
            align_to_minute: false,
        }
    }
}

/// The main playback engine.
pub struct Engine {
    config: EngineConfig,
    transport: Transport,
    minute_loop: MinuteLoop,
    bank: SoundBank,
    /// One voice per `SoundId`
    voices: [Voice; 3],
    carrier: Carrier,
    sample_rate: u32,
}

impl Engine {
    /// Create a stopped engine.
    pub fn new(config: EngineConfig, bank: SoundBank, clock: Box<dyn UtcClock>, sample_rate: u32) -> Self {
        let voices = SoundId::ALL.map(|id| Voice::new(bank.get(id), sample_rate, config.trigger_gain));
        let minute_loop = MinuteLoop::new(config.mode.renderer(config.shape), clock)
            .with_snap_to_minute(config.align_to_minute);

        Self {
            config,
            transport: Transport::new(sample_rate),
            minute_loop,
            bank,
            voices,
            carrier: Carrier::new(config.carrier_hz, sample_rate),
            sample_rate,
        }
    }

    /// Reset scheduling, install the minute tick and start the transport.
    pub fn start(&mut self) {
        self.transport.stop();
        self.transport.cancel_all();
        self.silence();

        self.transport.schedule_repeat(MINUTE, TransportTime::zero());
        let offset = if self.config.align_to_minute {
            offset_to_next_minute(self.minute_loop.now_utc(TransportTime::zero()), self.config.start_offset)
        } else {
            self.config.start_offset
        };
        self.transport.start(offset);

        info!(
            renderer = self.minute_loop.renderer_name(),
            offset_secs = offset.as_secs_f64(),
            "transport started"
        );
    }

    /// Stop the transport, drop everything scheduled and go silent.
    pub fn stop(&mut self) {
        self.transport.stop();
        self.transport.cancel_all();
        self.silence();
        info!("transport stopped");
    }

    /// Generate one frame of audio.
    pub fn render_frame(&mut self) -> Frame {
        if !self.transport.is_rolling() {
            return Frame::silence();
        }

        // 1. Re-encode on the minute tick
        if let Some(tick) = self.transport.take_due_repeat() {
            self.minute_loop.on_tick(tick, &mut self.transport);
        }

        // 2. Process events due at this sample
        for i in self.transport.drain_due() {
            if let Some(event) = self.transport.event(i).copied() {
                self.dispatch_event(&event);
            }
        }

        // 3. Mix and advance
        let output = self.mix();
        self.transport.advance();
        output
    }

    /// Render `count` frames.
    pub fn render_frames(&mut self, count: usize) -> Vec<Frame> {
        (0..count).map(|_| self.render_frame()).collect()
    }

    /// Fill `out` without allocating between minute ticks.
    pub fn render_into(&mut self, out: &mut [Frame]) {
        for frame in out {
            *frame = self.render_frame();
        }
    }

    fn dispatch_event(&mut self, event: &Event) {
        match (event.target, event.payload) {
            (EventTarget::Sound(sound), EventPayload::Retrigger) => {
                self.voices[sound.index()].retrigger();
            }
            (EventTarget::Carrier, EventPayload::SetGain(gain)) => {
                self.carrier.set_gain(gain);
            }
            _ => {}
        }
    }

    fn mix(&mut self) -> Frame {
        let mut sum = self.carrier.render();
        for (voice, id) in self.voices.iter_mut().zip(SoundId::ALL) {
            sum += voice.render(self.bank.get(id));
        }
        Frame::from_f32(sum)
    }

    fn silence(&mut self) {
        for voice in &mut self.voices {
            voice.stop();
        }
        self.carrier.silence();
    }

    /// Is the transport started or counting down to start?
    pub fn is_running(&self) -> bool {
        self.transport.state() != TransportState::Stopped
    }

    pub fn transport_state(&self) -> TransportState {
        self.transport.state()
    }

    /// Get the current transport position.
    pub fn position(&self) -> TransportTime {
        self.transport.position()
    }

    pub fn pending_events(&self) -> usize {
        self.transport.pending_events()
    }

    /// Pending events in time order.
    pub fn pending(&self) -> impl Iterator<Item = &Event> {
        self.transport.pending()
    }

    /// The frame scheduled by the latest minute tick.
    pub fn last_frame(&self) -> Option<&TimeFrame> {
        self.minute_loop.last_frame()
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minute_loop::AnchoredClock;
    use time::macros::datetime;

    const RATE: u32 = 8000;

    fn engine(mode: RenderMode) -> Engine {
        let config = EngineConfig { mode, ..EngineConfig::default() };
        let clock = AnchoredClock::new(datetime!(2023-06-15 14:22 UTC));
        Engine::new(config, SoundBank::synthesized(RATE, 100.0), Box::new(clock), RATE)
    }

    fn peak(frames: &[Frame]) -> i16 {
        frames.iter().map(Frame::peak).max().unwrap_or(0)
    }

    /// Samples of wall time until transport time `secs` (100 ms pre-roll).
    fn wall_samples(secs: f64) -> usize {
        ((secs + 0.1) * RATE as f64) as usize
    }

    #[test]
    fn stopped_engine_is_silent() {
        let mut engine = engine(RenderMode::Trigger);
        assert!(!engine.is_running());
        assert_eq!(peak(&engine.render_frames(RATE as usize)), 0);
        assert_eq!(engine.pending_events(), 0);
    }

    #[test]
    fn start_waits_for_offset_then_schedules_frame() {
        let mut engine = engine(RenderMode::Trigger);
        engine.start();
        assert_eq!(engine.transport_state(), TransportState::Pending);

        engine.render_frames(800);
        assert_eq!(engine.pending_events(), 0);
        engine.render_frame();
        assert_eq!(engine.transport_state(), TransportState::Started);
        assert_eq!(engine.pending_events(), 59);
        assert_eq!(engine.last_frame().map(|f| f.to_string().len()), Some(60));
    }

    #[test]
    fn restart_cycles_do_not_duplicate_events() {
        let mut engine = engine(RenderMode::Envelope);
        for _ in 0..3 {
            engine.start();
            engine.render_frames(wall_samples(0.0) + 1);
            assert_eq!(engine.pending_events(), 59 * 3);

            engine.stop();
            assert!(!engine.is_running());
            assert_eq!(engine.pending_events(), 0);
            assert_eq!(engine.position(), TransportTime::zero());
        }
    }

    #[test]
    fn trigger_mode_sounds_at_slot_boundary() {
        let mut engine = engine(RenderMode::Trigger);
        engine.start();

        let before = engine.render_frames(wall_samples(1.0));
        assert_eq!(peak(&before), 0);
        let after = engine.render_frames(RATE as usize / 10);
        assert!(peak(&after) > 10_000);
    }

    #[test]
    fn envelope_mode_gates_carrier() {
        let mut engine = engine(RenderMode::Envelope);
        engine.start();

        // silent until the 30 ms rise of slot 1
        assert_eq!(peak(&engine.render_frames(wall_samples(1.02))), 0);
        let pulse = engine.render_frames(RATE as usize / 10);
        assert!(peak(&pulse) > 20_000);

        // slot 1 is a Zero: back to silence after 200 ms
        engine.render_frames(wall_samples(1.21) - wall_samples(1.12));
        assert_eq!(peak(&engine.render_frames(RATE as usize / 2)), 0);
    }

    #[test]
    fn stop_silences_immediately() {
        let mut engine = engine(RenderMode::Trigger);
        engine.start();
        engine.render_frames(wall_samples(1.05));
        engine.stop();
        assert_eq!(peak(&engine.render_frames(100)), 0);
    }

    #[test]
    fn reencodes_every_minute() {
        let mut engine = engine(RenderMode::Trigger);
        engine.start();
        engine.render_frames(wall_samples(60.0) + 1);

        let expected = wwv_ir::encode_frame(datetime!(2023-06-15 14:23 UTC));
        assert_eq!(engine.last_frame(), Some(&expected));
        assert_eq!(engine.pending_events(), 59);
    }
}
