//! Continuous sub-carrier oscillator with a stepped gain.

use core::f32::consts::TAU;

/// WWV's 100 Hz time code sub-carrier.
pub const DEFAULT_CARRIER_HZ: f32 = 100.0;

/// A free-running sine tone whose gain is set by scheduled events.
#[derive(Clone, Debug)]
pub struct Carrier {
    /// Phase in cycles (0.0..1.0)
    phase: f32,
    /// Cycles per output sample
    phase_inc: f32,
    gain: f32,
}

impl Carrier {
    pub fn new(frequency: f32, sample_rate: u32) -> Self {
        let phase_inc = if sample_rate == 0 { 0.0 } else { frequency / sample_rate as f32 };
        Self { phase: 0.0, phase_inc, gain: 0.0 }
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }

    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain.clamp(0.0, 1.0);
    }

    /// Force the output to silence.
    pub fn silence(&mut self) {
        self.gain = 0.0;
    }

    /// Render one sample. The oscillator keeps running while silent so
    /// pulses stay phase-continuous.
    pub fn render(&mut self) -> f32 {
        let value = libm::sinf(TAU * self.phase) * self.gain;
        self.phase += self.phase_inc;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        value
    }
}
