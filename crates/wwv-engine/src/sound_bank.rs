//! The three symbol sounds used by the sample-trigger variant.

use core::f32::consts::TAU;

use wwv_ir::{Sample, SampleData, SoundId};

/// Fade applied to both ends of a synthesized burst (ms).
const FADE_MS: u32 = 5;

/// One sample per `SoundId`.
#[derive(Clone, Debug)]
pub struct SoundBank {
    samples: [Sample; 3],
}

impl SoundBank {
    /// Build a bank from samples in `SoundId::ALL` order (zero, one, marker).
    pub fn new(zero: Sample, one: Sample, marker: Sample) -> Self {
        Self {
            samples: [zero, one, marker],
        }
    }

    /// Bank of plain tone bursts with WWV pulse widths
    /// (200, 500 and 800 ms).
    pub fn synthesized(sample_rate: u32, tone_hz: f32) -> Self {
        Self::new(
            tone_burst(SoundId::Zero.name(), sample_rate, tone_hz, 200),
            tone_burst(SoundId::One.name(), sample_rate, tone_hz, 500),
            tone_burst(SoundId::Marker.name(), sample_rate, tone_hz, 800),
        )
    }

    pub fn get(&self, sound: SoundId) -> &Sample {
        &self.samples[sound.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (SoundId, &Sample)> {
        SoundId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// A sine burst of `millis` length with short linear fades.
pub fn tone_burst(name: &str, sample_rate: u32, tone_hz: f32, millis: u32) -> Sample {
    let len = (sample_rate as u64 * millis as u64 / 1000) as usize;
    let fade = ((sample_rate as u64 * FADE_MS as u64 / 1000) as usize).max(1);
    let step = if sample_rate == 0 { 0.0 } else { tone_hz / sample_rate as f32 };

    let data = (0..len)
        .map(|i| {
            let edge = i.min(len - 1 - i);
            let ramp = if edge < fade { edge as f32 / fade as f32 } else { 1.0 };
            let phase = (i as f32 * step).fract();
            (libm::sinf(TAU * phase) * ramp * 32767.0) as i16
        })
        .collect();

    let mut sample = Sample::new(name, sample_rate);
    sample.data = SampleData::Mono16(data);
    sample
}
