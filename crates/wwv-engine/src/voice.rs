//! Voice: one-shot sample player for a symbol sound.

use wwv_ir::Sample;

/// A single voice playing a sample from the top.
#[derive(Clone, Debug, Default)]
pub struct Voice {
    /// Current position in sample (32.16 fixed-point).
    pub position: u64,
    /// Playback increment (32.16 fixed-point).
    pub increment: u64,
    /// Is the voice currently producing audio?
    pub playing: bool,
    /// Output gain (0.0-1.0).
    pub gain: f32,
}

impl Voice {
    /// Create a stopped voice that plays `sample` at `output_rate`.
    pub fn new(sample: &Sample, output_rate: u32, gain: f32) -> Self {
        Self {
            position: 0,
            increment: rate_to_increment(sample.sample_rate, output_rate),
            playing: false,
            gain,
        }
    }

    /// Stop any instance that is still sounding and start again from the top.
    pub fn retrigger(&mut self) {
        self.stop();
        self.position = 0;
        self.playing = true;
    }

    /// Stop immediately.
    pub fn stop(&mut self) {
        self.playing = false;
    }

    /// Render one mono sample, reading from the given sample.
    pub fn render(&mut self, sample: &Sample) -> f32 {
        if !self.playing {
            return 0.0;
        }

        let value = sample.data.get_mono_interpolated(self.position) as f32 / 32768.0;
        self.position += self.increment;
        if (self.position >> 16) as usize >= sample.len() {
            self.playing = false;
        }
        value * self.gain
    }
}

/// 32.16 step that plays a `source_rate` sample at `output_rate`.
pub fn rate_to_increment(source_rate: u32, output_rate: u32) -> u64 {
    if output_rate == 0 {
        return 0;
    }
    ((source_rate as u64) << 16) / output_rate as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use wwv_ir::SampleData;

    fn test_sample(data: Vec<i16>, rate: u32) -> Sample {
        let mut s = Sample::new("test", rate);
        s.data = SampleData::Mono16(data);
        s
    }

    #[test]
    fn new_voice_is_silent() {
        let sample = test_sample(vec![16384; 10], 48_000);
        let mut voice = Voice::new(&sample, 48_000, 1.0);
        assert_eq!(voice.render(&sample), 0.0);
    }

    #[test]
    fn retrigger_plays_from_start() {
        let sample = test_sample(vec![16384, 0, 0, 0], 48_000);
        let mut voice = Voice::new(&sample, 48_000, 1.0);
        voice.retrigger();
        assert!((voice.render(&sample) - 0.5).abs() < 1e-4);
        voice.render(&sample);

        voice.retrigger();
        assert_eq!(voice.position, 0);
        assert!((voice.render(&sample) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn stops_at_sample_end() {
        let sample = test_sample(vec![1000; 3], 48_000);
        let mut voice = Voice::new(&sample, 48_000, 1.0);
        voice.retrigger();
        for _ in 0..3 {
            voice.render(&sample);
        }
        assert!(!voice.playing);
        assert_eq!(voice.render(&sample), 0.0);
    }

    #[test]
    fn resamples_to_output_rate() {
        assert_eq!(rate_to_increment(48_000, 48_000), 1 << 16);
        assert_eq!(rate_to_increment(24_000, 48_000), 1 << 15);
    }

    #[test]
    fn half_rate_source_lasts_twice_as_long() {
        let sample = test_sample(vec![1000; 100], 24_000);
        let mut voice = Voice::new(&sample, 48_000, 1.0);
        voice.retrigger();
        let mut rendered = 0;
        while voice.playing {
            voice.render(&sample);
            rendered += 1;
        }
        assert_eq!(rendered, 200);
    }

    #[test]
    fn gain_scales_output() {
        let sample = test_sample(vec![16384; 4], 48_000);
        let mut voice = Voice::new(&sample, 48_000, 0.5);
        voice.retrigger();
        assert!((voice.render(&sample) - 0.25).abs() < 1e-4);
    }
}
