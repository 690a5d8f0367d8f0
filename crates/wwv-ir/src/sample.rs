//! Sample data types.

use alloc::vec::Vec;
use arrayvec::ArrayString;

/// A recorded or synthesized sound.
#[derive(Clone, Debug)]
pub struct Sample {
    /// Sample name
    pub name: ArrayString<32>,
    /// Audio data
    pub data: SampleData,
    /// Native sample rate in Hz
    pub sample_rate: u32,
}

impl Sample {
    /// Create a new empty sample.
    pub fn new(name: &str, sample_rate: u32) -> Self {
        let mut sample = Self {
            name: ArrayString::new(),
            data: SampleData::Mono16(Vec::new()),
            sample_rate,
        };
        let _ = sample.name.try_push_str(name);
        sample
    }

    /// Get the length of the sample in frames.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sample has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.len() as f32 / self.sample_rate as f32
    }
}

/// Sample audio data.
#[derive(Clone, Debug)]
pub enum SampleData {
    /// 8-bit mono samples
    Mono8(Vec<i8>),
    /// 16-bit mono samples
    Mono16(Vec<i16>),
    /// 8-bit stereo samples (left, right)
    Stereo8(Vec<i8>, Vec<i8>),
    /// 16-bit stereo samples (left, right)
    Stereo16(Vec<i16>, Vec<i16>),
}

impl SampleData {
    /// Get the number of sample frames.
    pub fn len(&self) -> usize {
        match self {
            SampleData::Mono8(v) => v.len(),
            SampleData::Mono16(v) => v.len(),
            SampleData::Stereo8(l, _) => l.len(),
            SampleData::Stereo16(l, _) => l.len(),
        }
    }

    /// Returns true if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mono value at `pos` as i16. Stereo data is averaged.
    pub fn get_mono(&self, pos: usize) -> i16 {
        match self {
            SampleData::Mono8(v) => v.get(pos).copied().unwrap_or(0) as i16 * 256,
            SampleData::Mono16(v) => v.get(pos).copied().unwrap_or(0),
            SampleData::Stereo8(l, r) => {
                let sum = l.get(pos).copied().unwrap_or(0) as i16 + r.get(pos).copied().unwrap_or(0) as i16;
                sum * 128
            }
            SampleData::Stereo16(l, r) => {
                let sum = l.get(pos).copied().unwrap_or(0) as i32 + r.get(pos).copied().unwrap_or(0) as i32;
                (sum / 2) as i16
            }
        }
    }

    /// Get a linearly interpolated mono sample value.
    ///
    /// `pos_fixed` is a 32.16 fixed-point position. Blends between the two
    /// nearest sample values using the fractional part.
    pub fn get_mono_interpolated(&self, pos_fixed: u64) -> i16 {
        let idx = (pos_fixed >> 16) as usize;
        let frac = (pos_fixed & 0xFFFF) as i64;

        let a = self.get_mono(idx) as i64;
        let b = self.get_mono(idx + 1) as i64;

        (a + (((b - a) * frac) >> 16)) as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn interpolated_at_integer_matches_nearest() {
        let data = SampleData::Mono8(vec![0, 100, -50, 30]);
        assert_eq!(data.get_mono_interpolated(1 << 16), data.get_mono(1));
    }

    #[test]
    fn interpolated_midpoint_averages_neighbors() {
        let data = SampleData::Mono16(vec![0, 1000]);
        assert_eq!(data.get_mono_interpolated(32768), 500);
    }

    #[test]
    fn out_of_range_reads_silence() {
        let data = SampleData::Mono16(vec![1000]);
        assert_eq!(data.get_mono(5), 0);
    }

    #[test]
    fn stereo_is_averaged_to_mono() {
        let data = SampleData::Stereo16(vec![1000, -1000], vec![3000, -3000]);
        assert_eq!(data.get_mono(0), 2000);
        assert_eq!(data.get_mono(1), -2000);
    }

    #[test]
    fn duration_from_rate() {
        let mut s = Sample::new("zero", 8000);
        s.data = SampleData::Mono16(vec![0; 1600]);
        assert!((s.duration_secs() - 0.2).abs() < 1e-6);
    }
}
