//! Transport time representation.
//!
//! `TransportTime` counts seconds from transport start with an exact
//! sub-second fraction, so slot offsets and pulse edges can be expressed
//! without floating point drift over long sessions.

/// Subdivisions per second. LCM(44100, 48000) = 7_056_000, which also
/// divides evenly by 1000, 16000, 22050 and 88200.
pub const SUB_SECOND_UNIT: u32 = 7_056_000;

const SUB_PER_MILLI: u32 = SUB_SECOND_UNIT / 1000;

/// A position on the transport timeline (seconds + fractional sub-second).
///
/// Ordering: second is primary, sub_second is secondary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TransportTime {
    /// Whole seconds from transport start
    pub second: u64,
    /// Fraction of a second: 0..SUB_SECOND_UNIT
    pub sub_second: u32,
}

impl TransportTime {
    /// The transport origin.
    pub const fn zero() -> Self {
        Self { second: 0, sub_second: 0 }
    }

    /// Create a time at an exact second boundary.
    pub const fn from_seconds(second: u64) -> Self {
        Self { second, sub_second: 0 }
    }

    /// Create a time from milliseconds.
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            second: millis / 1000,
            sub_second: (millis % 1000) as u32 * SUB_PER_MILLI,
        }
    }

    /// Advance by whole seconds.
    pub const fn add_seconds(self, seconds: u64) -> Self {
        Self {
            second: self.second + seconds,
            sub_second: self.sub_second,
        }
    }

    /// Advance by milliseconds.
    pub fn add_millis(self, millis: u64) -> Self {
        let total_sub = self.sub_second as u64 + (millis % 1000) * SUB_PER_MILLI as u64;
        Self {
            second: self.second + millis / 1000 + total_sub / SUB_SECOND_UNIT as u64,
            sub_second: (total_sub % SUB_SECOND_UNIT as u64) as u32,
        }
    }

    /// Sample index of this time at `sample_rate` (rounded down).
    pub fn to_samples(self, sample_rate: u32) -> u64 {
        let base = self.second * sample_rate as u64;
        let frac = self.sub_second as u64 * sample_rate as u64 / SUB_SECOND_UNIT as u64;
        base + frac
    }

    /// The transport time of sample `samples` at `sample_rate`.
    pub fn from_samples(samples: u64, sample_rate: u32) -> Self {
        if sample_rate == 0 {
            return Self::zero();
        }
        let rate = sample_rate as u64;
        Self {
            second: samples / rate,
            sub_second: ((samples % rate) * SUB_SECOND_UNIT as u64 / rate) as u32,
        }
    }

    /// Seconds as floating point, for display.
    pub fn as_secs_f64(self) -> f64 {
        self.second as f64 + self.sub_second as f64 / SUB_SECOND_UNIT as f64
    }
}
