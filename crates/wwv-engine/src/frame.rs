//! Audio frame type.

/// A stereo audio frame (16-bit integer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Frame {
    pub left: i16,
    pub right: i16,
}

impl Frame {
    /// Create a silent frame.
    pub const fn silence() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Create a mono frame (same value for both channels).
    pub const fn mono(value: i16) -> Self {
        Self {
            left: value,
            right: value,
        }
    }

    /// Mono frame from a float signal in -1.0..=1.0 (clamped).
    pub fn from_f32(value: f32) -> Self {
        let scaled = (value * 32767.0).clamp(-32768.0, 32767.0);
        Self::mono(scaled as i16)
    }

    /// True if both channels are zero.
    pub fn is_silent(&self) -> bool {
        self.left == 0 && self.right == 0
    }

    /// Largest absolute channel value.
    pub fn peak(&self) -> i16 {
        self.left.saturating_abs().max(self.right.saturating_abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f32_clamps() {
        assert_eq!(Frame::from_f32(2.0), Frame::mono(32767));
        assert_eq!(Frame::from_f32(-2.0), Frame::mono(-32768));
        assert_eq!(Frame::from_f32(0.0), Frame::silence());
    }

    #[test]
    fn peak_handles_min() {
        assert_eq!(Frame::mono(i16::MIN).peak(), i16::MAX);
    }
}
