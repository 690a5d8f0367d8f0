//! Audio output trait and error types.

use thiserror::Error;
use wwv_engine::Frame;

/// Error type for audio operations.
#[derive(Debug, Error)]
pub enum AudioError {
    /// Failed to initialize audio device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Playback error
    #[error("playback error: {0}")]
    Playback(String),
    /// No audio device available
    #[error("no audio device available")]
    NoDevice,
}

/// Trait for audio output backends.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Write one frame, blocking until the backend has room for it.
    fn write_frame(&mut self, frame: Frame);

    /// Write frames to the output (blocking).
    fn write(&mut self, frames: &[Frame]) {
        for frame in frames {
            self.write_frame(*frame);
        }
    }

    /// Start playback.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Stop playback.
    fn stop(&mut self) -> Result<(), AudioError>;
}
