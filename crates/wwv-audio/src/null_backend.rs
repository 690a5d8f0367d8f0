//! Output that discards audio, paced to real time.

use std::time::{Duration, Instant};

use wwv_engine::Frame;

use crate::traits::{AudioError, AudioOutput};

/// Discards every frame. Optionally sleeps so frames are consumed at the
/// sample rate, like a device would.
#[derive(Debug)]
pub struct NullOutput {
    sample_rate: u32,
    realtime: bool,
    written: u64,
    peak: i16,
    started_at: Option<Instant>,
}

impl NullOutput {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            realtime: true,
            written: 0,
            peak: 0,
            started_at: None,
        }
    }

    /// Consume frames as fast as they are written.
    pub fn unpaced(sample_rate: u32) -> Self {
        Self {
            realtime: false,
            ..Self::new(sample_rate)
        }
    }

    /// Frames written since creation.
    pub fn frames_written(&self) -> u64 {
        self.written
    }

    /// Loudest sample written so far.
    pub fn peak(&self) -> i16 {
        self.peak
    }

    fn pace(&mut self) {
        let Some(started_at) = self.started_at else { return };
        if self.sample_rate == 0 {
            return;
        }
        let due = Duration::from_secs_f64(self.written as f64 / self.sample_rate as f64);
        let elapsed = started_at.elapsed();
        if due > elapsed {
            std::thread::sleep(due - elapsed);
        }
    }
}

impl AudioOutput for NullOutput {
    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn write_frame(&mut self, frame: Frame) {
        self.written += 1;
        self.peak = self.peak.max(frame.peak());
        // 10 ms blocks
        if self.realtime && self.written % (self.sample_rate as u64 / 100).max(1) == 0 {
            self.pace();
        }
    }

    fn start(&mut self) -> Result<(), AudioError> {
        self.started_at = Some(Instant::now());
        self.written = 0;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.started_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_tracks_peak() {
        let mut out = NullOutput::unpaced(8000);
        out.start().unwrap();
        out.write(&[Frame::mono(100), Frame::mono(-3000), Frame::silence()]);
        assert_eq!(out.frames_written(), 3);
        assert_eq!(out.peak(), 3000);
    }

    #[test]
    fn paced_output_takes_real_time() {
        let mut out = NullOutput::new(1000);
        out.start().unwrap();
        let begin = Instant::now();
        out.write(&[Frame::silence(); 50]);
        assert!(begin.elapsed() >= Duration::from_millis(40));
    }
}
