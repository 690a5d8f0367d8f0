//! Session controller for wwv-sim.
//!
//! Owns the start/stop toggle, runs the engine on an audio thread and
//! renders offline to WAV. Both the interactive console and the offline
//! commands go through `Controller`.

mod assets;
mod config;

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use time::OffsetDateTime;
use tracing::{error, info, warn};
use wwv_audio::{AudioError, AudioOutput, CpalOutput, NullOutput};
use wwv_engine::{AnchoredClock, Engine, EngineConfig, SoundBank, SystemClock};

pub use assets::AssetLoader;
pub use config::{Config, ConfigError, EnvelopeConfig, Mode};
pub use wwv_engine::Frame;
pub use wwv_formats::FormatError;
pub use wwv_ir::{encode_frame, TimeFrame, TransportTime};

/// Tone of the synthesized fallback sounds (Hz).
const SYNTH_TONE_HZ: f32 = 100.0;

/// Playback session state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Stopped,
    Running,
}

/// Where real-time audio goes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputKind {
    /// Default cpal output device
    #[default]
    Device,
    /// Discard audio, paced to real time
    Null,
}

/// Two-state playback controller.
pub struct Controller {
    config: Config,
    output: OutputKind,
    assets: AssetLoader,
    state: SessionState,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    stop_signal: Arc<AtomicBool>,
    rolling: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
    thread: Option<JoinHandle<()>>,
}

impl Controller {
    /// Create a stopped controller. Asset loading starts immediately.
    pub fn new(config: Config, output: OutputKind) -> Self {
        let assets = match &config.asset_dir {
            Some(dir) => AssetLoader::spawn(dir.clone()),
            None => AssetLoader::ready(SoundBank::synthesized(config.sample_rate, SYNTH_TONE_HZ)),
        };
        Self::with_assets(config, output, assets)
    }

    pub fn with_assets(config: Config, output: OutputKind, assets: AssetLoader) -> Self {
        Self {
            config,
            output,
            assets,
            state: SessionState::Stopped,
            playback: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn assets(&self) -> &AssetLoader {
        &self.assets
    }

    // --- Session ---

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Control text for the current state.
    pub fn label(&self) -> &'static str {
        match self.state {
            SessionState::Stopped => "Start",
            SessionState::Running => "Stop",
        }
    }

    /// Perform whichever transition applies.
    pub fn toggle(&mut self) -> SessionState {
        match self.state {
            SessionState::Stopped => self.start(),
            SessionState::Running => self.stop(),
        }
        self.state
    }

    /// `Stopped -> Running`. No-op when already running.
    pub fn start(&mut self) {
        if self.state == SessionState::Running {
            return;
        }

        let stop_signal = Arc::new(AtomicBool::new(false));
        let rolling = Arc::new(AtomicBool::new(false));
        let frames = Arc::new(AtomicU64::new(0));

        let session = Session {
            output: self.output,
            engine_config: self.config.engine_config(),
            assets: self.assets.clone(),
            sample_rate: self.config.sample_rate,
            stop_signal: stop_signal.clone(),
            rolling: rolling.clone(),
            frames: frames.clone(),
        };
        let thread = std::thread::Builder::new()
            .name("wwv-audio".into())
            .spawn(move || session.run());

        let thread = match thread {
            Ok(handle) => Some(handle),
            Err(err) => {
                error!(%err, "failed to spawn audio thread");
                None
            }
        };

        self.playback = Some(PlaybackHandle {
            stop_signal,
            rolling,
            frames,
            thread,
        });
        self.state = SessionState::Running;
        info!(mode = ?self.config.mode, "session running");
    }

    /// `Running -> Stopped`. No-op when already stopped.
    pub fn stop(&mut self) {
        if self.state == SessionState::Stopped {
            return;
        }
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Relaxed);
            if let Some(handle) = pb.thread.take() {
                let _ = handle.join();
            }
        }
        self.state = SessionState::Stopped;
        info!("session stopped");
    }

    /// Whether the engine is producing audio (assets ready, output open).
    pub fn is_rolling(&self) -> bool {
        self.playback
            .as_ref()
            .is_some_and(|p| p.rolling.load(Ordering::Relaxed))
    }

    /// Frames written to the output in this session.
    pub fn frames_rendered(&self) -> u64 {
        self.playback
            .as_ref()
            .map_or(0, |p| p.frames.load(Ordering::Relaxed))
    }

    // --- Offline rendering ---

    /// Render `count` frames with slot 0 of the first minute at sample 0,
    /// encoding the time from `start` onward.
    pub fn render_frames(&self, start: OffsetDateTime, sample_rate: u32, count: usize) -> Result<Vec<Frame>, FormatError> {
        let bank = match &self.config.asset_dir {
            Some(dir) => wwv_formats::load_sound_bank(dir)?,
            None => SoundBank::synthesized(sample_rate, SYNTH_TONE_HZ),
        };
        let config = EngineConfig {
            start_offset: TransportTime::zero(),
            align_to_minute: false,
            ..self.config.engine_config()
        };

        let mut engine = Engine::new(config, bank, Box::new(AnchoredClock::new(start)), sample_rate);
        engine.start();
        Ok(engine.render_frames(count))
    }

    pub fn render_to_wav(&self, start: OffsetDateTime, sample_rate: u32, seconds: u32) -> Result<Vec<u8>, FormatError> {
        let frames = self.render_frames(start, sample_rate, (sample_rate as usize) * seconds as usize)?;
        wwv_formats::frames_to_wav(&frames, sample_rate)
    }

    pub fn render_to_wav_file(
        &self,
        path: &Path,
        start: OffsetDateTime,
        sample_rate: u32,
        seconds: u32,
    ) -> Result<(), FormatError> {
        let frames = self.render_frames(start, sample_rate, (sample_rate as usize) * seconds as usize)?;
        wwv_formats::write_wav_file(path, &frames, sample_rate)?;
        info!(path = %path.display(), seconds, "wrote render");
        Ok(())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Everything the audio thread owns.
struct Session {
    output: OutputKind,
    engine_config: EngineConfig,
    assets: AssetLoader,
    sample_rate: u32,
    stop_signal: Arc<AtomicBool>,
    rolling: Arc<AtomicBool>,
    frames: Arc<AtomicU64>,
}

impl Session {
    fn run(self) {
        let mut output = match self.open_output() {
            Ok(output) => output,
            Err(err) => {
                error!(%err, "audio output unavailable");
                return;
            }
        };

        let Some(bank) = self.wait_for_assets() else { return };

        let sample_rate = output.sample_rate();
        let mut engine = Engine::new(self.engine_config, bank, Box::new(SystemClock), sample_rate);
        engine.start();

        if let Err(err) = output.start() {
            error!(%err, "failed to start output");
            return;
        }
        self.rolling.store(true, Ordering::Relaxed);

        // 10 ms blocks between stop checks
        let block = (sample_rate / 100).max(1) as u64;
        let mut written: u64 = 0;
        while !self.stop_signal.load(Ordering::Relaxed) {
            for _ in 0..block {
                output.write_frame(engine.render_frame());
            }
            written += block;
            self.frames.store(written, Ordering::Relaxed);
        }

        engine.stop();
        for _ in 0..block {
            output.write_frame(Frame::silence());
        }
        self.rolling.store(false, Ordering::Relaxed);
        if let Err(err) = output.stop() {
            warn!(%err, "failed to stop output");
        }
    }

    fn open_output(&self) -> Result<Box<dyn AudioOutput>, AudioError> {
        Ok(match self.output {
            OutputKind::Device => Box::new(CpalOutput::open()?),
            OutputKind::Null => Box::new(NullOutput::new(self.sample_rate)),
        })
    }

    /// Poll for the sound bank until it is ready or the session is stopped.
    fn wait_for_assets(&self) -> Option<SoundBank> {
        let mut reported = false;
        while !self.stop_signal.load(Ordering::Relaxed) {
            if let Some(bank) = self.assets.wait_timeout(Duration::from_millis(50)) {
                return Some(bank);
            }
            if !reported && self.assets.error().is_some() {
                warn!("sound assets failed to load; session stays silent until stopped");
                reported = true;
            }
        }
        None
    }
}
