//! Session configuration loaded from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use wwv_engine::{EngineConfig, EnvelopeShape, RenderMode};
use wwv_ir::TransportTime;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML in {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which playback variant renders the time code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Trigger,
    Envelope,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Trigger => RenderMode::Trigger,
            Mode::Envelope => RenderMode::Envelope,
        }
    }
}

/// Sub-carrier pulse settings. Times are milliseconds from the slot boundary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnvelopeConfig {
    pub carrier_hz: f32,
    pub rise_ms: u64,
    pub zero_ms: u64,
    pub one_ms: u64,
    pub marker_ms: u64,
    pub high: f32,
    pub floor: f32,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        let shape = EnvelopeShape::default();
        Self {
            carrier_hz: wwv_engine::DEFAULT_CARRIER_HZ,
            rise_ms: shape.rise_ms,
            zero_ms: shape.zero_ms,
            one_ms: shape.one_ms,
            marker_ms: shape.marker_ms,
            high: shape.high,
            floor: shape.floor,
        }
    }
}

impl EnvelopeConfig {
    pub fn shape(&self) -> EnvelopeShape {
        EnvelopeShape {
            rise_ms: self.rise_ms,
            zero_ms: self.zero_ms,
            one_ms: self.one_ms,
            marker_ms: self.marker_ms,
            high: self.high,
            floor: self.floor,
        }
    }
}

/// Top-level settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub mode: Mode,
    /// Output rate for offline rendering (Hz)
    pub sample_rate: u32,
    /// Directory holding `digital_{zero,one,marker}.wav`. Synthesized
    /// bursts are used when unset.
    pub asset_dir: Option<PathBuf>,
    pub start_offset_ms: u64,
    pub align_to_minute: bool,
    pub trigger_gain: f32,
    pub envelope: EnvelopeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Trigger,
            sample_rate: 48_000,
            asset_dir: None,
            start_offset_ms: 100,
            align_to_minute: false,
            trigger_gain: 0.8,
            envelope: EnvelopeConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let env = &self.envelope;
        if self.sample_rate == 0 {
            return Err(ConfigError::Invalid("sample_rate must be positive".into()));
        }
        if !(env.rise_ms < env.zero_ms && env.zero_ms < env.one_ms && env.one_ms < env.marker_ms) {
            return Err(ConfigError::Invalid(
                "envelope times must satisfy rise < zero < one < marker".into(),
            ));
        }
        if env.marker_ms >= 1000 {
            return Err(ConfigError::Invalid("marker pulse must end within its second".into()));
        }
        for (name, gain) in [("high", env.high), ("floor", env.floor), ("trigger_gain", self.trigger_gain)] {
            if !(0.0..=1.0).contains(&gain) {
                return Err(ConfigError::Invalid(format!("{name} must be within 0.0..=1.0")));
            }
        }
        if env.floor >= env.high {
            return Err(ConfigError::Invalid("envelope floor must be below high".into()));
        }
        if env.carrier_hz <= 0.0 {
            return Err(ConfigError::Invalid("carrier_hz must be positive".into()));
        }
        Ok(())
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mode: self.mode.into(),
            shape: self.envelope.shape(),
            carrier_hz: self.envelope.carrier_hz,
            trigger_gain: self.trigger_gain,
            start_offset: TransportTime::from_millis(self.start_offset_ms),
            align_to_minute: self.align_to_minute,
        }
    }
}
