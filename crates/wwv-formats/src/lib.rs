//! File formats for wwv-sim.
//!
//! Reads the symbol sound assets and writes offline renders as WAV.

mod sound_assets;
mod wav_format;

use std::path::PathBuf;
use thiserror::Error;

pub use sound_assets::{asset_file_name, load_sound_bank, ASSET_FILES};
pub use wav_format::{frames_to_wav, load_wav, load_wav_file, write_wav, write_wav_file};

/// Error type for format parsing.
#[derive(Debug, Error)]
pub enum FormatError {
    /// Invalid file header or magic bytes
    #[error("invalid file header")]
    InvalidHeader,
    /// Unexpected end of file
    #[error("unexpected end of file")]
    UnexpectedEof,
    /// Unsupported encoding
    #[error("unsupported format: {0}")]
    Unsupported(String),
    /// A required sound asset is not on disk
    #[error("missing asset {}", .0.display())]
    MissingAsset(PathBuf),
    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for FormatError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => FormatError::UnexpectedEof,
            binrw::Error::Io(e) => FormatError::Io(e),
            _ => FormatError::InvalidHeader,
        }
    }
}
