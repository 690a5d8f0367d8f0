//! Symbol sound assets on disk.

use std::io::ErrorKind;
use std::path::Path;

use tracing::debug;
use wwv_engine::SoundBank;
use wwv_ir::SoundId;

use crate::wav_format::load_wav;
use crate::FormatError;

/// Asset file names in `SoundId::ALL` order.
pub const ASSET_FILES: [&str; 3] = ["digital_zero.wav", "digital_one.wav", "digital_marker.wav"];

pub fn asset_file_name(sound: SoundId) -> &'static str {
    ASSET_FILES[sound.index()]
}

/// Load all three symbol sounds from `dir`.
pub fn load_sound_bank(dir: &Path) -> Result<SoundBank, FormatError> {
    let [zero, one, marker] = SoundId::ALL.map(|sound| dir.join(asset_file_name(sound)));
    Ok(SoundBank::new(
        load_asset(&zero, SoundId::Zero)?,
        load_asset(&one, SoundId::One)?,
        load_asset(&marker, SoundId::Marker)?,
    ))
}

fn load_asset(path: &Path, sound: SoundId) -> Result<wwv_ir::Sample, FormatError> {
    let data = std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FormatError::MissingAsset(path.to_path_buf()),
        _ => FormatError::Io(e),
    })?;
    let sample = load_wav(&data, sound.name())?;
    debug!(
        path = %path.display(),
        frames = sample.len(),
        rate = sample.sample_rate,
        "loaded sound asset"
    );
    Ok(sample)
}
