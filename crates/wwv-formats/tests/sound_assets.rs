use std::path::Path;

use wwv_engine::{tone_burst, Frame};
use wwv_formats::{asset_file_name, load_sound_bank, write_wav_file, FormatError};
use wwv_ir::{SampleData, SoundId};

/// Write a mono tone as a stereo 16-bit asset file.
fn write_asset(dir: &Path, sound: SoundId, millis: u32) {
    let burst = tone_burst(sound.name(), 8000, 100.0, millis);
    let frames: Vec<Frame> = (0..burst.len()).map(|i| Frame::mono(burst.data.get_mono(i))).collect();
    write_wav_file(&dir.join(asset_file_name(sound)), &frames, 8000).unwrap();
}

#[test]
fn loads_all_three_assets() {
    let dir = tempfile::tempdir().unwrap();
    write_asset(dir.path(), SoundId::Zero, 200);
    write_asset(dir.path(), SoundId::One, 500);
    write_asset(dir.path(), SoundId::Marker, 800);

    let bank = load_sound_bank(dir.path()).unwrap();
    assert_eq!(bank.get(SoundId::Zero).len(), 1600);
    assert_eq!(bank.get(SoundId::One).len(), 4000);
    assert_eq!(bank.get(SoundId::Marker).len(), 6400);
    assert_eq!(bank.get(SoundId::One).name.as_str(), "one");
    assert_eq!(bank.get(SoundId::Marker).sample_rate, 8000);
    assert!(matches!(bank.get(SoundId::Zero).data, SampleData::Stereo16(..)));
}

#[test]
fn missing_asset_is_reported_by_path() {
    let dir = tempfile::tempdir().unwrap();
    write_asset(dir.path(), SoundId::Zero, 200);
    write_asset(dir.path(), SoundId::Marker, 800);

    match load_sound_bank(dir.path()) {
        Err(FormatError::MissingAsset(path)) => {
            assert_eq!(path, dir.path().join("digital_one.wav"));
        }
        other => panic!("expected MissingAsset, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn corrupt_asset_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    for sound in SoundId::ALL {
        std::fs::write(dir.path().join(asset_file_name(sound)), b"definitely not a wav file, but long enough to parse")
            .unwrap();
    }
    assert!(matches!(load_sound_bank(dir.path()), Err(FormatError::InvalidHeader)));
}
