//! Background loading of the symbol sounds.

use std::path::PathBuf;
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::time::Duration;

use tracing::{error, info};
use wwv_engine::SoundBank;

#[derive(Debug)]
enum LoadState {
    Loading,
    Ready(SoundBank),
    Failed(String),
}

#[derive(Debug)]
struct Shared {
    state: Mutex<LoadState>,
    ready: Condvar,
}

/// Loads the sound bank off the calling thread and signals when it is ready.
///
/// A failed load never becomes ready; `wait_timeout` keeps returning `None`.
#[derive(Clone, Debug)]
pub struct AssetLoader {
    shared: Arc<Shared>,
}

impl AssetLoader {
    /// Start loading `dir` on a background thread.
    pub fn spawn(dir: PathBuf) -> Self {
        let loader = Self::with_state(LoadState::Loading);
        let shared = loader.shared.clone();

        std::thread::spawn(move || {
            let result = wwv_formats::load_sound_bank(&dir);
            let mut state = lock(&shared);
            *state = match result {
                Ok(bank) => {
                    info!(dir = %dir.display(), "sound assets loaded");
                    LoadState::Ready(bank)
                }
                Err(err) => {
                    error!(dir = %dir.display(), %err, "failed to load sound assets");
                    LoadState::Failed(err.to_string())
                }
            };
            shared.ready.notify_all();
        });

        loader
    }

    /// A loader that is ready immediately.
    pub fn ready(bank: SoundBank) -> Self {
        Self::with_state(LoadState::Ready(bank))
    }

    fn with_state(state: LoadState) -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(state),
                ready: Condvar::new(),
            }),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(*lock(&self.shared), LoadState::Ready(_))
    }

    /// The load error, if loading failed.
    pub fn error(&self) -> Option<String> {
        match &*lock(&self.shared) {
            LoadState::Failed(msg) => Some(msg.clone()),
            _ => None,
        }
    }

    /// Block until the bank is ready.
    pub fn wait(&self) -> SoundBank {
        let mut state = lock(&self.shared);
        loop {
            if let LoadState::Ready(bank) = &*state {
                return bank.clone();
            }
            state = self
                .shared
                .ready
                .wait(state)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
    }

    /// Wait up to `timeout` for the bank.
    pub fn wait_timeout(&self, timeout: Duration) -> Option<SoundBank> {
        let state = lock(&self.shared);
        let (state, _) = self
            .shared
            .ready
            .wait_timeout_while(state, timeout, |s| !matches!(s, LoadState::Ready(_)))
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match &*state {
            LoadState::Ready(bank) => Some(bank.clone()),
            _ => None,
        }
    }
}

fn lock(shared: &Shared) -> MutexGuard<'_, LoadState> {
    shared.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wwv_engine::Frame;
    use wwv_formats::{asset_file_name, write_wav_file};
    use wwv_ir::SoundId;

    #[test]
    fn ready_loader_returns_immediately() {
        let loader = AssetLoader::ready(SoundBank::synthesized(8000, 100.0));
        assert!(loader.is_ready());
        assert_eq!(loader.wait().get(SoundId::One).len(), 4000);
    }

    #[test]
    fn loads_directory_in_background() {
        let dir = tempfile::tempdir().unwrap();
        for sound in SoundId::ALL {
            let frames = vec![Frame::mono(1000); 80];
            write_wav_file(&dir.path().join(asset_file_name(sound)), &frames, 8000).unwrap();
        }

        let loader = AssetLoader::spawn(dir.path().to_path_buf());
        let bank = loader.wait_timeout(Duration::from_secs(5)).unwrap();
        assert!(loader.is_ready());
        assert_eq!(bank.get(SoundId::Marker).len(), 80);
    }

    #[test]
    fn failed_load_never_becomes_ready() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::spawn(dir.path().to_path_buf());

        assert!(loader.wait_timeout(Duration::from_millis(200)).is_none());
        assert!(!loader.is_ready());
        let msg = loader.error().unwrap();
        assert!(msg.contains("digital_zero.wav"), "{msg}");
    }
}
