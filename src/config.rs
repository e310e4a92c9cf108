use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::catalog::DEFAULT_RANDOM_GAME_SIZE;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Words in an A-Z game (capped by the catalog size)
    pub random_word_count: usize,
    pub speech_enabled: bool,
    /// Text-to-speech program to use instead of auto-detection
    pub speech_command: Option<String>,
    /// Speaking rate as a multiple of the program default
    pub speech_rate: f32,
    /// Voice pitch as a multiple of the program default
    pub speech_pitch: f32,
    pub sound_enabled: bool,
    /// Audio player to use instead of auto-detection
    pub sound_command: Option<String>,
    /// Directory with the cue files; defaults to the app data dir
    pub sound_dir: Option<PathBuf>,
    pub sound_volume: f32,
    /// Ring the terminal bell on wrong answers when no audio player works
    pub bell_fallback: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            random_word_count: DEFAULT_RANDOM_GAME_SIZE,
            speech_enabled: true,
            speech_command: None,
            speech_rate: 0.9,
            speech_pitch: 1.2,
            sound_enabled: true,
            sound_command: None,
            sound_dir: None,
            sound_volume: 0.5,
            bell_fallback: true,
        }
    }
}

impl Config {
    pub fn sound_dir(&self) -> Option<PathBuf> {
        self.sound_dir.clone().or_else(AppDirs::sound_dir)
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> std::io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: AppDirs::config_path(),
        }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(_) => return Config::default(),
        };
        match serde_json::from_slice::<Config>(&bytes) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!(
                    "ignoring unreadable config {}: {e}",
                    self.path.display()
                );
                Config::default()
            }
        }
    }

    fn save(&self, cfg: &Config) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)
    }
}
