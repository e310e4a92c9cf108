use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "spellbee";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    fn project() -> Option<ProjectDirs> {
        ProjectDirs::from("", "", APP_NAME)
    }

    pub fn config_path() -> PathBuf {
        match Self::project() {
            Some(pd) => pd.config_dir().join("config.json"),
            None => PathBuf::from("spellbee_config.json"),
        }
    }

    /// Where the log file goes; the terminal itself belongs to the TUI.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("spellbee.log"))
        } else {
            Self::project().map(|pd| pd.data_local_dir().join("spellbee.log"))
        }
    }

    /// Default directory holding `click.wav`, `correct.wav` and `incorrect.wav`.
    pub fn sound_dir() -> Option<PathBuf> {
        Self::project().map(|pd| pd.data_dir().join("sounds"))
    }
}
