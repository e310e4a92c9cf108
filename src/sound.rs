use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::util::{first_available, find_on_path};

/// Short fixed audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum SoundCue {
    #[strum(serialize = "click")]
    Click,
    #[strum(serialize = "correct")]
    Correct,
    #[strum(serialize = "incorrect")]
    Incorrect,
}

impl SoundCue {
    /// Asset file name for the cue inside the sound directory
    pub fn file_name(&self) -> String {
        format!("{self}.wav")
    }
}

/// Plays sound cues. Best effort: failures are logged by the implementation
/// and never reach the caller.
pub trait SoundPlayer: Send {
    fn play(&self, cue: SoundCue);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSound;

impl SoundPlayer for SilentSound {
    fn play(&self, _cue: SoundCue) {}
}

/// Rings the terminal bell on a wrong answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct BellSound;

impl SoundPlayer for BellSound {
    fn play(&self, cue: SoundCue) {
        if cue != SoundCue::Incorrect {
            return;
        }
        let mut stdout = io::stdout();
        if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
            log::debug!("terminal bell failed: {e}");
        }
    }
}

/// Audio players we can hand a file to
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum PlayerProgram {
    #[strum(serialize = "paplay")]
    Paplay,
    #[strum(serialize = "afplay")]
    Afplay,
    #[strum(serialize = "aplay")]
    Aplay,
}

impl PlayerProgram {
    const PROBE_ORDER: [PlayerProgram; 3] = [
        PlayerProgram::Paplay,
        PlayerProgram::Afplay,
        PlayerProgram::Aplay,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let file_name = Path::new(name).file_name()?.to_str()?;
        Self::PROBE_ORDER
            .into_iter()
            .find(|p| p.to_string() == file_name)
    }

    /// Arguments to play `asset` at `volume` (0.0..=1.0).
    pub fn args(&self, asset: &Path, volume: f32) -> Vec<String> {
        let volume = volume.clamp(0.0, 1.0);
        let asset = asset.display().to_string();
        match self {
            // paplay volume is linear in 0..=65536
            PlayerProgram::Paplay => vec![
                format!("--volume={}", (volume * 65536.0).round() as u32),
                asset,
            ],
            PlayerProgram::Afplay => vec!["-v".into(), format!("{volume:.2}"), asset],
            // aplay has no volume control
            PlayerProgram::Aplay => vec!["-q".into(), asset],
        }
    }
}

/// Plays cue files from a directory through an external audio player
#[derive(Debug, Clone)]
pub struct CommandSoundPlayer {
    program: PlayerProgram,
    path: PathBuf,
    asset_dir: PathBuf,
    volume: f32,
}

impl CommandSoundPlayer {
    pub fn new(program: PlayerProgram, path: PathBuf, asset_dir: PathBuf, volume: f32) -> Self {
        Self {
            program,
            path,
            asset_dir,
            volume,
        }
    }

    pub fn detect(override_program: Option<&str>, asset_dir: PathBuf, volume: f32) -> Option<Self> {
        let (program, path) = match override_program {
            Some(name) => (PlayerProgram::from_name(name)?, find_on_path(name)?),
            None => {
                let names = PlayerProgram::PROBE_ORDER.map(|p| p.to_string());
                let names: Vec<&str> = names.iter().map(String::as_str).collect();
                let (name, path) = first_available(&names)?;
                (PlayerProgram::from_name(name)?, path)
            }
        };
        log::info!(
            "using {program} for sound cues from {}",
            asset_dir.display()
        );
        Some(Self::new(program, path, asset_dir, volume))
    }

    pub fn asset_path(&self, cue: SoundCue) -> PathBuf {
        self.asset_dir.join(cue.file_name())
    }
}

impl SoundPlayer for CommandSoundPlayer {
    fn play(&self, cue: SoundCue) {
        let asset = self.asset_path(cue);
        if !asset.is_file() {
            log::debug!("no {cue} sound at {}", asset.display());
            return;
        }

        let spawned = Command::new(&self.path)
            .args(self.program.args(&asset, self.volume))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        match spawned {
            // reap in the background so finished players don't linger as zombies
            Ok(mut child) => {
                std::thread::spawn(move || {
                    let _ = child.wait();
                });
            }
            Err(e) => log::warn!("error playing {cue} sound: {e}"),
        }
    }
}

/// Sound player that records the cues it was asked to play
#[derive(Debug, Default, Clone)]
pub struct RecordingSound {
    played: Arc<Mutex<Vec<SoundCue>>>,
}

impl RecordingSound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<SoundCue> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl SoundPlayer for RecordingSound {
    fn play(&self, cue: SoundCue) {
        if let Ok(mut played) = self.played.lock() {
            played.push(cue);
        }
    }
}

/// Build the sound player described by the config.
pub fn from_config(config: &Config) -> Box<dyn SoundPlayer> {
    if !config.sound_enabled {
        return Box::new(SilentSound);
    }

    let player = config.sound_dir().and_then(|dir| {
        CommandSoundPlayer::detect(config.sound_command.as_deref(), dir, config.sound_volume)
    });

    match player {
        Some(player) => Box::new(player),
        None if config.bell_fallback => Box::new(BellSound),
        None => Box::new(SilentSound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cue_file_names() {
        assert_eq!(SoundCue::Click.file_name(), "click.wav");
        assert_eq!(SoundCue::Correct.file_name(), "correct.wav");
        assert_eq!(SoundCue::Incorrect.file_name(), "incorrect.wav");
    }

    #[test]
    fn test_player_args_carry_volume() {
        let asset = Path::new("/tmp/correct.wav");

        assert_eq!(
            PlayerProgram::Paplay.args(asset, 0.5),
            ["--volume=32768", "/tmp/correct.wav"]
        );
        assert_eq!(
            PlayerProgram::Afplay.args(asset, 2.0),
            ["-v", "1.00", "/tmp/correct.wav"]
        );
        assert_eq!(
            PlayerProgram::Aplay.args(asset, 0.5),
            ["-q", "/tmp/correct.wav"]
        );
    }

    #[test]
    fn test_missing_asset_is_skipped() {
        let dir = tempdir().unwrap();
        let player = CommandSoundPlayer::new(
            PlayerProgram::Aplay,
            PathBuf::from("/nonexistent/aplay"),
            dir.path().to_path_buf(),
            0.5,
        );

        // no click.wav in the directory: nothing is spawned, nothing panics
        player.play(SoundCue::Click);
        assert_eq!(player.asset_path(SoundCue::Click), dir.path().join("click.wav"));
    }

    #[test]
    fn test_unspawnable_player_is_swallowed() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("incorrect.wav"), b"RIFF").unwrap();
        let player = CommandSoundPlayer::new(
            PlayerProgram::Aplay,
            PathBuf::from("/nonexistent/aplay"),
            dir.path().to_path_buf(),
            0.5,
        );

        player.play(SoundCue::Incorrect);
    }

    #[test]
    fn test_recording_sound() {
        let sound = RecordingSound::new();
        let boxed: Box<dyn SoundPlayer> = Box::new(sound.clone());

        boxed.play(SoundCue::Click);
        boxed.play(SoundCue::Incorrect);

        assert_eq!(sound.played(), [SoundCue::Click, SoundCue::Incorrect]);
    }

    #[test]
    fn test_disabled_sound_is_silent() {
        let config = Config {
            sound_enabled: false,
            ..Config::default()
        };

        from_config(&config).play(SoundCue::Correct);
    }
}
