use std::io;
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};

use crate::config::Config;
use crate::util::{first_available, find_on_path, relative_percent};

/// Something that can pronounce a word out loud.
///
/// Calls are fire-and-forget: an implementation must cancel whatever it is
/// still saying before starting the new utterance, and must swallow its own
/// failures.
pub trait Speaker: Send {
    fn speak(&self, text: &str);
}

/// Speaker used when text-to-speech is turned off or unavailable
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSpeaker;

impl Speaker for SilentSpeaker {
    fn speak(&self, text: &str) {
        log::trace!("speech disabled, not speaking {text:?}");
    }
}

/// Text-to-speech programs we know how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SpeechProgram {
    #[strum(serialize = "espeak-ng")]
    EspeakNg,
    #[strum(serialize = "espeak")]
    Espeak,
    #[strum(serialize = "spd-say")]
    SpdSay,
    #[strum(serialize = "say")]
    Say,
}

const ESPEAK_DEFAULT_WPM: f32 = 175.0;
const ESPEAK_DEFAULT_PITCH: f32 = 50.0;
const SAY_DEFAULT_WPM: f32 = 175.0;
const SPD_SAY_CANCEL: &[&str] = &["-C"];

impl SpeechProgram {
    const PROBE_ORDER: [SpeechProgram; 4] = [
        SpeechProgram::EspeakNg,
        SpeechProgram::Espeak,
        SpeechProgram::SpdSay,
        SpeechProgram::Say,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        let file_name = std::path::Path::new(name).file_name()?.to_str()?;
        Self::PROBE_ORDER
            .into_iter()
            .find(|p| p.to_string() == file_name)
    }

    /// Arguments for one utterance. `rate` and `pitch` are multipliers of the
    /// program's own default.
    pub fn args(&self, text: &str, rate: f32, pitch: f32) -> Vec<String> {
        match self {
            SpeechProgram::EspeakNg | SpeechProgram::Espeak => vec![
                "-s".into(),
                ((ESPEAK_DEFAULT_WPM * rate).round() as u32).to_string(),
                "-p".into(),
                ((ESPEAK_DEFAULT_PITCH * pitch).round().clamp(0.0, 99.0) as u32).to_string(),
                "--".into(),
                text.into(),
            ],
            // -w keeps the client alive until the utterance is done so it can be killed
            SpeechProgram::SpdSay => vec![
                "-w".into(),
                "-r".into(),
                relative_percent(rate).to_string(),
                "-p".into(),
                relative_percent(pitch).to_string(),
                "--".into(),
                text.into(),
            ],
            SpeechProgram::Say => vec![
                "-r".into(),
                ((SAY_DEFAULT_WPM * rate).round() as u32).to_string(),
                "--".into(),
                text.into(),
            ],
        }
    }

    /// Extra command that flushes the speech server's queue, if the program
    /// talks to one.
    fn cancel_args(&self) -> Option<&'static [&'static str]> {
        match self {
            SpeechProgram::SpdSay => Some(SPD_SAY_CANCEL),
            _ => None,
        }
    }
}

/// Speaks by spawning an external text-to-speech program per utterance
#[derive(Debug)]
pub struct CommandSpeaker {
    program: SpeechProgram,
    path: PathBuf,
    rate: f32,
    pitch: f32,
    current: Mutex<Option<Child>>,
}

impl CommandSpeaker {
    pub fn new(program: SpeechProgram, path: PathBuf, rate: f32, pitch: f32) -> Self {
        Self {
            program,
            path,
            rate,
            pitch,
            current: Mutex::new(None),
        }
    }

    /// Pick the first text-to-speech program found on `PATH`, or the one
    /// named by `override_program`.
    pub fn detect(override_program: Option<&str>, rate: f32, pitch: f32) -> Option<Self> {
        if let Some(name) = override_program {
            let Some(program) = SpeechProgram::from_name(name) else {
                log::warn!("unsupported speech program {name:?}, falling back to detection");
                return Self::detect(None, rate, pitch);
            };
            return match find_on_path(name) {
                Some(path) => Some(Self::new(program, path, rate, pitch)),
                None => {
                    log::warn!("speech program {name:?} not found");
                    None
                }
            };
        }

        let names = SpeechProgram::PROBE_ORDER.map(|p| p.to_string());
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        let (name, path) = first_available(&names)?;
        let program = SpeechProgram::from_name(name)?;
        log::info!("using {program} for speech ({})", path.display());
        Some(Self::new(program, path, rate, pitch))
    }

    pub fn program(&self) -> SpeechProgram {
        self.program
    }

    fn cancel(&self, current: &mut Option<Child>) {
        if let Some(mut child) = current.take() {
            // the utterance may already be over, in which case kill fails harmlessly
            let _ = child.kill();
            let _ = child.wait();
        }
        if let Some(args) = self.program.cancel_args() {
            let flushed = self
                .spawn(args.iter().map(|s| s.to_string()).collect())
                .and_then(|mut child| child.wait());
            if let Err(e) = flushed {
                log::debug!("could not flush speech queue: {e}");
            }
        }
    }

    fn spawn(&self, args: Vec<String>) -> io::Result<Child> {
        Command::new(&self.path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl Speaker for CommandSpeaker {
    fn speak(&self, text: &str) {
        if text.is_empty() {
            return;
        }

        let mut current = match self.current.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        self.cancel(&mut current);

        match self.spawn(self.program.args(text, self.rate, self.pitch)) {
            Ok(child) => *current = Some(child),
            Err(e) => log::warn!("{} failed to speak {text:?}: {e}", self.program),
        }
    }
}

impl Drop for CommandSpeaker {
    fn drop(&mut self) {
        if let Ok(mut current) = self.current.lock() {
            if let Some(mut child) = current.take() {
                let _ = child.kill();
                let _ = child.wait();
            }
        }
    }
}

/// Speaker that records what it was asked to say
#[derive(Debug, Default, Clone)]
pub struct RecordingSpeaker {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingSpeaker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().map(|s| s.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<String> {
        self.spoken().last().cloned()
    }
}

impl Speaker for RecordingSpeaker {
    fn speak(&self, text: &str) {
        if let Ok(mut spoken) = self.spoken.lock() {
            spoken.push(text.to_string());
        }
    }
}

/// Build the speaker described by the config.
pub fn from_config(config: &Config) -> Box<dyn Speaker> {
    if !config.speech_enabled {
        return Box::new(SilentSpeaker);
    }

    match CommandSpeaker::detect(
        config.speech_command.as_deref(),
        config.speech_rate,
        config.speech_pitch,
    ) {
        Some(speaker) => Box::new(speaker),
        None => {
            log::info!("no text-to-speech program available, words will not be spoken");
            Box::new(SilentSpeaker)
        }
    }
}
