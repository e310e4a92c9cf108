use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};

use spellbee::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{AppEvent, CrosstermEventSource, EventSource, FixedTicker, Runner, Ticker},
    ui,
};

/// spelling practice for kids: hear a word, type it, learn the tricky ones
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A spelling quiz for the terminal. Each word is spoken aloud, you type what you heard, and the summary lists the words worth practicing."
)]
pub struct Cli {
    /// number of words in an A-Z game
    #[clap(short = 'n', long, value_parser = parse_count)]
    count: Option<usize>,

    /// skip the home screen and practice words starting with this letter
    #[clap(short = 'l', long, value_parser = parse_letter)]
    letter: Option<char>,

    /// turn off sound effects
    #[clap(short = 'm', long)]
    mute: bool,

    /// turn off text-to-speech
    #[clap(long)]
    no_speech: bool,

    /// text-to-speech program to use (espeak-ng, espeak, spd-say or say)
    #[clap(long)]
    speech_command: Option<String>,

    /// log verbosity; overrides RUST_LOG
    #[clap(long, value_enum)]
    log_level: Option<LogLevel>,

    /// write the effective settings to the config file
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter(&self) -> String {
        self.to_string().to_lowercase()
    }
}

fn parse_count(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_letter(s: &str) -> Result<char, String> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(format!("'{s}' is not a single letter")),
    }
}

impl Cli {
    /// Fold command line overrides into the loaded config
    fn apply(&self, config: &mut Config) {
        if let Some(count) = self.count {
            config.random_word_count = count;
        }
        if self.mute {
            config.sound_enabled = false;
        }
        if self.no_speech {
            config.speech_enabled = false;
        }
        if let Some(program) = &self.speech_command {
            config.speech_command = Some(program.clone());
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        let level = cli.log_level.map(|l| l.as_filter());
        if let Err(e) = logging::init(&path, level.as_deref()) {
            eprintln!("spellbee: logging disabled: {e}");
        }
    }

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply(&mut config);
    if cli.save_config {
        store.save(&config)?;
        log::info!("saved settings to {}", store.path().display());
    }

    let mut app = App::from_config(config)?;
    if let Some(letter) = cli.letter {
        if let Err(e) = app.router_mut().start_letter(letter) {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, format!("--letter {letter}: {e}"))
                .exit();
        }
    }
    log::info!("starting on the {} screen", app.router().screen().name());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        log::error!("exiting on error: {e}");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());
    run_loop(terminal, app, &runner)
}

fn run_loop<B: Backend, E: EventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.set_area(size.width, size.height);
    terminal.draw(|f| ui::draw(app, f))?;

    while !app.should_exit() {
        let event = runner.step();
        if let AppEvent::Resize = event {
            let size = terminal.size()?;
            app.set_area(size.width, size.height);
        }
        if app.handle_event(event) && !app.should_exit() {
            terminal.draw(|f| ui::draw(app, f))?;
        }
    }

    Ok(())
}
