use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::catalog::Catalog;
use crate::celebration::Celebration;
use crate::config::Config;
use crate::error::QuizError;
use crate::quiz::QuizStatus;
use crate::router::{Router, Screen};
use crate::runtime::AppEvent;
use crate::{sound, speech};

/// Tiles per row on the home grid
pub const GRID_COLUMNS: usize = 9;
const LETTER_TILES: usize = 26;
/// The A-Z game sits after Z
pub const RANDOM_TILE: usize = LETTER_TILES;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Letter(char),
    Random,
}

impl Tile {
    pub fn at(index: usize) -> Option<Self> {
        match index {
            i if i < LETTER_TILES => Some(Tile::Letter((b'A' + i as u8) as char)),
            RANDOM_TILE => Some(Tile::Random),
            _ => None,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Tile::Letter(c) => c.to_string(),
            Tile::Random => "A-Z".to_string(),
        }
    }
}

/// Cursor over the home grid, plus which letters have any words at all
#[derive(Debug, Clone)]
pub struct HomeState {
    selected: usize,
    available: BTreeSet<char>,
}

impl HomeState {
    pub fn new(available: BTreeSet<char>) -> Self {
        Self {
            selected: RANDOM_TILE,
            available,
        }
    }

    pub fn tiles() -> impl Iterator<Item = Tile> {
        (0..=RANDOM_TILE).filter_map(Tile::at)
    }

    pub fn selected(&self) -> Tile {
        Tile::at(self.selected).unwrap_or(Tile::Random)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn is_enabled(&self, tile: Tile) -> bool {
        match tile {
            Tile::Letter(c) => self.available.contains(&c),
            Tile::Random => !self.available.is_empty(),
        }
    }

    fn move_by(&mut self, delta: isize) {
        let next = self.selected as isize + delta;
        if (0..=RANDOM_TILE as isize).contains(&next) {
            self.selected = next as usize;
        }
    }

    fn select(&mut self, tile: Tile) {
        self.selected = match tile {
            Tile::Letter(c) => (c as u8 - b'A') as usize,
            Tile::Random => RANDOM_TILE,
        };
    }
}

/// Everything the terminal front end needs: the router plus the bits of UI
/// state that do not belong to a session.
pub struct App {
    router: Router,
    config: Config,
    home: HomeState,
    confirm_quit: bool,
    notice: Option<String>,
    celebration: Celebration,
    area: (u16, u16),
    should_exit: bool,
}

impl App {
    pub fn new(router: Router, config: Config) -> Self {
        let home = HomeState::new(router.catalog().letters_with_words());
        Self {
            router,
            config,
            home,
            confirm_quit: false,
            notice: None,
            celebration: Celebration::new(),
            area: (80, 24),
            should_exit: false,
        }
    }

    /// Built-in catalog with speech and sound picked from `config`.
    pub fn from_config(config: Config) -> Result<Self, QuizError> {
        let catalog = Arc::new(Catalog::builtin()?);
        let speaker = Arc::from(speech::from_config(&config));
        let sound = Arc::from(sound::from_config(&config));
        Ok(Self::new(Router::new(catalog, speaker, sound), config))
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn home(&self) -> &HomeState {
        &self.home
    }

    pub fn is_confirming_quit(&self) -> bool {
        self.confirm_quit
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn celebration(&self) -> &Celebration {
        &self.celebration
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn set_area(&mut self, width: u16, height: u16) {
        self.area = (width, height);
    }

    /// Apply one loop event. Returns true when the screen needs a redraw.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Key(key) => {
                self.on_key(key);
                true
            }
            AppEvent::Resize => true,
            AppEvent::Tick => self.on_tick(),
        }
    }

    pub fn on_tick(&mut self) -> bool {
        self.on_tick_at(Instant::now())
    }

    pub fn on_tick_at(&mut self, now: Instant) -> bool {
        let mut redraw = false;
        if let Some(quiz) = self.router.quiz_mut() {
            match quiz.poll_at(now) {
                QuizStatus::Idle | QuizStatus::Waiting => {}
                QuizStatus::Advanced => redraw = true,
                QuizStatus::Finished(results) => {
                    self.confirm_quit = false;
                    self.router.finish(results);
                    self.celebrate_if_perfect();
                    redraw = true;
                }
            }
        }

        if self.celebration.is_active() {
            self.celebration.update_at(now);
            redraw = true;
        }
        redraw
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            if key.code == KeyCode::Char('c') {
                self.should_exit = true;
            }
            return;
        }

        match self.router.screen() {
            Screen::Home => self.on_home_key(key),
            Screen::Playing(_) if self.confirm_quit => self.on_confirm_key(key),
            Screen::Playing(_) => self.on_playing_key(key),
            Screen::Summary(_) => self.on_summary_key(key),
        }
    }

    fn on_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_exit = true,
            KeyCode::Left => self.home.move_by(-1),
            KeyCode::Right => self.home.move_by(1),
            KeyCode::Up => self.home.move_by(-(GRID_COLUMNS as isize)),
            KeyCode::Down => self.home.move_by(GRID_COLUMNS as isize),
            KeyCode::Enter => self.activate(self.home.selected()),
            KeyCode::Char(' ') => self.activate(Tile::Random),
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                let tile = Tile::Letter(c.to_ascii_uppercase());
                self.home.select(tile);
                self.activate(tile);
            }
            _ => {}
        }
    }

    fn activate(&mut self, tile: Tile) {
        let started = match tile {
            Tile::Letter(c) => self.router.start_letter(c),
            Tile::Random => self.router.start_random(self.config.random_word_count),
        };
        match started {
            Ok(()) => {
                self.notice = None;
                self.confirm_quit = false;
            }
            Err(e) => {
                log::info!("cannot start {}: {e}", tile.label());
                self.notice = Some(match tile {
                    Tile::Letter(c) => format!("No words start with {c} yet"),
                    Tile::Random => e.to_string(),
                });
            }
        }
    }

    fn on_playing_key(&mut self, key: KeyEvent) {
        let Some(quiz) = self.router.quiz_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.confirm_quit = true,
            KeyCode::Tab => quiz.repeat_word(),
            KeyCode::Enter => {
                quiz.submit_input();
            }
            KeyCode::Backspace => quiz.backspace(),
            KeyCode::Char(c) => quiz.push_char(c),
            _ => {}
        }
    }

    fn on_confirm_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                self.confirm_quit = false;
                self.router.quit();
                self.celebrate_if_perfect();
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => self.confirm_quit = false,
            _ => {}
        }
    }

    fn on_summary_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('p') | KeyCode::Enter => {
                self.celebration.stop();
                if let Err(e) = self.router.play_again() {
                    log::warn!("cannot start a new game: {e}");
                    self.notice = Some(e.to_string());
                }
            }
            KeyCode::Char('h') => {
                self.celebration.stop();
                self.router.go_home();
            }
            KeyCode::Esc | KeyCode::Char('q') => self.should_exit = true,
            _ => {}
        }
    }

    fn celebrate_if_perfect(&mut self) {
        if let Screen::Summary(summary) = self.router.screen() {
            if summary.is_perfect() {
                self.celebration.start(self.area.0, self.area.1);
            }
        }
    }
}
