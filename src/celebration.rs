use rand::seq::SliceRandom;
use rand::Rng;
use std::time::{Duration, Instant};

const CONFETTI: [char; 6] = ['*', '+', 'o', '~', '^', '.'];
const CHEERS: [&str; 4] = ["PERFECT!", "SUPER SPELLER!", "WELL DONE!", "AMAZING!"];
const GRAVITY: f64 = 9.0;
/// Simulation step per tick
const DT: f64 = 0.1;

/// One piece of confetti
#[derive(Debug, Clone)]
pub struct Confetti {
    pub x: f64,
    pub y: f64,
    pub vel_x: f64,
    pub vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
}

impl Confetti {
    fn launch<R: Rng>(rng: &mut R, width: f64) -> Self {
        Self {
            x: rng.gen_range(0.0..width.max(1.0)),
            y: rng.gen_range(-6.0..0.0),
            vel_x: rng.gen_range(-1.5..1.5),
            vel_y: rng.gen_range(0.5..3.0),
            symbol: *CONFETTI.choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..CONFETTI.len()),
        }
    }

    fn update(&mut self, dt: f64) {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
    }
}

/// Falling confetti plus a cheer, shown over a perfect summary
#[derive(Debug)]
pub struct Celebration {
    pub confetti: Vec<Confetti>,
    pub cheer: &'static str,
    started_at: Option<Instant>,
    duration: Duration,
    width: f64,
    height: f64,
}

impl Celebration {
    pub fn new() -> Self {
        Self {
            confetti: Vec::new(),
            cheer: CHEERS[0],
            started_at: None,
            duration: Duration::from_secs(3),
            width: 80.0,
            height: 24.0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self, width: u16, height: u16) {
        self.start_at(width, height, Instant::now());
    }

    pub fn start_at(&mut self, width: u16, height: u16, now: Instant) {
        let mut rng = rand::thread_rng();
        self.width = f64::from(width);
        self.height = f64::from(height);
        self.cheer = CHEERS.choose(&mut rng).copied().unwrap_or(CHEERS[0]);
        self.confetti = (0..(width as usize / 2).clamp(10, 60))
            .map(|_| Confetti::launch(&mut rng, self.width))
            .collect();
        self.started_at = Some(now);
    }

    pub fn stop(&mut self) {
        self.started_at = None;
        self.confetti.clear();
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        let Some(started_at) = self.started_at else {
            return;
        };
        if now.saturating_duration_since(started_at) >= self.duration {
            self.stop();
            return;
        }

        let height = self.height;
        let width = self.width;
        self.confetti.retain_mut(|piece| {
            piece.update(DT);
            piece.y < height + 1.0 && piece.x > -2.0 && piece.x < width + 2.0
        });
    }
}

impl Default for Celebration {
    fn default() -> Self {
        Self::new()
    }
}
