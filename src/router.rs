use std::sync::Arc;

use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::quiz::Quiz;
use crate::session::{Summary, WordResult};
use crate::sound::SoundPlayer;
use crate::speech::Speaker;

/// Which screen is up. A session only exists while `Playing`.
#[derive(Debug)]
pub enum Screen {
    Home,
    Playing(Quiz),
    Summary(Summary),
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Playing(_) => "playing",
            Screen::Summary(_) => "summary",
        }
    }
}

/// Top-level state machine threading word lists and results between screens.
///
/// ```text
/// Home --start--> Playing --finish/quit--> Summary --play again--> Playing
///   ^                |                        |
///   +----go home-----+--------go home---------+
/// ```
pub struct Router {
    catalog: Arc<Catalog>,
    speaker: Arc<dyn Speaker>,
    sound: Arc<dyn SoundPlayer>,
    screen: Screen,
}

impl Router {
    pub fn new(
        catalog: Arc<Catalog>,
        speaker: Arc<dyn Speaker>,
        sound: Arc<dyn SoundPlayer>,
    ) -> Self {
        Self {
            catalog,
            speaker,
            sound,
            screen: Screen::Home,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    pub fn quiz_mut(&mut self) -> Option<&mut Quiz> {
        match &mut self.screen {
            Screen::Playing(quiz) => Some(quiz),
            Screen::Home | Screen::Summary(_) => None,
        }
    }

    /// Home -> Playing. `None` means a fresh random session over the whole
    /// catalog. An empty selection is refused and the screen does not change.
    pub fn start(&mut self, words: Option<Vec<String>>) -> Result<(), QuizError> {
        let mut quiz = Quiz::new(
            Arc::clone(&self.catalog),
            Arc::clone(&self.speaker),
            Arc::clone(&self.sound),
        );
        quiz.start(words)?;
        self.transition(Screen::Playing(quiz));
        Ok(())
    }

    /// Practice every word starting with `letter`.
    pub fn start_letter(&mut self, letter: char) -> Result<(), QuizError> {
        if !letter.is_ascii_alphabetic() {
            return Err(QuizError::UnknownLetter(letter));
        }
        let words = self.catalog.words_starting_with(letter);
        if words.is_empty() {
            log::info!("no words start with {}", letter.to_ascii_uppercase());
            return Err(QuizError::EmptySelection);
        }
        self.start(Some(words))
    }

    /// The A-Z game: a shuffled sample capped at `cap` words.
    pub fn start_random(&mut self, cap: usize) -> Result<(), QuizError> {
        let size = self.catalog.random_game_size(cap);
        let words = self.catalog.shuffled_sample(size);
        if words.is_empty() {
            return Err(QuizError::EmptySelection);
        }
        self.start(Some(words))
    }

    /// Playing -> Summary, on natural completion or quit.
    pub fn finish(&mut self, results: Vec<WordResult>) {
        self.transition(Screen::Summary(Summary::new(results)));
    }

    /// Quit the running session; the partial results go to the summary.
    pub fn quit(&mut self) {
        let results = match &mut self.screen {
            Screen::Playing(quiz) => quiz.quit(),
            Screen::Home | Screen::Summary(_) => return,
        };
        self.finish(results);
    }

    /// Summary -> Playing with a fresh random session.
    pub fn play_again(&mut self) -> Result<(), QuizError> {
        self.start(None)
    }

    /// Back to Home from anywhere, discarding any session.
    pub fn go_home(&mut self) {
        self.transition(Screen::Home);
    }

    fn transition(&mut self, next: Screen) {
        log::debug!("screen {} -> {}", self.screen.name(), next.name());
        self.screen = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::{QuizStatus, CORRECT_FEEDBACK_DELAY};
    use crate::sound::RecordingSound;
    use crate::speech::RecordingSpeaker;
    use assert_matches::assert_matches;
    use std::time::Instant;

    fn router(words: &[&str]) -> Router {
        Router::new(
            Arc::new(Catalog::from_words(words.iter().copied()).unwrap()),
            Arc::new(RecordingSpeaker::new()),
            Arc::new(RecordingSound::new()),
        )
    }

    #[test]
    fn test_initial_screen_is_home() {
        assert_matches!(router(&["cat"]).screen(), Screen::Home);
    }

    #[test]
    fn test_start_with_words_enters_playing() {
        let mut r = router(&["cat", "dog"]);

        r.start(Some(vec!["dog".into()])).unwrap();

        assert_matches!(r.screen(), Screen::Playing(quiz) if quiz.word_list() == ["dog"]);
    }

    #[test]
    fn test_start_letter_without_words_is_refused() {
        let mut r = router(&["cat", "dog"]);

        assert_matches!(r.start_letter('Q'), Err(QuizError::EmptySelection));
        assert_matches!(r.screen(), Screen::Home);
        assert_matches!(r.start_letter('?'), Err(QuizError::UnknownLetter('?')));
    }

    #[test]
    fn test_start_letter_filters_catalog() {
        let mut r = router(&["cat", "cow", "dog"]);

        r.start_letter('c').unwrap();

        assert_matches!(r.screen(), Screen::Playing(quiz) if quiz.word_list() == ["cat", "cow"]);
    }

    #[test]
    fn test_start_random_is_capped() {
        let mut r = router(&["ant", "bee", "cow", "doe"]);

        r.start_random(2).unwrap();

        assert_matches!(r.screen(), Screen::Playing(quiz) if quiz.word_list().len() == 2);
    }

    #[test]
    fn test_finish_moves_results_to_summary() {
        let mut r = router(&["cat", "dog"]);
        r.start(Some(vec!["cat".into(), "dog".into()])).unwrap();
        let t0 = Instant::now();

        let quiz = r.quiz_mut().unwrap();
        quiz.submit_at("cat", t0);
        quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY);
        quiz.submit_at("dog", t0 + CORRECT_FEEDBACK_DELAY);
        let QuizStatus::Finished(results) = quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY * 2) else {
            panic!("session should have finished");
        };
        r.finish(results);

        assert_matches!(r.screen(), Screen::Summary(s) if s.score() == 2 && s.total() == 2);
    }

    #[test]
    fn test_quit_carries_partial_results() {
        let mut r = router(&["ant", "bee", "cow"]);
        r.start(Some(vec!["ant".into(), "bee".into(), "cow".into()]))
            .unwrap();
        let t0 = Instant::now();
        let quiz = r.quiz_mut().unwrap();
        quiz.submit_at("ant", t0);
        quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY);

        r.quit();

        assert_matches!(r.screen(), Screen::Summary(s) if s.total() == 1);
    }

    #[test]
    fn test_play_again_starts_fresh_random_session() {
        let mut r = router(&["ant", "bee", "cow"]);
        r.finish(Vec::new());

        r.play_again().unwrap();

        assert_matches!(r.screen(), Screen::Playing(quiz) if quiz.word_list().len() == 3 && quiz.results().is_empty());
    }

    #[test]
    fn test_go_home_discards_session() {
        let mut r = router(&["cat"]);
        r.start(None).unwrap();

        r.go_home();
        assert_matches!(r.screen(), Screen::Home);
        assert!(r.quiz_mut().is_none());

        r.finish(Vec::new());
        r.go_home();
        assert_matches!(r.screen(), Screen::Home);
    }

    #[test]
    fn test_quit_outside_playing_is_ignored() {
        let mut r = router(&["cat"]);

        r.quit();

        assert_matches!(r.screen(), Screen::Home);
    }
}
