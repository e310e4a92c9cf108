use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::catalog::Catalog;
use crate::error::QuizError;
use crate::session::{self, Feedback, WordResult};
use crate::sound::{SoundCue, SoundPlayer};
use crate::speech::Speaker;

/// How long "Correct!" stays up before the next word
pub const CORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(1500);
/// Wrong answers stay up longer so the correction can be read
pub const INCORRECT_FEEDBACK_DELAY: Duration = Duration::from_millis(2500);

/// What a poll of the feedback timer did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStatus {
    /// Nothing pending
    Idle,
    /// Feedback is showing, the timer has not fired yet
    Waiting,
    /// The timer fired and the next word is up
    Advanced,
    /// The timer fired on the last word; the session is over
    Finished(Vec<WordResult>),
}

/// The single deferred completion a submission schedules
#[derive(Debug, Clone, Copy)]
struct PendingAdvance {
    due: Instant,
}

/// The game flow engine: one spelling session at a time.
///
/// Owns the word list, the cursor into it and the results so far. Each
/// accepted submission appends a result immediately and schedules the advance
/// to the next word after a feedback window; the pending advance is polled
/// from the event loop's tick.
pub struct Quiz {
    catalog: Arc<Catalog>,
    speaker: Arc<dyn Speaker>,
    sound: Arc<dyn SoundPlayer>,
    word_list: Vec<String>,
    current_index: usize,
    results: Vec<WordResult>,
    feedback: Feedback,
    submitting: bool,
    pending: Option<PendingAdvance>,
    input: String,
    finished: bool,
}

impl std::fmt::Debug for Quiz {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Quiz")
            .field("word_list", &self.word_list)
            .field("current_index", &self.current_index)
            .field("results", &self.results)
            .field("feedback", &self.feedback)
            .field("submitting", &self.submitting)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl Quiz {
    pub fn new(
        catalog: Arc<Catalog>,
        speaker: Arc<dyn Speaker>,
        sound: Arc<dyn SoundPlayer>,
    ) -> Self {
        Self {
            catalog,
            speaker,
            sound,
            word_list: Vec::new(),
            current_index: 0,
            results: Vec::new(),
            feedback: Feedback::None,
            submitting: false,
            pending: None,
            input: String::new(),
            finished: false,
        }
    }

    /// Begin a session. A non-empty `words` is used as-is; otherwise the whole
    /// catalog is shuffled. Any previous session, including a pending
    /// feedback timer, is discarded. An empty resolved list is refused and
    /// leaves the engine untouched.
    pub fn start(&mut self, words: Option<Vec<String>>) -> Result<(), QuizError> {
        let word_list = match words {
            Some(words) if !words.is_empty() => words,
            _ => self.catalog.shuffled_sample(self.catalog.len()),
        };
        if word_list.is_empty() {
            return Err(QuizError::EmptySelection);
        }

        log::debug!("starting session with {} words", word_list.len());
        self.word_list = word_list;
        self.current_index = 0;
        self.results.clear();
        self.feedback = Feedback::None;
        self.submitting = false;
        self.pending = None;
        self.input.clear();
        self.finished = false;
        self.speak_current();
        Ok(())
    }

    pub fn has_started(&self) -> bool {
        !self.word_list.is_empty()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_word(&self) -> Option<&str> {
        self.word_list.get(self.current_index).map(String::as_str)
    }

    pub fn word_list(&self) -> &[String] {
        &self.word_list
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn results(&self) -> &[WordResult] {
        &self.results
    }

    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn score(&self) -> usize {
        session::score(&self.results)
    }

    /// `(current_index, total)`
    pub fn progress(&self) -> (usize, usize) {
        (self.current_index, self.word_list.len())
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Typing is locked while feedback is showing.
    pub fn push_char(&mut self, c: char) {
        if self.accepts_input() && !c.is_control() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.accepts_input() {
            self.input.pop();
        }
    }

    fn accepts_input(&self) -> bool {
        self.has_started() && !self.submitting && !self.finished
    }

    /// Submit whatever has been typed so far.
    pub fn submit_input(&mut self) -> bool {
        self.submit_input_at(Instant::now())
    }

    pub fn submit_input_at(&mut self, now: Instant) -> bool {
        let input = self.input.clone();
        self.submit_at(&input, now)
    }

    pub fn submit(&mut self, input: &str) -> bool {
        self.submit_at(input, Instant::now())
    }

    /// Grade `input` against the current word. Ignored (returns false) while a
    /// previous submission is still showing feedback, before `start`, after
    /// the session is over, or when `input` is blank.
    pub fn submit_at(&mut self, input: &str, now: Instant) -> bool {
        if self.submitting || self.finished || input.trim().is_empty() {
            return false;
        }
        let Some(word) = self.current_word() else {
            return false;
        };

        let result = WordResult::grade(word, input);
        let is_correct = result.is_correct;
        log::debug!(
            "word {}/{}: {:?} spelled {:?} ({})",
            self.current_index + 1,
            self.word_list.len(),
            result.word,
            result.user_spelling,
            if is_correct { "correct" } else { "incorrect" }
        );

        self.results.push(result);
        self.feedback = Feedback::from_outcome(is_correct);
        self.submitting = true;
        self.sound.play(if is_correct {
            SoundCue::Correct
        } else {
            SoundCue::Incorrect
        });

        let delay = if is_correct {
            CORRECT_FEEDBACK_DELAY
        } else {
            INCORRECT_FEEDBACK_DELAY
        };
        self.pending = Some(PendingAdvance { due: now + delay });
        true
    }

    /// Time left in the feedback window, if one is open.
    pub fn time_until_advance(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    pub fn poll(&mut self) -> QuizStatus {
        self.poll_at(Instant::now())
    }

    /// Fire the pending advance if its deadline has passed.
    pub fn poll_at(&mut self, now: Instant) -> QuizStatus {
        let Some(pending) = self.pending else {
            return QuizStatus::Idle;
        };
        if now < pending.due {
            return QuizStatus::Waiting;
        }

        self.pending = None;
        self.feedback = Feedback::None;
        self.submitting = false;
        self.input.clear();

        if self.current_index + 1 < self.word_list.len() {
            self.current_index += 1;
            self.speak_current();
            QuizStatus::Advanced
        } else {
            // the index stays on the last word; every word now has a result
            self.finished = true;
            log::debug!(
                "session complete: {}/{} correct",
                self.score(),
                self.results.len()
            );
            QuizStatus::Finished(self.results.clone())
        }
    }

    /// End the session now with whatever has been answered. A pending
    /// feedback timer is dropped and can never advance this session.
    pub fn quit(&mut self) -> Vec<WordResult> {
        log::debug!(
            "quit after {} of {} words",
            self.results.len(),
            self.word_list.len()
        );
        self.pending = None;
        self.feedback = Feedback::None;
        self.submitting = false;
        self.finished = true;
        self.results.clone()
    }

    /// The speaker button: click, then say the word again.
    pub fn repeat_word(&self) {
        self.sound.play(SoundCue::Click);
        self.speak_current();
    }

    fn speak_current(&self) {
        if let Some(word) = self.current_word() {
            self.speaker.speak(word);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sound::RecordingSound;
    use crate::speech::RecordingSpeaker;
    use assert_matches::assert_matches;

    struct Harness {
        quiz: Quiz,
        speaker: RecordingSpeaker,
        sound: RecordingSound,
    }

    fn harness(words: &[&str]) -> Harness {
        let catalog = Arc::new(Catalog::from_words(words.iter().copied()).unwrap());
        let speaker = RecordingSpeaker::new();
        let sound = RecordingSound::new();
        let quiz = Quiz::new(catalog, Arc::new(speaker.clone()), Arc::new(sound.clone()));
        Harness {
            quiz,
            speaker,
            sound,
        }
    }

    fn words(list: &[&str]) -> Option<Vec<String>> {
        Some(list.iter().map(|w| w.to_string()).collect())
    }

    #[test]
    fn test_new_quiz_has_no_word() {
        let h = harness(&["cat"]);

        assert!(!h.quiz.has_started());
        assert_eq!(h.quiz.current_word(), None);
        assert_eq!(h.quiz.progress(), (0, 0));
    }

    #[test]
    fn test_start_uses_given_words_verbatim() {
        let mut h = harness(&["cat", "dog", "owl"]);

        h.quiz.start(words(&["owl", "cat"])).unwrap();

        assert_eq!(h.quiz.word_list(), ["owl", "cat"]);
        assert_eq!(h.quiz.current_word(), Some("owl"));
        assert_eq!(h.quiz.progress(), (0, 2));
        assert_eq!(h.speaker.spoken(), ["owl"]);
    }

    #[test]
    fn test_start_without_words_shuffles_whole_catalog() {
        let mut h = harness(&["cat", "dog", "owl"]);

        h.quiz.start(None).unwrap();
        let mut list = h.quiz.word_list().to_vec();
        list.sort();
        assert_eq!(list, ["cat", "dog", "owl"]);

        h.quiz.start(Some(Vec::new())).unwrap();
        assert_eq!(h.quiz.word_list().len(), 3);
    }

    #[test]
    fn test_start_refuses_empty_selection() {
        let catalog = Arc::new(Catalog::from_words(Vec::<String>::new()).unwrap());
        let mut quiz = Quiz::new(
            catalog,
            Arc::new(RecordingSpeaker::new()),
            Arc::new(RecordingSound::new()),
        );

        assert_matches!(quiz.start(None), Err(QuizError::EmptySelection));
        assert!(!quiz.has_started());
    }

    #[test]
    fn test_correct_submission_advances_after_short_delay() {
        let mut h = harness(&["cat", "dog"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["cat", "dog"])).unwrap();

        assert!(h.quiz.submit_at("cat", t0));
        assert_eq!(h.quiz.feedback(), Feedback::Correct);
        assert!(h.quiz.is_submitting());
        assert_eq!(h.quiz.results().len(), 1);
        assert_eq!(h.sound.played(), [SoundCue::Correct]);

        assert_eq!(
            h.quiz.poll_at(t0 + Duration::from_millis(1499)),
            QuizStatus::Waiting
        );
        assert_eq!(h.quiz.current_index(), 0);

        assert_eq!(h.quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY), QuizStatus::Advanced);
        assert_eq!(h.quiz.current_index(), 1);
        assert_eq!(h.quiz.feedback(), Feedback::None);
        assert!(!h.quiz.is_submitting());
        assert_eq!(h.speaker.spoken(), ["cat", "dog"]);
    }

    #[test]
    fn test_incorrect_submission_waits_longer() {
        let mut h = harness(&["cat", "dog"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["cat", "dog"])).unwrap();

        h.quiz.submit_at("kat", t0);
        assert_eq!(h.quiz.feedback(), Feedback::Incorrect);
        assert_eq!(
            h.quiz.time_until_advance(t0),
            Some(INCORRECT_FEEDBACK_DELAY)
        );

        assert_eq!(
            h.quiz.poll_at(t0 + Duration::from_millis(2000)),
            QuizStatus::Waiting
        );
        assert_eq!(
            h.quiz.poll_at(t0 + INCORRECT_FEEDBACK_DELAY),
            QuizStatus::Advanced
        );
        assert_eq!(h.sound.played(), [SoundCue::Incorrect]);
    }

    #[test]
    fn test_blank_submission_is_a_no_op() {
        let mut h = harness(&["cat"]);
        h.quiz.start(None).unwrap();

        assert!(!h.quiz.submit("   "));
        assert!(!h.quiz.submit(""));

        assert!(h.quiz.results().is_empty());
        assert_eq!(h.quiz.feedback(), Feedback::None);
        assert!(!h.quiz.is_submitting());
        assert_eq!(h.quiz.poll(), QuizStatus::Idle);
    }

    #[test]
    fn test_submission_while_submitting_is_ignored() {
        let mut h = harness(&["cat", "dog"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["cat", "dog"])).unwrap();

        assert!(h.quiz.submit_at("cat", t0));
        assert!(!h.quiz.submit_at("dog", t0 + Duration::from_millis(10)));

        assert_eq!(h.quiz.results().len(), 1);
        // the first deadline still stands
        assert_eq!(
            h.quiz.time_until_advance(t0),
            Some(CORRECT_FEEDBACK_DELAY)
        );
    }

    #[test]
    fn test_submit_before_start_is_ignored() {
        let mut h = harness(&["cat"]);

        assert!(!h.quiz.submit("cat"));
        assert!(h.quiz.results().is_empty());
    }

    #[test]
    fn test_results_track_index_outside_feedback_window() {
        let list = ["ant", "bee", "cow", "doe"];
        let mut h = harness(&list);
        let mut now = Instant::now();
        h.quiz.start(words(&list)).unwrap();

        for (i, word) in list.iter().enumerate() {
            assert_eq!(h.quiz.results().len(), h.quiz.current_index());
            h.quiz.submit_at(word, now);
            assert_eq!(h.quiz.results().len(), i + 1);
            now += INCORRECT_FEEDBACK_DELAY;
            let status = h.quiz.poll_at(now);
            if i + 1 < list.len() {
                assert_eq!(status, QuizStatus::Advanced);
            } else {
                assert_matches!(status, QuizStatus::Finished(results) if results.len() == list.len());
            }
        }

        for (result, word) in h.quiz.results().iter().zip(list) {
            assert_eq!(result.word, word);
        }
    }

    #[test]
    fn test_cat_dog_session() {
        let mut h = harness(&["cat", "dog"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["cat", "dog"])).unwrap();

        h.quiz.submit_at("cat", t0);
        assert_eq!(h.quiz.feedback(), Feedback::Correct);
        assert_eq!(h.quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY), QuizStatus::Advanced);
        assert_eq!(h.quiz.current_index(), 1);

        let t1 = t0 + Duration::from_secs(5);
        h.quiz.submit_at("dag", t1);
        assert_eq!(h.quiz.feedback(), Feedback::Incorrect);

        let status = h.quiz.poll_at(t1 + INCORRECT_FEEDBACK_DELAY);
        let expected = vec![
            WordResult {
                word: "cat".into(),
                user_spelling: "cat".into(),
                is_correct: true,
            },
            WordResult {
                word: "dog".into(),
                user_spelling: "dag".into(),
                is_correct: false,
            },
        ];
        assert_eq!(status, QuizStatus::Finished(expected));
        assert_eq!(h.quiz.score(), 1);
        assert!(h.quiz.is_finished());
        assert!(!h.quiz.submit_at("dog", t1 + Duration::from_secs(10)));
    }

    #[test]
    fn test_quit_returns_partial_results() {
        let list = ["ant", "bee", "cow"];
        let mut h = harness(&list);
        let t0 = Instant::now();
        h.quiz.start(words(&list)).unwrap();

        h.quiz.submit_at("ant", t0);
        h.quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY);

        let results = h.quiz.quit();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].word, "ant");
        assert!(h.quiz.is_finished());
    }

    #[test]
    fn test_quit_cancels_pending_timer() {
        let mut h = harness(&["ant", "bee"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["ant", "bee"])).unwrap();

        h.quiz.submit_at("ant", t0);
        let results = h.quiz.quit();

        assert_eq!(results.len(), 1);
        assert_eq!(h.quiz.time_until_advance(t0), None);
        assert_eq!(
            h.quiz.poll_at(t0 + Duration::from_secs(10)),
            QuizStatus::Idle
        );
        assert_eq!(h.quiz.current_index(), 0);
        assert_eq!(h.speaker.spoken(), ["ant"]);
    }

    #[test]
    fn test_restart_supersedes_pending_timer() {
        let mut h = harness(&["ant", "bee"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["ant", "bee"])).unwrap();
        h.quiz.submit_at("ant", t0);

        h.quiz.start(words(&["bee", "ant"])).unwrap();

        assert_eq!(h.quiz.poll_at(t0 + Duration::from_secs(10)), QuizStatus::Idle);
        assert!(h.quiz.results().is_empty());
        assert_eq!(h.quiz.current_word(), Some("bee"));
        assert!(!h.quiz.is_submitting());
    }

    #[test]
    fn test_input_buffer_locked_during_feedback() {
        let mut h = harness(&["cat", "dog"]);
        let t0 = Instant::now();
        h.quiz.start(words(&["cat", "dog"])).unwrap();

        for c in "cat".chars() {
            h.quiz.push_char(c);
        }
        assert_eq!(h.quiz.input(), "cat");
        assert!(h.quiz.submit_input_at(t0));

        h.quiz.push_char('x');
        h.quiz.backspace();
        assert_eq!(h.quiz.input(), "cat");

        h.quiz.poll_at(t0 + CORRECT_FEEDBACK_DELAY);
        assert_eq!(h.quiz.input(), "");
        h.quiz.push_char('d');
        h.quiz.backspace();
        assert_eq!(h.quiz.input(), "");
    }

    #[test]
    fn test_repeat_word_clicks_and_speaks_again() {
        let mut h = harness(&["cat"]);
        h.quiz.start(None).unwrap();

        h.quiz.repeat_word();

        assert_eq!(h.speaker.spoken(), ["cat", "cat"]);
        assert_eq!(h.sound.played(), [SoundCue::Click]);
    }
}
