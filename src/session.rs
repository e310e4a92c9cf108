/// Outcome of one submitted word. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordResult {
    pub word: String,
    pub user_spelling: String,
    pub is_correct: bool,
}

impl WordResult {
    /// Grade `input` against `word`, ignoring case and surrounding whitespace
    /// on both sides.
    pub fn grade(word: &str, input: &str) -> Self {
        let user_spelling = input.trim().to_string();
        let is_correct = user_spelling.to_lowercase() == word.trim().to_lowercase();
        Self {
            word: word.to_string(),
            user_spelling,
            is_correct,
        }
    }
}

/// Transient post-submission signal shown before the next word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Feedback {
    #[default]
    None,
    Correct,
    Incorrect,
}

impl Feedback {
    pub fn from_outcome(is_correct: bool) -> Self {
        if is_correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    }

    pub fn is_visible(&self) -> bool {
        *self != Feedback::None
    }
}

/// Number of correct results.
pub fn score(results: &[WordResult]) -> usize {
    results.iter().filter(|r| r.is_correct).count()
}

/// End-of-game view over a finished (or quit) session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    results: Vec<WordResult>,
}

impl Summary {
    pub fn new(results: Vec<WordResult>) -> Self {
        Self { results }
    }

    pub fn results(&self) -> &[WordResult] {
        &self.results
    }

    pub fn score(&self) -> usize {
        score(&self.results)
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn correct_words(&self) -> impl Iterator<Item = &WordResult> {
        self.results.iter().filter(|r| r.is_correct)
    }

    /// Misspelled words, with what the player typed
    pub fn words_to_practice(&self) -> impl Iterator<Item = &WordResult> {
        self.results.iter().filter(|r| !r.is_correct)
    }

    pub fn is_perfect(&self) -> bool {
        self.total() > 0 && self.words_to_practice().next().is_none()
    }
}
