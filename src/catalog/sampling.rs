use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Catalog, DEFAULT_RANDOM_GAME_SIZE};

impl Catalog {
    /// A uniformly shuffled copy of the catalog, cut to `min(n, len)` words.
    pub fn shuffled_sample(&self, n: usize) -> Vec<String> {
        self.shuffled_sample_with(n, &mut rand::thread_rng())
    }

    /// Same as [`Catalog::shuffled_sample`] with a caller-supplied rng.
    pub fn shuffled_sample_with<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<String> {
        let mut words = self.words.clone();
        // Fisher-Yates; every permutation is equally likely
        words.shuffle(rng);
        words.truncate(n.min(self.words.len()));
        words
    }

    /// Every word whose first character matches `letter`, ignoring case, in
    /// catalog order. An empty result means the letter has nothing to play.
    pub fn words_starting_with(&self, letter: char) -> Vec<String> {
        self.words
            .iter()
            .filter(|word| starts_with_ignore_case(word, letter))
            .cloned()
            .collect()
    }

    /// Uppercase initials that have at least one word.
    pub fn letters_with_words(&self) -> BTreeSet<char> {
        self.words
            .iter()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Number of words in an A-Z game for the given cap.
    pub fn random_game_size(&self, cap: usize) -> usize {
        self.words.len().min(cap)
    }

    /// An A-Z game: a shuffled sample of `min(len, cap)` words.
    pub fn random_game(&self, cap: Option<usize>) -> Vec<String> {
        let size = self.random_game_size(cap.unwrap_or(DEFAULT_RANDOM_GAME_SIZE));
        self.shuffled_sample(size)
    }
}

fn starts_with_ignore_case(word: &str, letter: char) -> bool {
    match word.chars().next() {
        Some(first) => first.to_lowercase().eq(letter.to_lowercase()),
        None => false,
    }
}
