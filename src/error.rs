use thiserror::Error;

/// Errors surfaced by the quiz core.
///
/// None of these are fatal: callers refuse the action and stay where they are.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuizError {
    /// The resolved word list for a new session was empty.
    #[error("no words to spell in this selection")]
    EmptySelection,

    /// A letter choice outside `A..=Z`.
    #[error("'{0}' is not a letter")]
    UnknownLetter(char),

    /// The compiled-in catalog could not be read.
    #[error("word catalog is unusable: {0}")]
    Catalog(String),
}
