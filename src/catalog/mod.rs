pub mod sampling;

use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;

use crate::error::QuizError;

static CATALOG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/catalog/data");

const BUILTIN_FILE: &str = "words.json";

/// Upper bound on the size of an A-Z game.
pub const DEFAULT_RANDOM_GAME_SIZE: usize = 20;

/// The static, ordered collection of every word the quiz can ask.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Catalog {
    pub name: String,
    words: Vec<String>,
}

impl Catalog {
    /// The compiled-in word list.
    pub fn builtin() -> Result<Self, QuizError> {
        read_catalog_from_file(BUILTIN_FILE)
    }

    /// A catalog over a fixed list, mostly for tests.
    pub fn from_words<I, S>(words: I) -> Result<Self, QuizError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::validated(Self {
            name: "custom".to_string(),
            words: words.into_iter().map(Into::into).collect(),
        })
    }

    fn validated(catalog: Self) -> Result<Self, QuizError> {
        if let Some(pos) = catalog.words.iter().position(|w| w.trim().is_empty()) {
            return Err(QuizError::Catalog(format!(
                "entry {pos} of '{}' is blank",
                catalog.name
            )));
        }
        Ok(catalog)
    }

    pub fn all_words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn read_catalog_from_file(file_name: &str) -> Result<Catalog, QuizError> {
    let file = CATALOG_DIR
        .get_file(file_name)
        .ok_or_else(|| QuizError::Catalog(format!("{file_name} is not bundled")))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or_else(|| QuizError::Catalog(format!("{file_name} is not utf-8")))?;

    let catalog: Catalog =
        from_str(file_as_str).map_err(|e| QuizError::Catalog(format!("{file_name}: {e}")))?;

    Catalog::validated(catalog)
}
