//! Error types shared by the thesaurus, dictionary and rhyme components.

use thiserror::Error;

/// Which half of a bipartite vocabulary a word was expected in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// The main error type for rumble.
#[derive(Error, Debug)]
pub enum RumbleError {
    /// Error reading one of the data files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line in the index, thesaurus or dictionary file didn't have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A rhyme query named a word that the matcher was never given.
    #[error("Word {word:?} is not in the {side} vocabulary")]
    Vocabulary { word: String, side: Side },
}

/// Result type alias for rumble operations.
pub type Result<T> = std::result::Result<T, RumbleError>;
