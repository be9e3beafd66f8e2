use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum AlphabetDefect {
    #[error("no symbols")]
    Empty,
    #[error("symbol used by more than one pair")]
    DuplicateSymbol,
    #[error("too many symbols for a single board")]
    TooManySymbols,
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid alphabet: {0}")]
    InvalidAlphabet(AlphabetDefect),
    #[error("Layout does not hold exactly two cards of every symbol")]
    InvalidLayout,
    #[error("Invalid position")]
    InvalidPosition,
}

impl From<AlphabetDefect> for GameError {
    fn from(defect: AlphabetDefect) -> Self {
        Self::InvalidAlphabet(defect)
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
