use alloc::vec::Vec;

use crate::*;
pub use shuffle::*;

mod shuffle;

pub trait BoardGenerator {
    /// Deals a fresh board, every card face down.
    fn generate(&mut self, alphabet: &Alphabet) -> Result<Board>;
}

/// Replays the same layout for every game, used to restore a known board.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedBoardGenerator {
    layout: Vec<Symbol>,
}

impl FixedBoardGenerator {
    /// Takes the layout of `board`, the state of its cards is not kept.
    pub fn new(board: &Board) -> Self {
        Self {
            layout: board.cards().iter().map(|card| card.symbol().clone()).collect(),
        }
    }
}

impl BoardGenerator for FixedBoardGenerator {
    fn generate(&mut self, alphabet: &Alphabet) -> Result<Board> {
        let board = Board::from_symbols_unchecked(self.layout.iter().cloned());
        if board.is_valid_for(alphabet) {
            Ok(board)
        } else {
            Err(GameError::InvalidLayout)
        }
    }
}

/// Builds a shuffled board with one pair per symbol.
pub fn new_game<I, S>(symbols: I, seed: u64) -> Result<Board>
where
    I: IntoIterator<Item = S>,
    S: Into<Symbol>,
{
    let alphabet = Alphabet::new(symbols)?;
    Ok(ShuffledBoardGenerator::new(seed).deal(&alphabet))
}
