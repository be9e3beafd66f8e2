use alloc::vec::Vec;
use rand::prelude::*;

use super::*;

/// Uniform Fisher-Yates shuffle of the alphabet's cards.
///
/// Each call draws from the same seeded stream, so restarting a game gives a new layout while a given seed still
/// replays the same sequence of games.
#[derive(Clone, Debug)]
pub struct ShuffledBoardGenerator {
    rng: SmallRng,
}

impl ShuffledBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Shuffles the alphabet's cards, cannot fail for a valid alphabet.
    pub fn deal(&mut self, alphabet: &Alphabet) -> Board {
        let mut symbols: Vec<Symbol> = alphabet.card_symbols().cloned().collect();
        symbols.shuffle(&mut self.rng);

        let board = Board::from_symbols_unchecked(symbols);

        // double check pairing
        if !board.is_valid_for(alphabet) {
            log::warn!(
                "Generated board does not pair up, {} cards for {} pairs",
                board.len(),
                alphabet.len()
            );
        }
        log::debug!("Generated board with {} cards", board.len());
        board
    }
}

impl BoardGenerator for ShuffledBoardGenerator {
    fn generate(&mut self, alphabet: &Alphabet) -> Result<Board> {
        Ok(self.deal(alphabet))
    }
}
