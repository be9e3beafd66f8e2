use alloc::vec;
use alloc::vec::Vec;
use core::ops::Index;
use serde::Serialize;

use crate::*;

/// Fixed layout of `2N` cards for one game.
///
/// Only serialized for display, a board is rebuilt through [`Board::from_symbols`] or a generator.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    cards: Vec<Card>,
    matched_count: CardCount,
}

impl Board {
    /// Lays out `symbols` in order without checking the pairing invariant.
    pub(crate) fn from_symbols_unchecked(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let cards = symbols
            .into_iter()
            .enumerate()
            .map(|(position, symbol)| Card::new(position as Position, symbol))
            .collect();
        Self {
            cards,
            matched_count: 0,
        }
    }

    /// Lays out `layout` in order, requiring exactly two cards of every pair in `alphabet`.
    pub fn from_symbols<S: AsRef<str>>(alphabet: &Alphabet, layout: &[S]) -> Result<Self> {
        let board = Self::from_symbols_unchecked(layout.iter().map(|s| Symbol::new(s.as_ref())));
        if board.is_valid_for(alphabet) {
            Ok(board)
        } else {
            Err(GameError::InvalidLayout)
        }
    }

    /// Whether every pair of `alphabet` appears exactly twice and nothing else does.
    pub fn is_valid_for(&self, alphabet: &Alphabet) -> bool {
        if self.cards.len() != usize::from(alphabet.card_count()) {
            return false;
        }

        let mut counts = vec![0u8; usize::from(alphabet.len())];
        for card in &self.cards {
            let Some(class) = alphabet.class_of(card.symbol()) else {
                return false;
            };
            counts[class] = counts[class].saturating_add(1);
        }
        counts.iter().all(|&count| count == 2)
    }

    pub fn validate_position(&self, position: Position) -> Result<Position> {
        if usize::from(position) < self.cards.len() {
            Ok(position)
        } else {
            Err(GameError::InvalidPosition)
        }
    }

    pub fn len(&self) -> CardCount {
        self.cards.len() as CardCount
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn card(&self, position: Position) -> Result<&Card> {
        let position = self.validate_position(position)?;
        Ok(&self[position])
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn matched_count(&self) -> CardCount {
        self.matched_count
    }

    /// Every card has been matched.
    pub fn is_cleared(&self) -> bool {
        !self.cards.is_empty() && usize::from(self.matched_count) == self.cards.len()
    }

    pub(crate) fn reveal(&mut self, position: Position) {
        self.cards[position.to_index()].set_face(CardFace::Revealed);
    }

    pub(crate) fn hide(&mut self, position: Position) {
        self.cards[position.to_index()].set_face(CardFace::Hidden);
    }

    pub(crate) fn mark_matched(&mut self, position: Position) {
        let card = &mut self.cards[position.to_index()];
        if !card.is_matched() {
            card.set_face(CardFace::Matched);
            self.matched_count += 1;
        }
    }
}

impl Index<Position> for Board {
    type Output = Card;

    fn index(&self, position: Position) -> &Self::Output {
        &self.cards[position.to_index()]
    }
}
