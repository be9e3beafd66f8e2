use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible side of a card.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardFace {
    Hidden,
    Revealed,
    /// Permanently face up, can no longer be selected.
    Matched,
}

impl CardFace {
    pub const fn is_face_up(self) -> bool {
        matches!(self, Self::Revealed | Self::Matched)
    }
}

impl Default for CardFace {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Card {
    position: Position,
    symbol: Symbol,
    face: CardFace,
}

impl Card {
    pub fn new(position: Position, symbol: Symbol) -> Self {
        Self {
            position,
            symbol,
            face: Default::default(),
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn face(&self) -> CardFace {
        self.face
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self.face, CardFace::Hidden)
    }

    pub fn is_matched(&self) -> bool {
        matches!(self.face, CardFace::Matched)
    }

    pub(crate) fn set_face(&mut self, face: CardFace) {
        self.face = face;
    }
}
