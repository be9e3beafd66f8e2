/// Index of a card on the board, counted from the top-left in reading order.
pub type Position = u16;

/// Count type used for card and pair counts.
pub type CardCount = u16;

/// Largest number of pairs a single board can hold.
pub const MAX_PAIRS: CardCount = CardCount::MAX / 2;

/// Number of cards needed for `pairs` pairs.
pub const fn cards_for(pairs: CardCount) -> CardCount {
    pairs.saturating_mul(2)
}

pub trait ToIndex {
    fn to_index(self) -> usize;
}

impl ToIndex for Position {
    fn to_index(self) -> usize {
        self.into()
    }
}
