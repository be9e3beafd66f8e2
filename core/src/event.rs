use serde::{Deserialize, Serialize};

use crate::*;

/// Notification for the presentation layer, queued by the engine as the game progresses.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    FirstSelected(Position),
    PairEvaluated {
        positions: [Position; 2],
        matched: bool,
    },
    /// A mismatched pair was turned face down again.
    PairReverted([Position; 2]),
    Tick(u32),
    GameComplete {
        moves: u32,
        elapsed_secs: u32,
    },
}

impl GameEvent {
    pub fn notify<O: GameObserver + ?Sized>(self, observer: &mut O) {
        use GameEvent::*;
        match self {
            FirstSelected(position) => observer.on_first_selected(position),
            PairEvaluated { positions, matched } => observer.on_pair_evaluated(positions, matched),
            PairReverted(positions) => observer.on_pair_reverted(positions),
            Tick(elapsed_secs) => observer.on_tick(elapsed_secs),
            GameComplete {
                moves,
                elapsed_secs,
            } => observer.on_game_complete(moves, elapsed_secs),
        }
    }
}

/// Callback surface consumed by the presentation layer. Every method defaults to doing nothing.
pub trait GameObserver {
    fn on_first_selected(&mut self, _position: Position) {}

    fn on_pair_evaluated(&mut self, _positions: [Position; 2], _matched: bool) {}

    fn on_pair_reverted(&mut self, _positions: [Position; 2]) {}

    fn on_tick(&mut self, _elapsed_secs: u32) {}

    fn on_game_complete(&mut self, _moves: u32, _elapsed_secs: u32) {}
}
