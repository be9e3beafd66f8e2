#![no_std]

extern crate alloc;

use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use alphabet::*;
pub use board::*;
pub use card::*;
pub use engine::*;
pub use error::*;
pub use event::*;
pub use generator::*;
pub use timeline::*;
pub use types::*;

mod alphabet;
mod board;
mod card;
mod engine;
mod error;
mod event;
mod generator;
mod timeline;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// How long a mismatched pair stays face up before it is hidden again.
    pub revert_delay: Duration,
    /// Period of the session ticker, one elapsed unit per period.
    pub tick_interval: Duration,
}

impl EngineConfig {
    pub const DEFAULT_REVERT_DELAY: Duration = Duration::from_millis(500);
    pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(1);

    pub const fn new(revert_delay: Duration, tick_interval: Duration) -> Self {
        Self {
            revert_delay,
            tick_interval,
        }
    }

    pub const fn with_revert_delay(self, revert_delay: Duration) -> Self {
        Self {
            revert_delay,
            ..self
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REVERT_DELAY, Self::DEFAULT_TICK_INTERVAL)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionResult {
    /// Out-of-protocol selection, nothing changed.
    Ignored,
    FirstSelected(Position),
    PairEvaluated {
        positions: [Position; 2],
        matched: bool,
    },
}

impl SelectionResult {
    pub const fn has_update(self) -> bool {
        use SelectionResult::*;
        match self {
            Ignored => false,
            FirstSelected(_) => true,
            PairEvaluated { .. } => true,
        }
    }
}
