use crate::utils::*;
use concentration_core as game;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    pub pairs: game::CardCount,
    pub revert_delay_ms: u64,
}

impl Settings {
    pub const DEFAULT_PAIRS: game::CardCount = 10;

    /// Applies values forced from the command line, returns whether anything changed.
    pub(crate) fn apply_overrides(
        &mut self,
        pairs: Option<game::CardCount>,
        revert_delay_ms: Option<u64>,
    ) -> bool {
        let before = *self;
        if let Some(pairs) = pairs {
            self.pairs = pairs.clamp(1, game::MAX_PAIRS);
        }
        if let Some(revert_delay_ms) = revert_delay_ms {
            self.revert_delay_ms = revert_delay_ms;
        }
        before != *self
    }

    pub(crate) fn alphabet(&self) -> game::Alphabet {
        game::Alphabet::numbered(self.pairs).unwrap_or_else(|err| {
            log::warn!("{}, falling back to {} pairs", err, Self::DEFAULT_PAIRS);
            Self::default().alphabet()
        })
    }

    pub(crate) fn engine_config(&self) -> game::EngineConfig {
        game::EngineConfig::default().with_revert_delay(Duration::from_millis(self.revert_delay_ms))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pairs: Self::DEFAULT_PAIRS,
            revert_delay_ms: game::EngineConfig::DEFAULT_REVERT_DELAY.as_millis() as u64,
        }
    }
}

impl StorageKey for Settings {
    const KEY: &'static str = "concentration:settings";
}
