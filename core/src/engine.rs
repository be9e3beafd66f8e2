use alloc::vec::{Drain, Vec};
use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Ready -> Active (first selection starts the ticker)
/// - Active -> Complete (last pair matched)
/// - any -> Ready (restart)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Ready,
    Active,
    Complete,
}

impl EngineState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Ready
    }
}

/// Cards picked in the current turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnState {
    Idle,
    OneSelected(Position),
    /// Second card picked, the pair is being compared.
    Evaluating([Position; 2]),
    /// Mismatched pair waiting to be turned face down by `task`.
    RevertPending {
        pair: [Position; 2],
        task: TaskHandle,
    },
}

impl TurnState {
    /// No selection is accepted while locked.
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Evaluating(_) | Self::RevertPending { .. })
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCounters {
    /// Completed two-card comparisons.
    pub moves: u32,
    /// Ticker periods since the first selection.
    pub elapsed_secs: u32,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum EngineTask {
    Tick,
    Revert,
}

/// One game of concentration from first flip to the last matched pair.
#[derive(Clone, Debug)]
pub struct MatchEngine<G = ShuffledBoardGenerator> {
    alphabet: Alphabet,
    config: EngineConfig,
    generator: G,
    board: Board,
    turn: TurnState,
    state: EngineState,
    counters: SessionCounters,
    timeline: Timeline<EngineTask>,
    ticker: Option<TaskHandle>,
    events: Vec<GameEvent>,
}

impl MatchEngine<ShuffledBoardGenerator> {
    pub fn shuffled(alphabet: Alphabet, config: EngineConfig, seed: u64) -> Self {
        let mut generator = ShuffledBoardGenerator::new(seed);
        let board = generator.deal(&alphabet);
        Self::with_board(alphabet, config, generator, board)
    }
}

impl<G: BoardGenerator> MatchEngine<G> {
    /// Fails with [`GameError::InvalidLayout`] when `generator` deals a board that does not fit `alphabet`.
    pub fn new(alphabet: Alphabet, config: EngineConfig, mut generator: G) -> Result<Self> {
        let board = generator.generate(&alphabet)?;
        Ok(Self::with_board(alphabet, config, generator, board))
    }

    fn with_board(alphabet: Alphabet, config: EngineConfig, generator: G, board: Board) -> Self {
        log::debug!(
            "new game: {} pairs, revert delay {:?}",
            alphabet.len(),
            config.revert_delay
        );
        Self {
            alphabet,
            config,
            generator,
            board,
            turn: Default::default(),
            state: Default::default(),
            counters: Default::default(),
            timeline: Timeline::new(),
            ticker: None,
            events: Vec::new(),
        }
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    pub fn config(&self) -> EngineConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn card(&self, position: Position) -> Result<&Card> {
        self.board.card(position)
    }

    pub fn turn(&self) -> TurnState {
        self.turn
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn counters(&self) -> SessionCounters {
        self.counters
    }

    pub fn moves(&self) -> u32 {
        self.counters.moves
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.counters.elapsed_secs
    }

    pub fn is_locked(&self) -> bool {
        self.turn.is_locked()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_complete()
    }

    /// Engine clock, advanced only by [`MatchEngine::advance`].
    pub fn now(&self) -> Duration {
        self.timeline.now()
    }

    /// Whether a new game can start without discarding a game in progress.
    pub fn is_settled(&self) -> bool {
        matches!(self.turn, TurnState::Idle) && !matches!(self.state, EngineState::Active)
    }

    pub fn select_card(&mut self, position: Position) -> Result<SelectionResult> {
        use SelectionResult::*;

        let position = self.board.validate_position(position)?;

        if self.turn.is_locked() || self.board[position].is_matched() {
            log::trace!("ignored selection at {}: {:?}", position, self.turn);
            return Ok(Ignored);
        }

        Ok(match self.turn {
            TurnState::Idle => {
                self.board.reveal(position);
                self.turn = TurnState::OneSelected(position);
                self.mark_started();
                self.events.push(GameEvent::FirstSelected(position));
                FirstSelected(position)
            }
            TurnState::OneSelected(first) if first == position => Ignored,
            TurnState::OneSelected(first) => {
                self.board.reveal(position);
                let positions = [first, position];
                self.turn = TurnState::Evaluating(positions);
                self.evaluate(positions)
            }
            TurnState::Evaluating(_) | TurnState::RevertPending { .. } => Ignored,
        })
    }

    /// Moves the engine clock forward, running every ticker period and revert that falls due.
    ///
    /// Returns how many tasks fired.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.timeline.now().saturating_add(elapsed);
        let mut fired = 0;

        while let Some((handle, task)) = self.timeline.pop_due(until) {
            fired += 1;
            match task {
                EngineTask::Tick => self.on_tick(handle),
                EngineTask::Revert => self.on_revert(handle),
            }
        }

        self.timeline.advance_to(until);
        fired
    }

    /// Discards the board and counters, cancels the ticker and any pending revert, and deals a new board.
    ///
    /// When the generator fails the current game is left untouched.
    pub fn restart(&mut self) -> Result<()> {
        let board = self.generator.generate(&self.alphabet)?;

        let pending = self.timeline.pending_count();
        self.timeline.clear();
        self.ticker = None;
        self.events.clear();

        self.board = board;
        self.turn = TurnState::Idle;
        self.state = EngineState::Ready;
        self.counters = SessionCounters::default();

        log::debug!("restarted, cancelled {} pending tasks", pending);
        Ok(())
    }

    /// Hands queued events over in the order they happened.
    pub fn drain_events(&mut self) -> Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    /// Drains queued events into `observer`.
    pub fn dispatch_events<O: GameObserver + ?Sized>(&mut self, observer: &mut O) {
        for event in self.events.drain(..) {
            event.notify(observer);
        }
    }

    fn evaluate(&mut self, positions: [Position; 2]) -> SelectionResult {
        let [first, second] = positions;
        let matched = self
            .alphabet
            .is_match(self.board[first].symbol(), self.board[second].symbol());

        self.counters.moves = self.counters.moves.saturating_add(1);
        log::debug!(
            "move {}: {} and {} {}",
            self.counters.moves,
            first,
            second,
            if matched { "match" } else { "differ" }
        );
        self.events
            .push(GameEvent::PairEvaluated { positions, matched });

        if matched {
            self.resolve_match(positions);
        } else {
            let task = self
                .timeline
                .schedule_once(EngineTask::Revert, self.config.revert_delay);
            self.turn = TurnState::RevertPending {
                pair: positions,
                task,
            };
        }

        SelectionResult::PairEvaluated { positions, matched }
    }

    fn resolve_match(&mut self, positions: [Position; 2]) {
        for position in positions {
            self.board.mark_matched(position);
        }
        self.turn = TurnState::Idle;

        if self.board.is_cleared() {
            self.end_game();
        }
    }

    fn end_game(&mut self) {
        if self.state.is_complete() {
            return;
        }

        if let Some(ticker) = self.ticker.take() {
            self.timeline.cancel(ticker);
        }
        self.state = EngineState::Complete;

        let SessionCounters {
            moves,
            elapsed_secs,
        } = self.counters;
        log::debug!("completed in {} moves, {}s", moves, elapsed_secs);
        self.events.push(GameEvent::GameComplete {
            moves,
            elapsed_secs,
        });
    }

    fn mark_started(&mut self) {
        if matches!(self.state, EngineState::Ready) {
            self.state = EngineState::Active;
            self.ticker = Some(
                self.timeline
                    .schedule_repeating(EngineTask::Tick, self.config.tick_interval),
            );
            log::debug!("started at {:?}", self.timeline.now());
        }
    }

    fn on_tick(&mut self, handle: TaskHandle) {
        if self.ticker != Some(handle) {
            log::warn!("dropped stale tick {:?}", handle);
            return;
        }

        self.counters.elapsed_secs = self.counters.elapsed_secs.saturating_add(1);
        self.events.push(GameEvent::Tick(self.counters.elapsed_secs));
    }

    fn on_revert(&mut self, handle: TaskHandle) {
        match self.turn {
            TurnState::RevertPending { pair, task } if task == handle => {
                for position in pair {
                    self.board.hide(position);
                }
                self.turn = TurnState::Idle;
                log::trace!("reverted {:?}", pair);
                self.events.push(GameEvent::PairReverted(pair));
            }
            _ => log::warn!("dropped stale revert {:?}", handle),
        }
    }
}
