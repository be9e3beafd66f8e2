use crate::player;
use crate::settings::Settings;
use crate::utils::*;
use clap::Args;
use concentration_core as game;
use game::{CardFace, GameObserver, Position};
use gloo::timers::callback::Interval;
use web_time::Instant;
use yew::prelude::*;

/// How often the engine clock is pumped, in milliseconds.
const CLOCK_PERIOD_MS: u32 = 100;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Select(Position),
    Advance,
    Restart,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    position: Position,
    symbol: AttrValue,
    face: CardFace,
    #[prop_or_default]
    locked: bool,
    callback: Callback<Position>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        position,
        symbol,
        face,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        face.is_face_up().then_some("reveal-card"),
        locked.then_some("locked"),
    );
    let front_class = classes!(
        "face",
        "front",
        matches!(face, CardFace::Matched).then_some("disabled-card"),
    );

    let character = symbol.clone();
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", position);
        callback.emit(position);
    });

    html! {
        <div {class} {onclick} data-character={character}>
            <div class={front_class}>{symbol}</div>
            <div class="face back"/>
        </div>
    }
}

/// Collects what the engine reported since the last message.
#[derive(Debug, Default)]
struct Feedback {
    redraw: bool,
    completed: Option<(u32, u32)>,
}

impl GameObserver for Feedback {
    fn on_first_selected(&mut self, position: Position) {
        log::debug!("first card: {}", position);
        self.redraw = true;
    }

    fn on_pair_evaluated(&mut self, positions: [Position; 2], matched: bool) {
        log::debug!("pair {:?} matched: {}", positions, matched);
        self.redraw = true;
    }

    fn on_pair_reverted(&mut self, positions: [Position; 2]) {
        log::debug!("pair {:?} hidden again", positions);
        self.redraw = true;
    }

    fn on_tick(&mut self, _elapsed_secs: u32) {
        self.redraw = true;
    }

    fn on_game_complete(&mut self, moves: u32, elapsed_secs: u32) {
        log::info!("game complete: {} moves in {}s", moves, elapsed_secs);
        self.redraw = true;
        self.completed = Some((moves, elapsed_secs));
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Number of pairs on the board
    #[arg(short, long)]
    pub pairs: Option<game::CardCount>,

    /// Milliseconds a mismatched pair stays face up
    #[arg(short, long)]
    pub revert_delay: Option<u64>,

    /// Player name, instead of the one stored by the login page
    #[arg(long)]
    pub player: Option<String>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::MatchEngine,
    player: Option<String>,
    completed: Option<(u32, u32)>,
    last_advance: Instant,
    _clock: Interval,
}

impl GameView {
    fn create_clock(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(CLOCK_PERIOD_MS, move || link.send_message(Msg::Advance))
    }

    /// Feeds the real time spent since the last call into the engine.
    fn sync_clock(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_advance);
        self.last_advance = now;
        self.engine.advance(elapsed);
    }

    fn take_feedback(&mut self) -> bool {
        let mut feedback = Feedback::default();
        self.engine.dispatch_events(&mut feedback);
        if let Some(completed) = feedback.completed {
            self.completed = Some(completed);
        }
        feedback.redraw
    }

    fn select(&mut self, position: Position) -> bool {
        self.sync_clock();
        let updated = match self.engine.select_card(position) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::error!("could not select card {}: {}", position, err);
                false
            }
        };
        self.take_feedback() || updated
    }

    fn get_state_class(&self) -> &'static str {
        use game::EngineState::*;
        match self.engine.state() {
            Ready => "not-started",
            Active if self.engine.is_locked() => "locked",
            Active => "in-progress",
            Complete => "complete",
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();

        let mut settings: Settings = LocalOrDefault::local_or_default();
        if settings.apply_overrides(props.pairs, props.revert_delay) {
            settings.local_save();
        }

        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}, settings: {:?}", seed, settings);

        Self {
            engine: game::MatchEngine::shuffled(settings.alphabet(), settings.engine_config(), seed),
            player: player::player_name(props.player.as_deref()),
            completed: None,
            last_advance: Instant::now(),
            _clock: GameView::create_clock(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Select(position) => self.select(position),
            Advance => {
                self.sync_clock();
                self.take_feedback()
            }
            Restart => {
                if let Err(err) = self.engine.restart() {
                    log::error!("failed to start a new game: {}", err);
                    return false;
                }
                self.completed = None;
                self.last_advance = Instant::now();
                log::debug!("new game");
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let moves = format_for_counter(self.engine.moves());
        let elapsed_time = format_for_counter(self.engine.elapsed_secs());
        let locked = self.engine.is_locked();
        let cb_select = ctx.link().callback(Select);
        let cb_restart = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Restart
        });

        html! {
            <div class={classes!("concentration", self.get_state_class())}>
                <nav>
                    <span class="player">{self.player.clone().unwrap_or_default()}</span>
                    <aside class="moves">{moves}</aside>
                    <aside class="timer">{elapsed_time}</aside>
                </nav>
                <div class="grid">
                    {
                        for self.engine.board().cards().iter().map(|card| {
                            let symbol = AttrValue::from(card.symbol().to_string());
                            html! {
                                <CardView
                                    position={card.position()}
                                    {symbol}
                                    face={card.face()}
                                    {locked}
                                    callback={cb_select.clone()}
                                />
                            }
                        })
                    }
                </div>
                {
                    if let Some((moves, elapsed_secs)) = self.completed {
                        html! {
                            <>
                                <div class="endgame-message">
                                    <p>{player::congratulations(self.player.as_deref(), moves, elapsed_secs)}</p>
                                </div>
                                <button class="restart-button" onclick={cb_restart}>{"Restart game"}</button>
                            </>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}
