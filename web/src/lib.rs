use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod player;
mod settings;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

impl Args {
    /// Arguments are passed in the location hash, e.g. `#--seed=3&--pairs=6&-vv`.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        // the leading empty piece stands in for the binary name
        Self::try_parse_from(hash.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = Args::from_location_hash("").unwrap();

        assert_eq!(args.game.seed, None);
        assert_eq!(args.game.pairs, None);
    }

    #[test]
    fn hash_arguments_are_split_on_ampersands() {
        let args = Args::from_location_hash("#--seed=7&--pairs=4&--player=Ana&--revert-delay=900").unwrap();

        assert_eq!(args.game.seed, Some(7));
        assert_eq!(args.game.pairs, Some(4));
        assert_eq!(args.game.revert_delay, Some(900));
        assert_eq!(args.game.player.as_deref(), Some("Ana"));
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(Args::from_location_hash("#--columns=10").is_err());
    }
}
