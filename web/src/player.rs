use gloo::storage::{LocalStorage, Storage};

/// Key the login page stores the player name under, as a plain string.
const PLAYER_KEY: &str = "player";

/// Player name for the end-of-game message. Only read, the login page owns it.
pub(crate) fn player_name(forced: Option<&str>) -> Option<String> {
    let stored = || match LocalStorage::raw().get_item(PLAYER_KEY) {
        Ok(name) => name,
        Err(err) => {
            log::warn!("could not read player name: {:?}", err);
            None
        }
    };

    forced
        .map(str::to_string)
        .or_else(stored)
        .and_then(|name| normalize(&name))
}

fn normalize(name: &str) -> Option<String> {
    let name = name.trim();
    (!name.is_empty()).then(|| name.to_string())
}

pub(crate) fn congratulations(player: Option<&str>, moves: u32, elapsed_secs: u32) -> String {
    let greeting = match player {
        Some(name) => format!("Congratulations, {}!", name),
        None => "Congratulations!".to_string(),
    };
    format!(
        "{} You finished the game in {} seconds with a total of {} moves.",
        greeting, elapsed_secs, moves
    )
}
