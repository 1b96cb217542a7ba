//! Session setup: turn filled-in player forms into the starting player list.
//!
//! ## Validation
//!
//! - Player count within `[min_players, max_players]`
//! - Nicknames present and unique, ignoring case and surrounding spaces
//! - One player per token colour
//! - A country chosen for every player
//!
//! A validated list is written to the snapshot store; the engine then loads it
//! with [`SessionState::load`].

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::{EngineConfig, Player, SessionState, SetupError, TokenColor};
use crate::io::SnapshotStore;

/// One filled-in setup form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub nick_name: String,
    pub color: TokenColor,
    pub country_code: String,
}

impl PlayerSetup {
    pub fn new(nick_name: impl Into<String>, color: TokenColor, country_code: impl Into<String>) -> Self {
        Self {
            nick_name: nick_name.into(),
            color,
            country_code: country_code.into(),
        }
    }
}

/// Validate the forms and create players with the starting cash.
///
/// Nicknames and country codes are stored trimmed.
pub fn new_players(setups: &[PlayerSetup], config: &EngineConfig) -> Result<Vec<Player>, SetupError> {
    if !(config.min_players..=config.max_players).contains(&setups.len()) {
        return Err(SetupError::PlayerCount {
            min: config.min_players,
            max: config.max_players,
            got: setups.len(),
        });
    }

    let mut names = FxHashSet::default();
    let mut colors = FxHashSet::default();
    let mut players = Vec::with_capacity(setups.len());

    for (seat, setup) in setups.iter().enumerate() {
        let nick_name = setup.nick_name.trim();
        if nick_name.is_empty() {
            return Err(SetupError::BlankNickname { seat });
        }
        if !names.insert(nick_name.to_lowercase()) {
            return Err(SetupError::DuplicateNickname(nick_name.to_string()));
        }
        if !colors.insert(setup.color) {
            return Err(SetupError::DuplicateColor(setup.color));
        }
        let country_code = setup.country_code.trim();
        if country_code.is_empty() {
            return Err(SetupError::BlankCountry(nick_name.to_string()));
        }

        players.push(Player::new(
            nick_name,
            setup.color,
            country_code,
            config.starting_money,
        ));
    }

    Ok(players)
}

/// Validate the forms, write the new player list to the store, and return
/// the session ready for its first turn.
pub fn start_session(
    setups: &[PlayerSetup],
    config: &EngineConfig,
    store: &mut dyn SnapshotStore,
) -> Result<SessionState, SetupError> {
    let players = new_players(setups, config)?;
    store.save(&players)?;
    info!(players = players.len(), "session started");
    SessionState::new(players)
}
