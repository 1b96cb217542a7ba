//! End of session: net worth, final standings, score submission.
//!
//! ## Net worth
//!
//! Cash, plus for every unmortgaged holding the square's price and the
//! building values from [`EngineConfig`]; a mortgaged holding subtracts its
//! mortgage value instead. Nothing in the engine mortgages a holding, so the
//! second branch only applies to snapshots written elsewhere.
//!
//! ## Ending
//!
//! Scores are submitted in standing order and submission stops at the first
//! failure. The session slot is cleared either way.

pub mod service;

pub use service::{InMemoryScoreService, ScoreService, ScoreSubmission};

use tracing::{info, warn};

use crate::board::BoardCatalog;
use crate::core::{EngineConfig, Player, PlayerId, ScoreError, SessionState};
use crate::io::SnapshotStore;

/// A player's end-of-session net worth.
#[must_use]
pub fn net_worth(player: &Player, catalog: &BoardCatalog, config: &EngineConfig) -> i64 {
    let holdings: i64 = player
        .holdings
        .iter()
        .filter_map(|holding| {
            let square = catalog.get(holding.square_id)?;
            if holding.mortgaged {
                return Some(-square.mortgage().unwrap_or(0));
            }
            let mut value = square.price().unwrap_or(0);
            value += i64::from(holding.house_count) * config.house_value;
            if holding.has_hotel {
                value += config.hotel_value;
            }
            Some(value)
        })
        .sum();
    player.money + holdings
}

/// One row of the final table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standing {
    pub player: PlayerId,
    pub nick_name: String,
    pub country_code: String,
    pub net_worth: i64,
}

impl Standing {
    fn submission(&self) -> ScoreSubmission {
        ScoreSubmission {
            nick_name: self.nick_name.clone(),
            score: self.net_worth,
            country_code: self.country_code.clone(),
        }
    }
}

/// Players ranked by net worth, richest first. Ties keep seating order.
#[must_use]
pub fn final_standings(state: &SessionState, catalog: &BoardCatalog, config: &EngineConfig) -> Vec<Standing> {
    let mut standings: Vec<Standing> = state
        .player_ids()
        .zip(state.players())
        .map(|(player, p)| Standing {
            player,
            nick_name: p.nick_name.clone(),
            country_code: p.country_code.clone(),
            net_worth: net_worth(p, catalog, config),
        })
        .collect();
    standings.sort_by(|a, b| b.net_worth.cmp(&a.net_worth));
    standings
}

/// What ending a session did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummary {
    pub standings: Vec<Standing>,
    /// Scores accepted by the service.
    pub submitted: usize,
    /// First submission failure, if any. Reported, never rolled back.
    pub score_error: Option<ScoreError>,
}

impl SessionSummary {
    #[must_use]
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }
}

/// Rank the players, optionally submit their scores, and clear the session.
pub fn end_session(
    state: &SessionState,
    catalog: &BoardCatalog,
    config: &EngineConfig,
    service: &mut dyn ScoreService,
    store: &mut dyn SnapshotStore,
    save_scores: bool,
) -> SessionSummary {
    let standings = final_standings(state, catalog, config);
    let mut submitted = 0;
    let mut score_error = None;

    if save_scores {
        for standing in &standings {
            match service.submit(&standing.submission()) {
                Ok(()) => submitted += 1,
                Err(err) => {
                    warn!(%err, player = %standing.nick_name, "score submission failed");
                    score_error = Some(err);
                    break;
                }
            }
        }
    }

    abandon_session(store);
    if let Some(winner) = standings.first() {
        info!(winner = %winner.nick_name, net_worth = winner.net_worth, submitted, "session ended");
    }

    SessionSummary {
        standings,
        submitted,
        score_error,
    }
}

/// Drop the session without scoring.
pub fn abandon_session(store: &mut dyn SnapshotStore) {
    if let Err(err) = store.clear() {
        warn!(%err, "could not clear the session slot");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SquareId;
    use crate::core::{Holding, TokenColor};
    use crate::io::MemoryStore;

    fn state() -> SessionState {
        let mut ana = Player::new("ana", TokenColor::Red, "co", 1000);
        let mut developed = Holding::new(SquareId::new(3));
        developed.house_count = 2;
        let mut hotel = Holding::new(SquareId::new(1));
        hotel.has_hotel = true;
        ana.holdings.extend([developed, hotel]);

        let mut bo = Player::new("bo", TokenColor::Blue, "ar", 1500);
        let mut mortgaged = Holding::new(SquareId::new(39));
        mortgaged.mortgaged = true;
        bo.holdings.push(mortgaged);

        let cy = Player::new("cy", TokenColor::Green, "mx", 1300);
        SessionState::new(vec![ana, bo, cy]).unwrap()
    }

    #[test]
    fn test_net_worth() {
        let state = state();
        let catalog = BoardCatalog::standard();
        let config = EngineConfig::default();

        // 1000 + (60 + 200) + (60 + 200)
        assert_eq!(net_worth(&state.players()[0], &catalog, &config), 1520);
        // 1500 - 200 mortgage
        assert_eq!(net_worth(&state.players()[1], &catalog, &config), 1300);
        assert_eq!(net_worth(&state.players()[2], &catalog, &config), 1300);
    }

    #[test]
    fn test_standings_stable_on_ties() {
        let standings = final_standings(&state(), &BoardCatalog::standard(), &EngineConfig::default());

        let order: Vec<_> = standings.iter().map(|s| s.nick_name.as_str()).collect();
        assert_eq!(order, vec!["ana", "bo", "cy"]);
        assert_eq!(standings[0].player, PlayerId::new(0));
    }

    #[test]
    fn test_end_session_submits_and_clears() {
        let state = state();
        let mut store = MemoryStore::new();
        store.save(state.players()).unwrap();
        let mut service = InMemoryScoreService::new();

        let summary = end_session(
            &state,
            &BoardCatalog::standard(),
            &EngineConfig::default(),
            &mut service,
            &mut store,
            true,
        );

        assert_eq!(summary.submitted, 3);
        assert_eq!(summary.score_error, None);
        assert_eq!(summary.winner().map(|w| w.nick_name.as_str()), Some("ana"));
        assert_eq!(service.leaderboard().unwrap()[0].score, 1520);
        assert!(!store.has_snapshot());
    }

    #[test]
    fn test_submission_failure_still_clears() {
        let state = state();
        let mut store = MemoryStore::new();
        store.save(state.players()).unwrap();
        let mut service = InMemoryScoreService::new().failing_after(1);

        let summary = end_session(
            &state,
            &BoardCatalog::standard(),
            &EngineConfig::default(),
            &mut service,
            &mut store,
            true,
        );

        assert_eq!(summary.submitted, 1);
        assert!(matches!(summary.score_error, Some(ScoreError::Unavailable(_))));
        assert!(!store.has_snapshot());
    }

    #[test]
    fn test_end_without_saving() {
        let state = state();
        let mut store = MemoryStore::new();
        store.save(state.players()).unwrap();
        let mut service = InMemoryScoreService::new();

        let summary = end_session(
            &state,
            &BoardCatalog::standard(),
            &EngineConfig::default(),
            &mut service,
            &mut store,
            false,
        );

        assert_eq!(summary.submitted, 0);
        assert!(service.is_empty());
        assert_eq!(summary.standings.len(), 3);
        assert!(!store.has_snapshot());
    }
}
