//! Game turn and property-transaction engine.
//!
//! A strictly turn-serialised state machine:
//!
//! 1. **Turn**: `roll_dice` produces a roll, tracks doubles, and hands the turn on
//! 2. **Movement**: `move_player` advances a token and pays the salary on wrap
//! 3. **Dispatch**: the landing square routes to its handler
//! 4. **Jail**: entry, voluntary fee, doubles attempts, forced fee
//! 5. **Property**: purchase offers, rent, monopoly test
//! 6. **Construction**: houses and hotels on complete colour groups
//!
//! Every mutating step is followed by a full snapshot write. The only
//! suspension points are presenter questions; each landing resolves fully
//! before the handoff decision is made.

mod construction;
mod dispatch;
mod jail;
mod movement;
pub mod outcome;
mod property;
mod turn;

pub use outcome::{
    BuildOutcome, BuildRefusal, DiceRoll, Handoff, JailEvent, JailReason, Landing, MoveReport,
    TurnReport,
};

use tracing::warn;

use crate::board::BoardCatalog;
use crate::core::{EngineConfig, GameRng, PlayerId, RandomSource, SessionState};
use crate::io::{Presenter, SnapshotStore};

/// Drives a session. Owns the read-only catalog and the collaborators;
/// the mutable [`SessionState`] is passed into each operation.
#[derive(Debug)]
pub struct GameEngine<P, S, R = GameRng> {
    catalog: BoardCatalog,
    config: EngineConfig,
    rng: R,
    presenter: P,
    store: S,
}

impl<P: Presenter, S: SnapshotStore> GameEngine<P, S, GameRng> {
    /// Create an engine whose dice come from `config.seed` (or entropy).
    pub fn new(catalog: BoardCatalog, config: EngineConfig, presenter: P, store: S) -> Self {
        let rng = GameRng::from_seed_option(config.seed);
        Self::with_rng(catalog, config, rng, presenter, store)
    }
}

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Create an engine with an explicit randomness source.
    pub fn with_rng(catalog: BoardCatalog, config: EngineConfig, rng: R, presenter: P, store: S) -> Self {
        Self {
            catalog,
            config,
            rng,
            presenter,
            store,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &BoardCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Take the collaborators back, e.g. to reuse the store after the session.
    pub fn into_parts(self) -> (P, S, R) {
        (self.presenter, self.store, self.rng)
    }

    /// Write the player list. A failed write is logged and never aborts a step.
    fn persist(&mut self, state: &SessionState) {
        if let Err(err) = self.store.save(state.players()) {
            warn!(%err, "snapshot write failed");
        }
    }

    /// Roll two fresh dice.
    fn roll(&mut self) -> DiceRoll {
        let d1 = self.rng.roll_die();
        let d2 = self.rng.roll_die();
        DiceRoll::new(d1, d2)
    }

    /// Post a notice if a debit left the player below zero.
    ///
    /// Bankruptcy is not resolved; the balance is allowed to stay negative.
    fn flag_negative_balance(&mut self, state: &SessionState, player: PlayerId) {
        let Ok(p) = state.player(player) else {
            return;
        };
        if p.money < 0 {
            warn!(player = %p.nick_name, money = p.money, "negative balance");
            let message = format!("{} has insufficient funds (balance ${})", p.nick_name, p.money);
            self.presenter.notify(&message);
        }
    }
}
