//! Session state: the player list and whose turn it is.
//!
//! `SessionState` is passed explicitly into every engine operation; nothing
//! reaches it through ambient lookup. Only the player list is persisted; the
//! ownership index is derived and rebuilt on load.
//!
//! ## Ownership index
//!
//! Ownership is defined by the players' holdings. `owners` mirrors it so rent
//! lookups avoid a scan over every player; it is updated on every acquisition
//! and can be recomputed with [`SessionState::rebuild_index`].
//!
//! ## Loading
//!
//! A snapshot is checked against the board before play resumes: positions on
//! the ring, holdings only on purchasable squares, one owner per square, and
//! at most four houses or a lone hotel per holding.

use rustc_hash::{FxHashMap, FxHashSet};

use super::error::{EngineError, SetupError, SnapshotProblem};
use super::player::{Holding, Player, PlayerId, MAX_SEATS};
use crate::board::{BoardCatalog, SquareId, SquareKind};
use crate::io::SnapshotStore;

/// Mutable state of the single active session.
#[derive(Clone, Debug)]
pub struct SessionState {
    players: Vec<Player>,
    current_player_index: usize,
    owners: FxHashMap<SquareId, PlayerId>,
}

impl SessionState {
    /// Start a session from an explicit player list.
    pub fn new(players: Vec<Player>) -> Result<Self, SetupError> {
        if players.is_empty() {
            return Err(SetupError::NoPlayers);
        }
        if players.len() > MAX_SEATS {
            return Err(SetupError::PlayerCount {
                min: 1,
                max: MAX_SEATS,
                got: players.len(),
            });
        }

        let mut state = Self {
            players,
            current_player_index: 0,
            owners: FxHashMap::default(),
        };
        state.rebuild_index();
        Ok(state)
    }

    /// Start a session from the persisted snapshot.
    ///
    /// A missing or empty snapshot is fatal: there is no session without
    /// players. So is a snapshot that does not fit `catalog`.
    pub fn load(store: &dyn SnapshotStore, catalog: &BoardCatalog) -> Result<Self, SetupError> {
        let players = store.load()?.ok_or(SetupError::NoPlayers)?;
        let state = Self::new(players)?;
        state.validate(catalog)?;
        Ok(state)
    }

    /// Check every player against the board.
    pub fn validate(&self, catalog: &BoardCatalog) -> Result<(), SetupError> {
        let mut held = FxHashSet::default();
        for player in &self.players {
            let invalid = |problem| SetupError::InvalidSnapshot {
                player: player.nick_name.clone(),
                problem,
            };

            if player.position >= catalog.len() {
                return Err(invalid(SnapshotProblem::PositionOffBoard {
                    position: player.position,
                    len: catalog.len(),
                }));
            }

            for holding in &player.holdings {
                let square = holding.square_id;
                let kind = match catalog.get(square) {
                    Some(found) => &found.kind,
                    None => return Err(invalid(SnapshotProblem::UnknownSquare(square))),
                };
                if !held.insert(square) {
                    return Err(invalid(SnapshotProblem::HeldTwice(square)));
                }

                let developed = holding.has_hotel || holding.house_count > 0;
                match kind {
                    SquareKind::Property(_) => {}
                    SquareKind::Railroad(_) if developed => {
                        return Err(invalid(SnapshotProblem::NotBuildable(square)));
                    }
                    SquareKind::Railroad(_) => {}
                    _ => return Err(invalid(SnapshotProblem::NotPurchasable(square))),
                }
                if holding.house_count > Holding::MAX_HOUSES {
                    return Err(invalid(SnapshotProblem::TooManyHouses {
                        square,
                        houses: holding.house_count,
                    }));
                }
                if holding.has_hotel && holding.house_count > 0 {
                    return Err(invalid(SnapshotProblem::HotelWithHouses(square)));
                }
            }
        }
        Ok(())
    }

    /// Number of seated players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.players.len())
    }

    /// All players in seating order.
    #[must_use]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Whose turn it is.
    #[must_use]
    pub fn current_player_id(&self) -> PlayerId {
        // Seats are capped at MAX_SEATS, so every index fits.
        PlayerId::new(self.current_player_index as u8)
    }

    /// Raw turn index.
    #[must_use]
    pub fn current_player_index(&self) -> usize {
        self.current_player_index
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_index]
    }

    /// A player by id.
    pub fn player(&self, id: PlayerId) -> Result<&Player, EngineError> {
        self.players.get(id.index()).ok_or(EngineError::UnknownPlayer(id))
    }

    /// A player by id, mutably.
    pub fn player_mut(&mut self, id: PlayerId) -> Result<&mut Player, EngineError> {
        self.players.get_mut(id.index()).ok_or(EngineError::UnknownPlayer(id))
    }

    /// Hand the turn to the next seat. Never stalls.
    pub fn advance_turn(&mut self) -> PlayerId {
        self.current_player_index = (self.current_player_index + 1) % self.players.len();
        self.current_player_id()
    }

    /// Leave the turn with `player`, e.g. after doubles.
    pub(crate) fn keep_turn(&mut self, player: PlayerId) {
        if player.index() < self.players.len() {
            self.current_player_index = player.index();
        }
    }

    /// Current owner of a square.
    #[must_use]
    pub fn owner_of(&self, square: SquareId) -> Option<PlayerId> {
        self.owners.get(&square).copied()
    }

    /// Record a new holding for `buyer`. The square must be unowned.
    pub(crate) fn acquire(&mut self, buyer: PlayerId, square: SquareId) -> Result<(), EngineError> {
        debug_assert!(self.owner_of(square).is_none(), "square {square} already owned");
        self.player_mut(buyer)?.holdings.push(Holding::new(square));
        self.owners.insert(square, buyer);
        Ok(())
    }

    /// Recompute the ownership index from holdings.
    pub fn rebuild_index(&mut self) {
        self.owners.clear();
        for (id, player) in PlayerId::all(self.players.len()).zip(&self.players) {
            for holding in &player.holdings {
                self.owners.insert(holding.square_id, id);
            }
        }
    }
}
