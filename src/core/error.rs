//! Error taxonomy.
//!
//! Running out of money for a voluntary purchase, build or jail payment is not
//! an error: those come back as refusal outcomes. Errors here are either fatal
//! to the session (setup, invariant violations) or a rejected request that
//! left the state untouched.

use thiserror::Error;

use super::PlayerId;
use crate::board::SquareId;

/// Session cannot start.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("no player data found for this session")]
    NoPlayers,

    #[error("expected between {min} and {max} players, got {got}")]
    PlayerCount { min: usize, max: usize, got: usize },

    #[error("player {seat} has no nickname")]
    BlankNickname { seat: usize },

    #[error("nickname '{0}' is already in use")]
    DuplicateNickname(String),

    #[error("token colour {0:?} is already taken")]
    DuplicateColor(crate::core::TokenColor),

    #[error("player '{0}' has no country selected")]
    BlankCountry(String),

    #[error("saved player '{player}' does not fit the board: {problem}")]
    InvalidSnapshot {
        player: String,
        problem: SnapshotProblem,
    },

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Why a persisted player does not fit the board it is loaded against.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotProblem {
    #[error("position {position} is off a board of {len} squares")]
    PositionOffBoard { position: usize, len: usize },

    #[error("holds square {0}, which is not on the board")]
    UnknownSquare(SquareId),

    #[error("holds square {0}, which cannot be bought")]
    NotPurchasable(SquareId),

    #[error("square {0} is already held by another player")]
    HeldTwice(SquareId),

    #[error("square {square} has {houses} houses")]
    TooManyHouses { square: SquareId, houses: u8 },

    #[error("square {0} has a hotel and houses")]
    HotelWithHouses(SquareId),

    #[error("square {0} is developed but is not a colour-group property")]
    NotBuildable(SquareId),
}

/// Board catalog is unusable.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("board has no squares")]
    EmptyBoard,

    #[error("square id {0} appears more than once")]
    DuplicateSquare(SquareId),

    /// Square ids double as ring positions, so they must be `0..N`.
    #[error("square id {id} is outside a ring of {len} squares")]
    SquareOutOfRing { id: SquareId, len: usize },

    #[error("board has no jail square")]
    NoJail,

    #[error("the {0} deck is empty")]
    EmptyDeck(&'static str),

    #[error("malformed catalog: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Rejected user input. Nothing was changed; the caller may re-prompt.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("dice total must be between 1 and 12, got {0}")]
    DiceOverrideOutOfRange(u8),
}

/// Snapshot store failure.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("snapshot i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot json is invalid: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
}

/// Score service failure. Never rolls back the end of a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScoreError {
    #[error("score service unavailable: {0}")]
    Unavailable(String),

    #[error("score for '{nick_name}' rejected: {reason}")]
    Rejected { nick_name: String, reason: String },
}

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Input(#[from] InputError),

    /// A computed position has no square. Unreachable with a validated
    /// catalog; treated as a programming error.
    #[error("invariant violated: no square with id {0} on the board")]
    SquareNotFound(SquareId),

    #[error("{0} is in jail and must pay or roll for doubles")]
    PlayerJailed(PlayerId),

    #[error("{0} is not in jail")]
    NotJailed(PlayerId),

    #[error("{0} is not seated in this session")]
    UnknownPlayer(PlayerId),
}
