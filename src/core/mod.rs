//! Core types: players, session state, configuration, randomness, errors.
//!
//! These are shared by the board, the engine, and the collaborators around it.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;
pub mod state;

pub use config::EngineConfig;
pub use error::{
    CatalogError, EngineError, InputError, PersistenceError, ScoreError, SetupError,
    SnapshotProblem,
};
pub use player::{Holding, Player, PlayerId, TokenColor, MAX_SEATS};
pub use rng::{GameRng, LoadedDice, RandomSource};
pub use state::SessionState;
