//! # monopoly-engine
//!
//! Turn and property-transaction engine for a local, hot-seat property
//! trading board game.
//!
//! ## Design Principles
//!
//! 1. **Explicit session state**: every engine operation takes the
//!    [`SessionState`] it mutates. Nothing is reached through globals.
//!
//! 2. **Closed square kinds**: landings are dispatched by an exhaustive match
//!    over [`SquareKind`], so a new kind does not compile until it is handled.
//!
//! 3. **Suspension at the edge**: the only points where a turn waits are
//!    [`Presenter::ask_choice`] calls. A landing resolves completely before
//!    the turn handoff is decided.
//!
//! 4. **Snapshot after every step**: the player list is written to the
//!    [`SnapshotStore`] after each mutation, last writer wins.
//!
//! ## Modules
//!
//! - `core`: players, session state, configuration, dice, errors
//! - `board`: squares, cards, the board catalog
//! - `engine`: turns, movement, jail, landings, rent, construction
//! - `io`: presenter and snapshot store capabilities
//! - `setup`: validated player creation
//! - `scoring`: net worth, standings, score submission
//!
//! ## Example
//!
//! ```
//! use monopoly_engine::{
//!     start_session, BoardCatalog, EngineConfig, GameEngine, MemoryStore, PlayerSetup,
//!     ScriptedPresenter, TokenColor,
//! };
//!
//! let config = EngineConfig::default().with_seed(7);
//! let mut store = MemoryStore::new();
//! let setups = [
//!     PlayerSetup::new("ana", TokenColor::Red, "co"),
//!     PlayerSetup::new("bo", TokenColor::Blue, "ar"),
//! ];
//! let mut state = start_session(&setups, &config, &mut store).unwrap();
//!
//! let mut engine = GameEngine::new(BoardCatalog::standard(), config, ScriptedPresenter::new(), store);
//! let report = engine.roll_dice(&mut state, Some(5)).unwrap();
//! assert_eq!(state.players()[0].position, 5);
//! assert_eq!(report.handoff.player(), state.current_player_id());
//! ```

pub mod board;
pub mod core;
pub mod engine;
pub mod io;
pub mod scoring;
pub mod setup;

// Re-export commonly used types
pub use crate::core::{
    CatalogError, EngineConfig, EngineError, GameRng, Holding, InputError, LoadedDice,
    PersistenceError, Player, PlayerId, RandomSource, ScoreError, SessionState, SetupError,
    SnapshotProblem, TokenColor, MAX_SEATS,
};

pub use crate::board::{
    BoardCatalog, Card, CatalogData, DeckKind, PropertyInfo, RailroadInfo, SpecialKind, Square,
    SquareId, SquareKind,
};

pub use crate::engine::{
    BuildOutcome, BuildRefusal, DiceRoll, GameEngine, Handoff, JailEvent, JailReason, Landing,
    MoveReport, TurnReport,
};

pub use crate::io::{
    ChannelPresenter, ChoiceRequest, JsonFileStore, MemoryStore, NoticeLog, Presenter,
    PresenterEvent, PresenterHandle, ScriptedPresenter, SnapshotStore, SESSION_SLOT,
};

pub use crate::setup::{new_players, start_session, PlayerSetup};

pub use crate::scoring::{
    abandon_session, end_session, final_standings, net_worth, InMemoryScoreService, ScoreService,
    ScoreSubmission, SessionSummary, Standing,
};
