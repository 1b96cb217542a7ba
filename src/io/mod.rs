//! Collaborators at the engine's edge: presentation and persistence.
//!
//! The engine only talks to these through traits, so a terminal front end, a
//! GUI thread, or a test script can sit behind them unchanged.

pub mod persistence;
pub mod presenter;

pub use persistence::{JsonFileStore, MemoryStore, SnapshotStore, SESSION_SLOT};
pub use presenter::{
    ChannelPresenter, ChoiceRequest, NoticeLog, Presenter, PresenterEvent, PresenterHandle,
    ScriptedPresenter,
};
