//! The presentation capability the engine depends on.
//!
//! The engine needs two things from whatever draws the game: ask a human a
//! question and wait for the answer, and post a best-effort notice. Asking is
//! the only suspension point in a turn; nothing is cancelled while waiting.
//!
//! ## Implementations
//!
//! - [`ChannelPresenter`]: hands requests to a front-end thread over channels
//!   and blocks on the reply
//! - [`ScriptedPresenter`]: answers from a queue; used by tests and replays

use std::collections::VecDeque;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::EngineConfig;
use crate::engine::DiceRoll;

/// A multiple-choice question for the active human.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub title: String,
    pub description: String,
    pub options: Vec<String>,
}

impl ChoiceRequest {
    /// A yes/no question. Option 0 accepts, option 1 declines.
    pub fn confirm(
        title: impl Into<String>,
        description: impl Into<String>,
        accept: impl Into<String>,
        decline: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            options: vec![accept.into(), decline.into()],
        }
    }

    /// Whether an answer picks the accepting option.
    #[must_use]
    pub fn accepted(answer: Option<usize>) -> bool {
        answer == Some(0)
    }
}

/// What the engine needs from the presentation layer.
pub trait Presenter {
    /// Ask and suspend until answered. `None` means no answer can come
    /// (front end gone) and is treated as declining.
    fn ask_choice(&mut self, request: &ChoiceRequest) -> Option<usize>;

    /// Post a notice. Best effort; never blocks.
    fn notify(&mut self, message: &str);

    /// Show a roll before it is resolved.
    fn show_roll(&mut self, _roll: &DiceRoll) {}
}

/// The last few notices, newest first.
#[derive(Clone, Debug)]
pub struct NoticeLog {
    entries: VecDeque<String>,
    backlog: usize,
}

impl NoticeLog {
    /// Keep at most `backlog` notices.
    #[must_use]
    pub fn new(backlog: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(backlog),
            backlog,
        }
    }

    /// Sized by `config.notice_backlog`.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.notice_backlog)
    }

    /// Add a notice, dropping the oldest beyond the backlog.
    pub fn push(&mut self, message: impl Into<String>) {
        self.entries.push_front(message.into());
        self.entries.truncate(self.backlog);
    }

    /// Notices, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for NoticeLog {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

/// Answers questions from a queue and records everything it was shown.
///
/// When the queue runs dry every question is declined.
#[derive(Clone, Debug, Default)]
pub struct ScriptedPresenter {
    answers: VecDeque<usize>,
    asked: Vec<ChoiceRequest>,
    notices: Vec<String>,
    rolls: Vec<DiceRoll>,
}

impl ScriptedPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer by option index.
    #[must_use]
    pub fn answer(mut self, option: usize) -> Self {
        self.answers.push_back(option);
        self
    }

    /// Queue a "yes".
    #[must_use]
    pub fn accept(self) -> Self {
        self.answer(0)
    }

    /// Queue a "no".
    #[must_use]
    pub fn decline(self) -> Self {
        self.answer(1)
    }

    /// Queue more answers on an existing presenter.
    pub fn push_answer(&mut self, option: usize) {
        self.answers.push_back(option);
    }

    /// Questions asked so far.
    #[must_use]
    pub fn asked(&self) -> &[ChoiceRequest] {
        &self.asked
    }

    /// Every notice posted, oldest first.
    #[must_use]
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Rolls shown.
    #[must_use]
    pub fn rolls(&self) -> &[DiceRoll] {
        &self.rolls
    }

    /// Whether any notice contains `needle`.
    #[must_use]
    pub fn noticed(&self, needle: &str) -> bool {
        self.notices.iter().any(|n| n.contains(needle))
    }
}

impl Presenter for ScriptedPresenter {
    fn ask_choice(&mut self, request: &ChoiceRequest) -> Option<usize> {
        self.asked.push(request.clone());
        Some(self.answers.pop_front().unwrap_or(1))
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn show_roll(&mut self, roll: &DiceRoll) {
        self.rolls.push(*roll);
    }
}

/// Messages sent from the engine to the front end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresenterEvent {
    /// Answer by sending the chosen option index on the answer channel.
    Choice(ChoiceRequest),
    Notice(String),
    Roll(DiceRoll),
}

/// Front-end side of a [`ChannelPresenter`].
#[derive(Clone, Debug)]
pub struct PresenterHandle {
    pub events: Receiver<PresenterEvent>,
    pub answers: Sender<usize>,
}

/// Presenter that hands requests to another thread and waits for replies.
#[derive(Debug)]
pub struct ChannelPresenter {
    events: Sender<PresenterEvent>,
    answers: Receiver<usize>,
    notices: NoticeLog,
}

impl ChannelPresenter {
    /// Create a presenter and the handle the front end drives it with.
    #[must_use]
    pub fn new(backlog: usize) -> (Self, PresenterHandle) {
        let (event_tx, event_rx) = unbounded();
        let (answer_tx, answer_rx) = unbounded();
        let presenter = Self {
            events: event_tx,
            answers: answer_rx,
            notices: NoticeLog::new(backlog),
        };
        let handle = PresenterHandle {
            events: event_rx,
            answers: answer_tx,
        };
        (presenter, handle)
    }

    /// Like [`ChannelPresenter::new`], keeping `config.notice_backlog` notices.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> (Self, PresenterHandle) {
        Self::new(config.notice_backlog)
    }

    /// Recent notices.
    #[must_use]
    pub fn notices(&self) -> &NoticeLog {
        &self.notices
    }
}

impl Presenter for ChannelPresenter {
    fn ask_choice(&mut self, request: &ChoiceRequest) -> Option<usize> {
        if self.events.send(PresenterEvent::Choice(request.clone())).is_err() {
            tracing::warn!(title = %request.title, "presenter gone, declining");
            return None;
        }
        self.answers.recv().ok()
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message);
        let _ = self.events.send(PresenterEvent::Notice(message.to_string()));
    }

    fn show_roll(&mut self, roll: &DiceRoll) {
        let _ = self.events.send(PresenterEvent::Roll(*roll));
    }
}
