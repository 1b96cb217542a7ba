//! Score service boundary.
//!
//! Submissions serialise to the body the remote recorder expects:
//! `{"nick_name": .., "score": .., "country_code": ..}`.

use serde::{Deserialize, Serialize};

use crate::core::ScoreError;

/// One player's final score.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub nick_name: String,
    pub score: i64,
    pub country_code: String,
}

/// Where final scores go.
pub trait ScoreService {
    /// Record one score.
    fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), ScoreError>;

    /// All recorded scores, best first.
    fn leaderboard(&self) -> Result<Vec<ScoreSubmission>, ScoreError>;
}

/// Leaderboard kept in process.
///
/// Can be told to start rejecting after a number of submissions, to exercise
/// the failure path of the end-of-session flow.
#[derive(Clone, Debug, Default)]
pub struct InMemoryScoreService {
    entries: Vec<ScoreSubmission>,
    accept_limit: Option<usize>,
}

impl InMemoryScoreService {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `count` submissions, then report the service as unavailable.
    #[must_use]
    pub fn failing_after(mut self, count: usize) -> Self {
        self.accept_limit = Some(count);
        self
    }

    /// Number of scores recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ScoreService for InMemoryScoreService {
    fn submit(&mut self, submission: &ScoreSubmission) -> Result<(), ScoreError> {
        if self.accept_limit.is_some_and(|limit| self.entries.len() >= limit) {
            return Err(ScoreError::Unavailable("score recorder is not responding".into()));
        }
        if submission.nick_name.trim().is_empty() {
            return Err(ScoreError::Rejected {
                nick_name: submission.nick_name.clone(),
                reason: "nickname is required".into(),
            });
        }
        self.entries.push(submission.clone());
        Ok(())
    }

    fn leaderboard(&self) -> Result<Vec<ScoreSubmission>, ScoreError> {
        let mut board = self.entries.clone();
        board.sort_by(|a, b| b.score.cmp(&a.score));
        Ok(board)
    }
}
