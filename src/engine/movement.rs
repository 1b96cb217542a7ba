//! Token movement around the ring.

use tracing::debug;

use super::outcome::{Handoff, Landing, MoveReport};
use super::GameEngine;
use crate::core::{EngineError, PlayerId, RandomSource, SessionState};
use crate::io::{Presenter, SnapshotStore};

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Move `player` forward by `steps`, pay the salary on wrap, resolve the
    /// landing square, and decide the handoff.
    ///
    /// Wrapping is detected as `new < old`, so a zero-step move never pays.
    /// `grants_extra_turn` keeps the turn with the mover unless the landing
    /// sent them to jail.
    pub fn move_player(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
        steps: usize,
        grants_extra_turn: bool,
    ) -> Result<MoveReport, EngineError> {
        let ring = self.catalog.len();
        let salary = self.config.go_salary;

        let mover = state.player_mut(player)?;
        let from = mover.position;
        let to = (from + steps) % ring;
        let passed_go = to < from;
        mover.position = to;
        if passed_go {
            mover.money += salary;
        }
        let name = mover.nick_name.clone();

        debug!(player = %name, from, to, passed_go, "moved");
        if passed_go {
            self.presenter.notify(&format!("{name} passed Go and collected ${salary}"));
        }
        self.persist(state);

        let landing = self.resolve_square(state, player)?;
        let handoff = match landing {
            // Jail entry already passed the turn.
            Landing::SentToJail => Handoff::Next(state.current_player_id()),
            _ => self.hand_off(state, player, grants_extra_turn),
        };

        Ok(MoveReport {
            from,
            to,
            passed_go,
            landing,
            handoff,
        })
    }
}
