//! Turn engine: rolling, doubles tracking, and turn handoff.
//!
//! By the end of a roll exactly one of two things holds: the same player keeps
//! the turn (doubles) or the turn index advanced by one seat. Jail entry always
//! advances.

use tracing::{debug, info};

use super::outcome::{DiceRoll, Handoff, JailEvent, JailReason, Landing, TurnReport};
use super::GameEngine;
use crate::core::{EngineError, PlayerId, RandomSource, SessionState};
use crate::io::{Presenter, SnapshotStore};

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Roll for the current player and play out the move.
    ///
    /// `override_total` replaces the random roll with a fixed total in
    /// `1..=12`. A jailed player cannot roll directly and must go through
    /// [`pay_jail_fee`](Self::pay_jail_fee) or
    /// [`attempt_jail_doubles`](Self::attempt_jail_doubles).
    pub fn roll_dice(
        &mut self,
        state: &mut SessionState,
        override_total: Option<u8>,
    ) -> Result<TurnReport, EngineError> {
        let id = state.current_player_id();
        if state.current_player().in_jail {
            return Err(EngineError::PlayerJailed(id));
        }

        let roll = match override_total {
            Some(total) => DiceRoll::from_total(total)?,
            None => self.roll(),
        };
        self.presenter.show_roll(&roll);

        let name = state.current_player().nick_name.clone();
        debug!(player = %name, d1 = roll.d1, d2 = roll.d2, "dice rolled");
        let suffix = if roll.is_doubles() { " (doubles)" } else { "" };
        self.presenter.notify(&format!("{name} rolled {}{suffix}", roll.total()));

        if self.track_doubles(state, id, roll)? {
            info!(player = %name, "third consecutive doubles");
            self.presenter.notify(&format!("{name} rolled doubles three times in a row!"));
            let next = self.enter_jail(state, id, JailReason::ThreeDoubles)?;
            return Ok(TurnReport {
                player: id,
                roll: Some(roll),
                movement: None,
                jail: Some(JailEvent::Entered(JailReason::ThreeDoubles)),
                handoff: Handoff::Next(next),
            });
        }
        self.persist(state);

        let movement = self.move_player(state, id, usize::from(roll.total()), roll.is_doubles())?;
        let jail = (movement.landing == Landing::SentToJail)
            .then_some(JailEvent::Entered(JailReason::GoToJailSquare));

        Ok(TurnReport {
            player: id,
            roll: Some(roll),
            handoff: movement.handoff,
            movement: Some(movement),
            jail,
        })
    }

    /// Update the doubles counter. Returns true when the roll sends the
    /// player to jail instead of moving.
    fn track_doubles(
        &mut self,
        state: &mut SessionState,
        id: PlayerId,
        roll: DiceRoll,
    ) -> Result<bool, EngineError> {
        let limit = self.config.doubles_to_jail;
        let player = state.player_mut(id)?;

        if roll.is_doubles() {
            player.consecutive_doubles = player.consecutive_doubles.saturating_add(1);
            Ok(player.consecutive_doubles >= limit)
        } else {
            player.consecutive_doubles = 0;
            Ok(false)
        }
    }

    /// Decide who acts after a landing that did not go through jail.
    pub(super) fn hand_off(
        &mut self,
        state: &mut SessionState,
        id: PlayerId,
        grants_extra_turn: bool,
    ) -> Handoff {
        let handoff = if grants_extra_turn {
            state.keep_turn(id);
            let name = state.player(id).map(|p| p.nick_name.clone()).unwrap_or_default();
            self.presenter.notify(&format!("{name} gets an extra turn for rolling doubles!"));
            Handoff::ExtraTurn(id)
        } else {
            Handoff::Next(state.advance_turn())
        };
        self.persist(state);
        handoff
    }
}
