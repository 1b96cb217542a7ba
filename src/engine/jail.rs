//! Jail subsystem.
//!
//! ## States
//!
//! A player is either free or jailed. `jail_turns` counts failed doubles
//! attempts, so the attempt shown to the player is `jail_turns + 1`.
//!
//! ## Exits
//!
//! - Pay the fee voluntarily: turn ends, no move
//! - Roll doubles: move by the total, no extra turn
//! - Fail the last attempt: the fee is taken if affordable, turn ends, no move
//!
//! Every path except the doubles exit passes the turn.

use tracing::{info, warn};

use super::outcome::{Handoff, JailEvent, JailReason, TurnReport};
use super::GameEngine;
use crate::core::{EngineError, Player, PlayerId, RandomSource, SessionState};
use crate::io::{Presenter, SnapshotStore};

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Put `player` in jail and pass the turn. Returns who acts next.
    pub(super) fn enter_jail(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
        reason: JailReason,
    ) -> Result<PlayerId, EngineError> {
        let jail = self.catalog.jail_position();
        let max = self.config.max_jail_attempts;

        let p = state.player_mut(player)?;
        p.position = jail;
        p.in_jail = true;
        p.jail_turns = 0;
        p.consecutive_doubles = 0;
        let message = format!("{} went to jail (attempt {} of {max})", p.nick_name, p.jail_attempt());
        info!(player = %p.nick_name, ?reason, "jailed");

        self.presenter.notify(&message);
        self.persist(state);
        let next = state.advance_turn();
        self.persist(state);
        Ok(next)
    }

    /// The current player pays to leave jail.
    ///
    /// An unaffordable fee is refused with a notice and the turn is not
    /// consumed: the player must still choose an action.
    pub fn pay_jail_fee(&mut self, state: &mut SessionState) -> Result<TurnReport, EngineError> {
        let id = state.current_player_id();
        let fee = self.config.jail_fee;

        let p = state.player_mut(id)?;
        if !p.in_jail {
            return Err(EngineError::NotJailed(id));
        }
        if p.money < fee {
            let available = p.money;
            let message = format!("{} has insufficient funds to pay ${fee} bail", p.nick_name);
            self.presenter.notify(&message);
            return Ok(jail_report(
                id,
                JailEvent::FeeRefused {
                    needed: fee,
                    available,
                },
                Handoff::Unchanged(id),
            ));
        }

        p.money -= fee;
        release(p);
        let message = format!("{} paid ${fee} and left jail", p.nick_name);
        info!(player = %p.nick_name, fee, "paid bail");

        self.presenter.notify(&message);
        self.persist(state);
        let next = state.advance_turn();
        self.persist(state);
        Ok(jail_report(id, JailEvent::PaidFee { fee }, Handoff::Next(next)))
    }

    /// The current player rolls for doubles to leave jail.
    pub fn attempt_jail_doubles(&mut self, state: &mut SessionState) -> Result<TurnReport, EngineError> {
        let id = state.current_player_id();
        if !state.player(id)?.in_jail {
            return Err(EngineError::NotJailed(id));
        }

        let roll = self.roll();
        self.presenter.show_roll(&roll);

        if roll.is_doubles() {
            let p = state.player_mut(id)?;
            release(p);
            let message = format!("{} rolled doubles ({roll}) and left jail", p.nick_name);
            info!(player = %p.nick_name, total = roll.total(), "doubles out of jail");
            self.presenter.notify(&message);
            self.persist(state);

            let movement = self.move_player(state, id, usize::from(roll.total()), false)?;
            return Ok(TurnReport {
                player: id,
                roll: Some(roll),
                handoff: movement.handoff,
                movement: Some(movement),
                jail: Some(JailEvent::RolledDoubles),
            });
        }

        let fee = self.config.jail_fee;
        let max = self.config.max_jail_attempts;
        let p = state.player_mut(id)?;
        p.jail_turns = p.jail_turns.saturating_add(1).min(max);

        let (event, message) = if p.jail_turns < max {
            let attempt = p.jail_attempt();
            let message = format!("{} stays in jail (attempt {attempt} of {max})", p.nick_name);
            (JailEvent::StillJailed { attempt }, message)
        } else if p.money >= fee {
            p.money -= fee;
            release(p);
            info!(player = %p.nick_name, fee, "bail forced after last attempt");
            let message = format!("{} paid ${fee} after {max} failed attempts", p.nick_name);
            (JailEvent::ForcedFee { fee }, message)
        } else {
            warn!(player = %p.nick_name, money = p.money, "attempts exhausted and bail unaffordable");
            let message = format!("{} cannot afford bail and stays in jail", p.nick_name);
            (JailEvent::Stuck, message)
        };

        self.presenter.notify(&message);
        self.persist(state);
        let next = state.advance_turn();
        self.persist(state);

        Ok(TurnReport {
            player: id,
            roll: Some(roll),
            movement: None,
            jail: Some(event),
            handoff: Handoff::Next(next),
        })
    }
}

fn release(player: &mut Player) {
    player.in_jail = false;
    player.jail_turns = 0;
    player.consecutive_doubles = 0;
}

fn jail_report(player: PlayerId, event: JailEvent, handoff: Handoff) -> TurnReport {
    TurnReport {
        player,
        roll: None,
        movement: None,
        jail: Some(event),
        handoff,
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardCatalog;
    use crate::core::{EngineConfig, LoadedDice, Player, PlayerId, SessionState, TokenColor};
    use crate::engine::{GameEngine, Handoff, JailEvent};
    use crate::io::{MemoryStore, ScriptedPresenter};
    use crate::EngineError;

    fn engine(dice: LoadedDice) -> GameEngine<ScriptedPresenter, MemoryStore, LoadedDice> {
        GameEngine::with_rng(
            BoardCatalog::standard(),
            EngineConfig::default(),
            dice,
            ScriptedPresenter::new(),
            MemoryStore::new(),
        )
    }

    fn jailed(money: i64, jail_turns: u8) -> SessionState {
        let mut ana = Player::new("ana", TokenColor::Red, "co", money);
        ana.position = 10;
        ana.in_jail = true;
        ana.jail_turns = jail_turns;
        SessionState::new(vec![ana, Player::new("bo", TokenColor::Blue, "ar", 1500)]).unwrap()
    }

    #[test]
    fn test_pay_fee() {
        let mut engine = engine(LoadedDice::new());
        let mut state = jailed(100, 1);

        let report = engine.pay_jail_fee(&mut state).unwrap();

        let ana = &state.players()[0];
        assert_eq!(ana.money, 50);
        assert!(!ana.in_jail);
        assert_eq!(ana.jail_turns, 0);
        assert_eq!(ana.position, 10);
        assert_eq!(report.jail, Some(JailEvent::PaidFee { fee: 50 }));
        assert_eq!(report.handoff, Handoff::Next(PlayerId::new(1)));
        assert!(report.movement.is_none());
    }

    #[test]
    fn test_pay_fee_unaffordable() {
        let mut engine = engine(LoadedDice::new());
        let mut state = jailed(30, 0);

        let report = engine.pay_jail_fee(&mut state).unwrap();

        assert_eq!(
            report.jail,
            Some(JailEvent::FeeRefused {
                needed: 50,
                available: 30
            })
        );
        assert_eq!(report.handoff, Handoff::Unchanged(PlayerId::new(0)));
        assert!(state.players()[0].in_jail);
        assert_eq!(state.players()[0].money, 30);
        assert!(engine.presenter().noticed("insufficient funds"));
    }

    #[test]
    fn test_free_player_cannot_use_jail_actions() {
        let mut engine = engine(LoadedDice::new());
        let mut state = jailed(100, 0);
        state.player_mut(PlayerId::new(0)).unwrap().in_jail = false;

        assert!(matches!(engine.pay_jail_fee(&mut state), Err(EngineError::NotJailed(_))));
        assert!(matches!(engine.attempt_jail_doubles(&mut state), Err(EngineError::NotJailed(_))));
    }

    #[test]
    fn test_doubles_release_and_move() {
        let mut engine = engine(LoadedDice::new().then_roll(5, 5));
        let mut state = jailed(1500, 1);

        let report = engine.attempt_jail_doubles(&mut state).unwrap();

        let ana = &state.players()[0];
        assert!(!ana.in_jail);
        assert_eq!(ana.position, 20);
        assert_eq!(ana.consecutive_doubles, 0);
        assert_eq!(report.jail, Some(JailEvent::RolledDoubles));
        // No extra turn for doubles rolled in jail.
        assert_eq!(report.handoff, Handoff::Next(PlayerId::new(1)));
    }

    #[test]
    fn test_failed_attempt_counts_up() {
        let mut engine = engine(LoadedDice::new().then_roll(1, 2));
        let mut state = jailed(1500, 0);

        let report = engine.attempt_jail_doubles(&mut state).unwrap();

        assert_eq!(report.jail, Some(JailEvent::StillJailed { attempt: 2 }));
        assert_eq!(state.players()[0].jail_turns, 1);
        assert!(state.players()[0].in_jail);
        assert_eq!(state.players()[0].position, 10);
        assert_eq!(state.current_player_id(), PlayerId::new(1));
    }

    #[test]
    fn test_last_attempt_forces_fee() {
        let mut engine = engine(LoadedDice::new().then_roll(1, 2));
        let mut state = jailed(500, 2);

        let report = engine.attempt_jail_doubles(&mut state).unwrap();

        let ana = &state.players()[0];
        assert_eq!(report.jail, Some(JailEvent::ForcedFee { fee: 50 }));
        assert_eq!(ana.money, 450);
        assert!(!ana.in_jail);
        assert_eq!(ana.position, 10);
        assert!(report.movement.is_none());
    }

    #[test]
    fn test_overlong_jail_count_forces_fee() {
        let mut engine = engine(LoadedDice::new().then_roll(1, 2));
        let mut state = jailed(500, u8::MAX);

        let report = engine.attempt_jail_doubles(&mut state).unwrap();

        assert_eq!(report.jail, Some(JailEvent::ForcedFee { fee: 50 }));
        assert!(!state.players()[0].in_jail);
    }

    #[test]
    fn test_last_attempt_unaffordable_stays_jailed() {
        let mut engine = engine(LoadedDice::new().then_roll(1, 2).then_roll(3, 4));
        let mut state = jailed(20, 2);

        let report = engine.attempt_jail_doubles(&mut state).unwrap();
        assert_eq!(report.jail, Some(JailEvent::Stuck));
        assert_eq!(report.handoff, Handoff::Next(PlayerId::new(1)));

        state.advance_turn();
        let report = engine.attempt_jail_doubles(&mut state).unwrap();
        assert_eq!(report.jail, Some(JailEvent::Stuck));
        assert_eq!(state.players()[0].jail_turns, 3);
        assert_eq!(state.players()[0].money, 20);
    }
}
