//! Square resolution: route a landing to the handler for its kind.

use tracing::{debug, info};

use super::outcome::{JailReason, Landing};
use super::GameEngine;
use crate::board::{DeckKind, SpecialKind, SquareKind};
use crate::core::{EngineError, PlayerId, RandomSource, SessionState};
use crate::io::{Presenter, SnapshotStore};

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Apply the effect of the square `player` stands on.
    ///
    /// Does not decide the handoff, except that a go-to-jail landing passes
    /// the turn through jail entry.
    pub fn resolve_square(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
    ) -> Result<Landing, EngineError> {
        let position = state.player(player)?.position;
        let square = self.catalog.square_at(position)?.clone();
        debug!(square = %square.name, position, "resolving landing");

        match &square.kind {
            SquareKind::Special {
                kind: SpecialKind::GoToJail,
            } => {
                self.enter_jail(state, player, JailReason::GoToJailSquare)?;
                Ok(Landing::SentToJail)
            }
            SquareKind::Property(_) | SquareKind::Railroad(_) => {
                self.resolve_property(state, player, &square)
            }
            SquareKind::Tax { amount } => {
                let amount = *amount;
                let p = state.player_mut(player)?;
                p.money += amount;
                let name = p.nick_name.clone();
                let verb = if amount < 0 { "paid" } else { "received" };
                self.presenter
                    .notify(&format!("{name} {verb} ${} ({})", amount.abs(), square.name));
                self.flag_negative_balance(state, player);
                self.persist(state);
                Ok(Landing::Tax {
                    square: square.id,
                    amount,
                })
            }
            SquareKind::Chance => self.draw_card(state, player, DeckKind::Chance),
            SquareKind::CommunityChest => self.draw_card(state, player, DeckKind::CommunityChest),
            SquareKind::Special { .. } => Ok(Landing::Nothing { square: square.id }),
        }
    }

    fn draw_card(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
        deck: DeckKind,
    ) -> Result<Landing, EngineError> {
        let cards = self.catalog.deck(deck);
        let card = cards[self.rng.pick(cards.len())].clone();

        let p = state.player_mut(player)?;
        p.money += card.delta();
        let name = p.nick_name.clone();
        info!(player = %name, %deck, card = %card.description, delta = card.delta(), "card drawn");

        self.presenter.notify(&format!("{deck}: {}", card.description));
        self.flag_negative_balance(state, player);
        self.persist(state);
        Ok(Landing::CardDrawn { deck, card })
    }
}
