//! Property transactions: purchase offers, rent, and the monopoly test.
//!
//! Rent is transferred without a solvency check. A payer may end up with a
//! negative balance; bankruptcy is not resolved here.

use tracing::{debug, info};

use super::outcome::Landing;
use super::GameEngine;
use crate::board::{Square, SquareKind};
use crate::core::{EngineError, PlayerId, RandomSource, SessionState};
use crate::io::{ChoiceRequest, Presenter, SnapshotStore};

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Handle a landing on a property or railroad.
    pub(super) fn resolve_property(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
        square: &Square,
    ) -> Result<Landing, EngineError> {
        match state.owner_of(square.id) {
            None => self.offer_purchase(state, player, square),
            Some(owner) if owner == player => {
                let name = &state.player(player)?.nick_name;
                self.presenter.notify(&format!("{name} already owns {}", square.name));
                Ok(Landing::OwnProperty { square: square.id })
            }
            Some(owner) => self.charge_rent(state, player, owner, square),
        }
    }

    fn offer_purchase(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
        square: &Square,
    ) -> Result<Landing, EngineError> {
        let Some(price) = square.price() else {
            return Ok(Landing::Nothing { square: square.id });
        };

        let request = ChoiceRequest::confirm(
            format!("Buy {}?", square.name),
            format!("{} is for sale for ${price}.", square.name),
            "Buy",
            "Pass",
        );
        let answer = self.presenter.ask_choice(&request);

        let buyer = state.player_mut(player)?;
        let name = buyer.nick_name.clone();
        if !ChoiceRequest::accepted(answer) {
            debug!(player = %name, square = %square.name, "purchase declined");
            self.presenter.notify(&format!("{name} passed on {}", square.name));
            return Ok(Landing::PurchaseDeclined { square: square.id });
        }
        if buyer.money < price {
            let message = format!(
                "{name} has insufficient funds to buy {} (${price}, balance ${})",
                square.name, buyer.money
            );
            self.presenter.notify(&message);
            return Ok(Landing::CannotAfford {
                square: square.id,
                price,
            });
        }

        buyer.money -= price;
        state.acquire(player, square.id)?;
        info!(player = %name, square = %square.name, price, "purchased");
        self.presenter.notify(&format!("{name} bought {} for ${price}", square.name));
        self.persist(state);

        Ok(Landing::Purchased {
            square: square.id,
            price,
        })
    }

    fn charge_rent(
        &mut self,
        state: &mut SessionState,
        payer: PlayerId,
        owner: PlayerId,
        square: &Square,
    ) -> Result<Landing, EngineError> {
        let amount = self.rent_due(state, square).unwrap_or(0);

        let payer_name = {
            let p = state.player_mut(payer)?;
            p.money -= amount;
            p.nick_name.clone()
        };
        let owner_name = {
            let o = state.player_mut(owner)?;
            o.money += amount;
            o.nick_name.clone()
        };

        info!(payer = %payer_name, owner = %owner_name, square = %square.name, amount, "rent paid");
        self.presenter
            .notify(&format!("{payer_name} paid ${amount} rent to {owner_name}"));
        self.flag_negative_balance(state, payer);
        self.persist(state);

        Ok(Landing::RentPaid {
            square: square.id,
            owner,
            amount,
        })
    }

    /// Rent a visitor owes on `square` at its current development.
    ///
    /// `None` for unowned squares and squares that take no rent.
    #[must_use]
    pub fn rent_due(&self, state: &SessionState, square: &Square) -> Option<i64> {
        let owner = state.owner_of(square.id)?;
        match &square.kind {
            SquareKind::Railroad(info) => {
                let owned = self
                    .catalog
                    .railroads()
                    .filter(|r| state.owner_of(r.id) == Some(owner))
                    .count();
                Some(info.rent_for(owned))
            }
            SquareKind::Property(info) => {
                let holding = state.player(owner).ok()?.holding(square.id)?;
                Some(info.rent_for(holding.house_count, holding.has_hotel))
            }
            _ => None,
        }
    }

    /// Whether `player` owns every property of a colour group.
    ///
    /// An unknown colour is never a monopoly.
    #[must_use]
    pub fn has_monopoly(&self, state: &SessionState, player: PlayerId, color: &str) -> bool {
        let mut group = self.catalog.color_group(color).peekable();
        group.peek().is_some() && group.all(|s| state.owner_of(s.id) == Some(player))
    }
}
