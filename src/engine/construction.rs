//! Houses and hotels.
//!
//! A build is allowed on an owned property whose colour group the builder
//! holds completely and which has no hotel yet. The fifth build on a square
//! replaces its four houses with a hotel. Refusals leave state untouched.

use tracing::info;

use super::outcome::{BuildOutcome, BuildRefusal};
use super::GameEngine;
use crate::board::{SquareId, SquareKind};
use crate::core::{EngineError, Holding, PlayerId, RandomSource, SessionState};
use crate::io::{ChoiceRequest, Presenter, SnapshotStore};

impl<P: Presenter, S: SnapshotStore, R: RandomSource> GameEngine<P, S, R> {
    /// Build one house, or a hotel over four houses, on `square`.
    pub fn build(
        &mut self,
        state: &mut SessionState,
        player: PlayerId,
        square: SquareId,
    ) -> Result<BuildOutcome, EngineError> {
        let name = state.player(player)?.nick_name.clone();

        let buildable = self.catalog.get(square).and_then(|s| match &s.kind {
            SquareKind::Property(info) => Some((s.name.clone(), info.clone())),
            _ => None,
        });
        let Some((title, info)) = buildable else {
            return Ok(self.refuse(&name, BuildRefusal::NotBuildable));
        };

        if state.owner_of(square) != Some(player) {
            return Ok(self.refuse(&name, BuildRefusal::NotOwner));
        }
        if !self.has_monopoly(state, player, &info.color) {
            return Ok(self.refuse(&name, BuildRefusal::NoMonopoly));
        }

        let (houses, has_hotel, money) = {
            let p = state.player(player)?;
            let holding = p.holding(square).ok_or(EngineError::SquareNotFound(square))?;
            (holding.house_count, holding.has_hotel, p.money)
        };
        if has_hotel {
            return Ok(self.refuse(&name, BuildRefusal::HotelPresent));
        }

        let hotel = houses >= Holding::MAX_HOUSES;
        let price = if hotel { info.hotel_price } else { info.house_price };
        if money < price {
            let refusal = BuildRefusal::InsufficientFunds {
                needed: price,
                available: money,
            };
            return Ok(self.refuse(&name, refusal));
        }

        let what = if hotel { "a hotel" } else { "a house" };
        let request = ChoiceRequest::confirm(
            format!("Build on {title}?"),
            format!("Build {what} on {title} for ${price}?"),
            "Build",
            "Cancel",
        );
        if !ChoiceRequest::accepted(self.presenter.ask_choice(&request)) {
            return Ok(BuildOutcome::Cancelled);
        }

        let p = state.player_mut(player)?;
        p.money -= price;
        let holding = p
            .holding_mut(square)
            .ok_or(EngineError::SquareNotFound(square))?;
        let outcome = if hotel {
            holding.house_count = 0;
            holding.has_hotel = true;
            BuildOutcome::HotelBuilt { square, price }
        } else {
            holding.house_count += 1;
            BuildOutcome::HouseBuilt {
                square,
                houses: holding.house_count,
                price,
            }
        };

        info!(player = %name, square = %title, ?outcome, "built");
        self.presenter.notify(&format!("{name} built {what} on {title}"));
        self.persist(state);
        Ok(outcome)
    }

    fn refuse(&mut self, name: &str, refusal: BuildRefusal) -> BuildOutcome {
        let reason = match refusal {
            BuildRefusal::NotBuildable => "nothing can be built there".to_string(),
            BuildRefusal::NotOwner => "they do not own it".to_string(),
            BuildRefusal::NoMonopoly => "they do not own the whole colour group".to_string(),
            BuildRefusal::HotelPresent => "it already has a hotel".to_string(),
            BuildRefusal::InsufficientFunds { needed, available } => {
                format!("insufficient funds (needs ${needed}, has ${available})")
            }
        };
        self.presenter.notify(&format!("{name} cannot build: {reason}"));
        BuildOutcome::Refused(refusal)
    }
}
