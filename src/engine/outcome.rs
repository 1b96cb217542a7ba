//! What an engine operation did.
//!
//! Operations return these reports instead of raising for ordinary outcomes
//! such as a declined purchase or a build the player cannot afford.

use crate::board::{Card, DeckKind, SquareId};
use crate::core::error::InputError;
use crate::core::PlayerId;

/// Two dice faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceRoll {
    pub d1: u8,
    pub d2: u8,
}

impl DiceRoll {
    /// Highest total a manual override may request.
    pub const MAX_TOTAL: u8 = 12;

    #[must_use]
    pub const fn new(d1: u8, d2: u8) -> Self {
        Self { d1, d2 }
    }

    /// Split a manual total into display faces: `d1 = total / 2`, `d2 = total - d1`.
    ///
    /// Only the total and the doubles flag are used downstream, so an even
    /// total counts as doubles.
    pub fn from_total(total: u8) -> Result<Self, InputError> {
        if !(1..=Self::MAX_TOTAL).contains(&total) {
            return Err(InputError::DiceOverrideOutOfRange(total));
        }
        let d1 = total / 2;
        Ok(Self { d1, d2: total - d1 })
    }

    #[must_use]
    pub const fn total(self) -> u8 {
        self.d1 + self.d2
    }

    #[must_use]
    pub const fn is_doubles(self) -> bool {
        self.d1 == self.d2
    }
}

impl std::fmt::Display for DiceRoll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} + {} = {}", self.d1, self.d2, self.total())
    }
}

/// Who acts next once an operation finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Handoff {
    /// Same player rolls again (doubles).
    ExtraTurn(PlayerId),
    /// Turn passed to this player.
    Next(PlayerId),
    /// Nothing was consumed; the same player still has to act.
    Unchanged(PlayerId),
}

impl Handoff {
    /// The player expected to act next.
    #[must_use]
    pub const fn player(self) -> PlayerId {
        match self {
            Handoff::ExtraTurn(p) | Handoff::Next(p) | Handoff::Unchanged(p) => p,
        }
    }
}

/// Result of resolving the square a player landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Landing {
    Purchased { square: SquareId, price: i64 },
    PurchaseDeclined { square: SquareId },
    CannotAfford { square: SquareId, price: i64 },
    RentPaid { square: SquareId, owner: PlayerId, amount: i64 },
    OwnProperty { square: SquareId },
    /// Signed amount applied to the player.
    Tax { square: SquareId, amount: i64 },
    CardDrawn { deck: DeckKind, card: Card },
    SentToJail,
    /// Start, jail visit, free parking.
    Nothing { square: SquareId },
}

/// One move around the ring and what it landed on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub from: usize,
    pub to: usize,
    pub passed_go: bool,
    pub landing: Landing,
    pub handoff: Handoff,
}

/// Why a player went to jail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JailReason {
    ThreeDoubles,
    GoToJailSquare,
}

/// What happened in the jail subsystem.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JailEvent {
    Entered(JailReason),
    /// Paid voluntarily; turn over, roll normally next turn.
    PaidFee { fee: i64 },
    /// Could not pay voluntarily; the player must still choose.
    FeeRefused { needed: i64, available: i64 },
    /// Doubles on a jail roll; moved by the total.
    RolledDoubles,
    /// No doubles; `attempt` is the next attempt number.
    StillJailed { attempt: u8 },
    /// Attempts exhausted and the fee was taken.
    ForcedFee { fee: i64 },
    /// Attempts exhausted and the fee is unaffordable; stays jailed.
    Stuck,
}

/// Everything one turn-level operation did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    pub player: PlayerId,
    pub roll: Option<DiceRoll>,
    pub movement: Option<MoveReport>,
    pub jail: Option<JailEvent>,
    pub handoff: Handoff,
}

/// Why a build was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildRefusal {
    /// Unknown square, or one that takes no buildings.
    NotBuildable,
    NotOwner,
    NoMonopoly,
    HotelPresent,
    InsufficientFunds { needed: i64, available: i64 },
}

/// Result of a construction request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    HouseBuilt { square: SquareId, houses: u8, price: i64 },
    HotelBuilt { square: SquareId, price: i64 },
    Cancelled,
    Refused(BuildRefusal),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_total_splits() {
        let roll = DiceRoll::from_total(5).unwrap();
        assert_eq!((roll.d1, roll.d2), (2, 3));
        assert!(!roll.is_doubles());

        let roll = DiceRoll::from_total(8).unwrap();
        assert_eq!((roll.d1, roll.d2), (4, 4));
        assert!(roll.is_doubles());

        let roll = DiceRoll::from_total(1).unwrap();
        assert_eq!((roll.d1, roll.d2), (0, 1));
        assert_eq!(roll.total(), 1);
    }

    #[test]
    fn test_from_total_range() {
        assert_eq!(DiceRoll::from_total(0), Err(InputError::DiceOverrideOutOfRange(0)));
        assert_eq!(DiceRoll::from_total(13), Err(InputError::DiceOverrideOutOfRange(13)));
        assert!(DiceRoll::from_total(12).is_ok());
    }

    #[test]
    fn test_handoff_player() {
        assert_eq!(Handoff::Next(PlayerId::new(2)).player(), PlayerId::new(2));
        assert_eq!(Handoff::ExtraTurn(PlayerId::new(0)).player(), PlayerId::new(0));
    }
}
