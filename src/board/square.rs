//! Board squares.
//!
//! A square is an immutable catalog fact. The six kinds form a closed enum so
//! every new kind has to be handled wherever squares are resolved.

use serde::{Deserialize, Serialize};

/// Square identifier, unique across the ring.
///
/// On a well-formed board the id equals the square's ring position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SquareId(pub u16);

impl SquareId {
    /// Create a new square ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// The square id expected at a ring position.
    #[must_use]
    pub fn at_position(position: usize) -> Self {
        Self(u16::try_from(position).unwrap_or(u16::MAX))
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for SquareId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rent table of a colour-group property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRent {
    /// Undeveloped rent.
    pub base: i64,
    /// Rent with 1, 2, 3 and 4 houses.
    pub houses: [i64; 4],
    /// Rent with a hotel.
    pub hotel: i64,
}

/// A buildable property in a colour group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub color: String,
    pub price: i64,
    #[serde(default)]
    pub mortgage: i64,
    pub rent: PropertyRent,
    pub house_price: i64,
    pub hotel_price: i64,
}

impl PropertyInfo {
    /// Rent owed for a holding with the given development.
    #[must_use]
    pub fn rent_for(&self, house_count: u8, has_hotel: bool) -> i64 {
        if has_hotel {
            self.rent.hotel
        } else if house_count > 0 {
            let tier = usize::from(house_count.min(4)) - 1;
            self.rent.houses[tier]
        } else {
            self.rent.base
        }
    }
}

/// A railroad. Rent depends on how many railroads the owner holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RailroadInfo {
    pub price: i64,
    #[serde(default)]
    pub mortgage: i64,
    /// Rent when the owner holds 1, 2, 3 or 4 railroads.
    pub rent: [i64; 4],
}

impl RailroadInfo {
    /// Rent owed when the owner holds `owned` railroads (1-indexed, clamped).
    #[must_use]
    pub fn rent_for(&self, owned: usize) -> i64 {
        self.rent[owned.clamp(1, 4) - 1]
    }
}

/// Corner and inert squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialKind {
    Go,
    /// Jail; landing here is a mere visit.
    Jail,
    FreeParking,
    GoToJail,
}

/// What a square does when landed on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SquareKind {
    Property(PropertyInfo),
    Railroad(RailroadInfo),
    /// Signed amount applied directly: negative debits, positive credits.
    Tax { amount: i64 },
    Chance,
    CommunityChest,
    Special { kind: SpecialKind },
}

/// One position on the board ring.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub id: SquareId,
    pub name: String,
    #[serde(flatten)]
    pub kind: SquareKind,
}

impl Square {
    /// Create a square.
    pub fn new(id: u16, name: impl Into<String>, kind: SquareKind) -> Self {
        Self {
            id: SquareId::new(id),
            name: name.into(),
            kind,
        }
    }

    /// Listed purchase price, for properties and railroads.
    #[must_use]
    pub fn price(&self) -> Option<i64> {
        match &self.kind {
            SquareKind::Property(info) => Some(info.price),
            SquareKind::Railroad(info) => Some(info.price),
            _ => None,
        }
    }

    /// Mortgage value, for properties and railroads.
    #[must_use]
    pub fn mortgage(&self) -> Option<i64> {
        match &self.kind {
            SquareKind::Property(info) => Some(info.mortgage),
            SquareKind::Railroad(info) => Some(info.mortgage),
            _ => None,
        }
    }

    /// Colour group, for properties.
    #[must_use]
    pub fn color(&self) -> Option<&str> {
        match &self.kind {
            SquareKind::Property(info) => Some(info.color.as_str()),
            _ => None,
        }
    }

    /// Whether the square can be bought.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.price().is_some()
    }

    #[must_use]
    pub fn is_railroad(&self) -> bool {
        matches!(self.kind, SquareKind::Railroad(_))
    }

    #[must_use]
    pub fn is_special(&self, kind: SpecialKind) -> bool {
        matches!(self.kind, SquareKind::Special { kind: k } if k == kind)
    }
}
