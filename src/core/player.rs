//! Players, their holdings, and jail status.
//!
//! ## PlayerId
//!
//! Seat index into the session's player list. The first player is `PlayerId(0)`.
//!
//! ## Player
//!
//! Everything the persistence snapshot carries for one participant: identity,
//! money, board position, owned squares and jail state. Field names follow the
//! snapshot's flat layout so older snapshots keep loading.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::SquareId;

/// Most players a session can seat; every seat must fit a [`PlayerId`].
pub const MAX_SEATS: usize = u8::MAX as usize;

/// Player identifier (seat index, 0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a session with `player_count` players.
    ///
    /// ```
    /// use monopoly_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map_while(Self::from_index)
    }

    /// The id of a seat index, if it fits.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().map(Self)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Token colours offered at setup. Each colour may be taken by one player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenColor {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Black,
    Pink,
}

impl TokenColor {
    /// All colours in display order.
    pub const ALL: [TokenColor; 8] = [
        TokenColor::Red,
        TokenColor::Blue,
        TokenColor::Green,
        TokenColor::Yellow,
        TokenColor::Purple,
        TokenColor::Orange,
        TokenColor::Black,
        TokenColor::Pink,
    ];

    /// Hex code used to draw the token.
    #[must_use]
    pub const fn hex(self) -> &'static str {
        match self {
            TokenColor::Red => "#d9534f",
            TokenColor::Blue => "#0d6efd",
            TokenColor::Green => "#198754",
            TokenColor::Yellow => "#ffc107",
            TokenColor::Purple => "#6f42c1",
            TokenColor::Orange => "#fd7e14",
            TokenColor::Black => "#212529",
            TokenColor::Pink => "#e83e8c",
        }
    }
}

/// A player's ownership record for one square, plus its construction level.
///
/// Invariant: `has_hotel` implies `house_count == 0`, and `house_count <= 4`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    /// Square this holding refers to.
    #[serde(alias = "id")]
    pub square_id: SquareId,

    /// Houses built (0..=4).
    #[serde(default, alias = "houses")]
    pub house_count: u8,

    /// Whether the four houses were converted into a hotel.
    #[serde(default, alias = "hotel")]
    pub has_hotel: bool,

    /// Never set by the engine; read by end-of-session scoring only.
    #[serde(default)]
    pub mortgaged: bool,
}

impl Holding {
    /// Houses at which the next construction step is a hotel.
    pub const MAX_HOUSES: u8 = 4;

    /// A freshly purchased, undeveloped holding.
    #[must_use]
    pub fn new(square_id: SquareId) -> Self {
        Self {
            square_id,
            house_count: 0,
            has_hotel: false,
            mortgaged: false,
        }
    }
}

/// One participant in the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    /// Unique (case-insensitive) within a session.
    pub nick_name: String,

    /// Token colour.
    pub color: TokenColor,

    /// Display-only country code.
    pub country_code: String,

    /// Cash balance. May go negative through rent or tax.
    pub money: i64,

    /// Index into the board ring.
    pub position: usize,

    /// Owned squares.
    #[serde(default, rename = "properties")]
    pub holdings: SmallVec<[Holding; 8]>,

    /// Whether the player is currently jailed.
    #[serde(default)]
    pub in_jail: bool,

    /// Failed doubles attempts while jailed (0..=3).
    #[serde(default)]
    pub jail_turns: u8,

    /// Doubles rolled in a row on normal turns (0..=3).
    #[serde(default, alias = "doubles_count")]
    pub consecutive_doubles: u8,
}

impl Player {
    /// Create a player at the starting square with no holdings.
    pub fn new(
        nick_name: impl Into<String>,
        color: TokenColor,
        country_code: impl Into<String>,
        money: i64,
    ) -> Self {
        Self {
            nick_name: nick_name.into(),
            color,
            country_code: country_code.into(),
            money,
            position: 0,
            holdings: SmallVec::new(),
            in_jail: false,
            jail_turns: 0,
            consecutive_doubles: 0,
        }
    }

    /// Holding for a square, if this player owns it.
    #[must_use]
    pub fn holding(&self, square_id: SquareId) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.square_id == square_id)
    }

    /// Mutable holding for a square, if this player owns it.
    pub fn holding_mut(&mut self, square_id: SquareId) -> Option<&mut Holding> {
        self.holdings.iter_mut().find(|h| h.square_id == square_id)
    }

    /// Whether this player owns the square.
    #[must_use]
    pub fn owns(&self, square_id: SquareId) -> bool {
        self.holding(square_id).is_some()
    }

    /// Number of the next in-jail attempt (1-based), shown as "attempt n of 3".
    #[must_use]
    pub const fn jail_attempt(&self) -> u8 {
        self.jail_turns.saturating_add(1)
    }
}
