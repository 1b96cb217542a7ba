//! Board catalog: the ring of squares plus the two card decks.
//!
//! The catalog is read once at session start and never changes afterwards.
//! It arrives as four ordered sides (bottom, left, top, right); the ring is
//! their concatenation, so ring size N is the total square count.
//!
//! ## JSON format
//!
//! [`BoardCatalog::from_json`] reads this crate's own shape, not the legacy
//! board service payload. Every square names its kind in a `"type"` tag;
//! corners carry an explicit `"kind"` instead of being recognised by id. Tax
//! squares hold a flat signed `"amount"` and cards a flat `"money_delta"`,
//! where the legacy payload nests both under `action.money`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::card::{Card, DeckKind};
use super::square::{
    PropertyInfo, PropertyRent, RailroadInfo, SpecialKind, Square, SquareId, SquareKind,
};
use crate::core::error::{CatalogError, EngineError};

/// Read model supplied by the board provider.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogData {
    pub bottom: Vec<Square>,
    pub left: Vec<Square>,
    pub top: Vec<Square>,
    pub right: Vec<Square>,
    pub community_chest: Vec<Card>,
    pub chance: Vec<Card>,
}

/// Validated, indexed board.
#[derive(Clone, Debug)]
pub struct BoardCatalog {
    ring: Vec<Square>,
    by_id: FxHashMap<SquareId, usize>,
    community_chest: Vec<Card>,
    chance: Vec<Card>,
    jail_position: usize,
}

impl BoardCatalog {
    /// Validate and index a catalog.
    pub fn new(data: CatalogData) -> Result<Self, CatalogError> {
        let CatalogData {
            bottom,
            left,
            top,
            right,
            community_chest,
            chance,
        } = data;

        let ring: Vec<Square> = [bottom, left, top, right].into_iter().flatten().collect();
        if ring.is_empty() {
            return Err(CatalogError::EmptyBoard);
        }

        let mut by_id = FxHashMap::default();
        for (index, square) in ring.iter().enumerate() {
            if usize::from(square.id.raw()) >= ring.len() {
                return Err(CatalogError::SquareOutOfRing {
                    id: square.id,
                    len: ring.len(),
                });
            }
            if by_id.insert(square.id, index).is_some() {
                return Err(CatalogError::DuplicateSquare(square.id));
            }
        }

        let jail_position = ring
            .iter()
            .find(|s| s.is_special(SpecialKind::Jail))
            .map(|s| usize::from(s.id.raw()))
            .ok_or(CatalogError::NoJail)?;

        if community_chest.is_empty() {
            return Err(CatalogError::EmptyDeck(DeckKind::CommunityChest.label()));
        }
        if chance.is_empty() {
            return Err(CatalogError::EmptyDeck(DeckKind::Chance.label()));
        }

        Ok(Self {
            ring,
            by_id,
            community_chest,
            chance,
            jail_position,
        })
    }

    /// Parse and validate the JSON read model.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let data: CatalogData = serde_json::from_str(json)?;
        Self::new(data)
    }

    /// Ring size N.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    /// Always false for a validated catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Squares in ring order.
    pub fn squares(&self) -> impl Iterator<Item = &Square> {
        self.ring.iter()
    }

    /// Square by id.
    #[must_use]
    pub fn get(&self, id: SquareId) -> Option<&Square> {
        self.by_id.get(&id).map(|&index| &self.ring[index])
    }

    /// The square a token at `position` stands on.
    pub fn square_at(&self, position: usize) -> Result<&Square, EngineError> {
        let id = SquareId::at_position(position);
        self.get(id).ok_or(EngineError::SquareNotFound(id))
    }

    /// Ring position of the jail square.
    #[must_use]
    pub fn jail_position(&self) -> usize {
        self.jail_position
    }

    /// Cards of one deck.
    #[must_use]
    pub fn deck(&self, kind: DeckKind) -> &[Card] {
        match kind {
            DeckKind::CommunityChest => &self.community_chest,
            DeckKind::Chance => &self.chance,
        }
    }

    /// Property squares sharing a colour group.
    pub fn color_group<'a>(&'a self, color: &'a str) -> impl Iterator<Item = &'a Square> + 'a {
        self.ring.iter().filter(move |s| s.color() == Some(color))
    }

    /// Railroad squares.
    pub fn railroads(&self) -> impl Iterator<Item = &Square> {
        self.ring.iter().filter(|s| s.is_railroad())
    }

    /// The classic 40-square board with 16 cards per deck.
    ///
    /// Utilities are modelled as fixed bills (tax squares) since the board
    /// has no dice-multiplied rent.
    #[must_use]
    pub fn standard() -> Self {
        match Self::new(standard_data()) {
            Ok(catalog) => catalog,
            Err(err) => unreachable!("standard board is valid: {err}"),
        }
    }
}

fn property(id: u16, name: &str, color: &str, price: i64, rents: [i64; 6]) -> Square {
    let [base, h1, h2, h3, h4, hotel] = rents;
    Square::new(
        id,
        name,
        SquareKind::Property(PropertyInfo {
            color: color.to_string(),
            price,
            mortgage: price / 2,
            rent: PropertyRent {
                base,
                houses: [h1, h2, h3, h4],
                hotel,
            },
            house_price: 100,
            hotel_price: if id < 20 { 200 } else { 250 },
        }),
    )
}

fn railroad(id: u16, name: &str) -> Square {
    Square::new(
        id,
        name,
        SquareKind::Railroad(RailroadInfo {
            price: 200,
            mortgage: 100,
            rent: [25, 50, 100, 200],
        }),
    )
}

fn special(id: u16, name: &str, kind: SpecialKind) -> Square {
    Square::new(id, name, SquareKind::Special { kind })
}

fn tax(id: u16, name: &str, amount: i64) -> Square {
    Square::new(id, name, SquareKind::Tax { amount })
}

fn standard_data() -> CatalogData {
    let bottom = vec![
        special(0, "Go", SpecialKind::Go),
        property(1, "Mediterranean Avenue", "brown", 60, [2, 10, 30, 90, 160, 250]),
        Square::new(2, "Community Chest", SquareKind::CommunityChest),
        property(3, "Baltic Avenue", "brown", 60, [4, 20, 60, 180, 320, 450]),
        tax(4, "Income Tax", -200),
        railroad(5, "Reading Railroad"),
        property(6, "Oriental Avenue", "purple", 100, [6, 30, 90, 270, 400, 550]),
        Square::new(7, "Chance", SquareKind::Chance),
        property(8, "Vermont Avenue", "purple", 100, [6, 30, 90, 270, 400, 550]),
        property(9, "Connecticut Avenue", "purple", 120, [8, 40, 100, 300, 450, 600]),
    ];

    let left = vec![
        special(10, "Jail", SpecialKind::Jail),
        property(11, "St. Charles Place", "pink", 140, [10, 50, 150, 450, 625, 750]),
        tax(12, "Electric Company Bill", -75),
        property(13, "States Avenue", "pink", 140, [10, 50, 150, 450, 625, 750]),
        property(14, "Virginia Avenue", "pink", 160, [12, 60, 180, 500, 700, 900]),
        railroad(15, "Pennsylvania Railroad"),
        property(16, "St. James Place", "orange", 180, [14, 70, 200, 550, 750, 950]),
        Square::new(17, "Community Chest", SquareKind::CommunityChest),
        property(18, "Tennessee Avenue", "orange", 180, [14, 70, 200, 550, 750, 950]),
        property(19, "New York Avenue", "orange", 200, [16, 80, 220, 600, 800, 1000]),
        special(20, "Free Parking", SpecialKind::FreeParking),
    ];

    let top = vec![
        property(21, "Kentucky Avenue", "red", 220, [18, 90, 250, 700, 875, 1050]),
        Square::new(22, "Chance", SquareKind::Chance),
        property(23, "Indiana Avenue", "red", 220, [18, 90, 250, 700, 875, 1050]),
        property(24, "Illinois Avenue", "red", 240, [20, 100, 300, 750, 925, 1100]),
        railroad(25, "B. & O. Railroad"),
        property(26, "Atlantic Avenue", "yellow", 260, [22, 110, 330, 800, 975, 1150]),
        property(27, "Ventnor Avenue", "yellow", 260, [22, 110, 330, 800, 975, 1150]),
        tax(28, "Water Works Bill", -75),
        property(29, "Marvin Gardens", "yellow", 280, [24, 120, 360, 850, 1025, 1200]),
        special(30, "Go To Jail", SpecialKind::GoToJail),
    ];

    let right = vec![
        property(31, "Pacific Avenue", "green", 300, [26, 130, 390, 900, 1100, 1275]),
        property(32, "North Carolina Avenue", "green", 300, [26, 130, 390, 900, 1100, 1275]),
        Square::new(33, "Community Chest", SquareKind::CommunityChest),
        property(34, "Pennsylvania Avenue", "green", 320, [28, 150, 450, 1000, 1200, 1400]),
        railroad(35, "Short Line"),
        Square::new(36, "Chance", SquareKind::Chance),
        property(37, "Park Place", "blue", 350, [35, 175, 500, 1100, 1300, 1500]),
        tax(38, "Luxury Tax", -100),
        property(39, "Boardwalk", "blue", 400, [50, 200, 600, 1400, 1700, 2000]),
    ];

    let community_chest = vec![
        Card::money("Bank error in your favor. Collect $200", 200),
        Card::money("Doctor's fee. Pay $50", -50),
        Card::money("From sale of stock you get $50", 50),
        Card::money("Holiday fund matures. Receive $100", 100),
        Card::money("Income tax refund. Collect $20", 20),
        Card::money("It is your birthday. Collect $10", 10),
        Card::money("Life insurance matures. Collect $100", 100),
        Card::money("Pay hospital fees of $100", -100),
        Card::money("Pay school fees of $50", -50),
        Card::money("Receive $25 consultancy fee", 25),
        Card::money("You have won second prize in a beauty contest. Collect $10", 10),
        Card::money("You inherit $100", 100),
        Card::money("Street repairs. Pay $40", -40),
        Card::money("Insurance premium due. Pay $50", -50),
        Card::money("Neighbourhood raffle. Collect $30", 30),
        Card::flavor("Community volunteer day. Nothing to pay"),
    ];

    let chance = vec![
        Card::money("Bank pays you dividend of $50", 50),
        Card::money("Speeding fine. Pay $15", -15),
        Card::money("Your building loan matures. Collect $150", 150),
        Card::money("Pay poor tax of $15", -15),
        Card::money("You have been elected chairman of the board. Pay $50", -50),
        Card::money("You won a crossword competition. Collect $100", 100),
        Card::money("Parking ticket. Pay $20", -20),
        Card::money("Lottery win. Collect $75", 75),
        Card::money("Drunk in charge fine. Pay $20", -20),
        Card::money("Tax rebate. Collect $40", 40),
        Card::money("Car repairs. Pay $60", -60),
        Card::money("You found a wallet. Collect $30", 30),
        Card::money("Charity donation. Pay $25", -25),
        Card::money("Sold old furniture. Collect $45", 45),
        Card::money("Nothing happens this time", 0),
        Card::flavor("Take a moment to enjoy the view"),
    ];

    CatalogData {
        bottom,
        left,
        top,
        right,
        community_chest,
        chance,
    }
}
