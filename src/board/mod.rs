//! Board catalog: squares, card decks, and the ring they form.
//!
//! Everything here is read-only for the lifetime of a session. The mutable
//! side of ownership lives in each player's holdings.

pub mod card;
pub mod catalog;
pub mod square;

pub use card::{Card, DeckKind};
pub use catalog::{BoardCatalog, CatalogData};
pub use square::{
    PropertyInfo, PropertyRent, RailroadInfo, SpecialKind, Square, SquareId, SquareKind,
};
