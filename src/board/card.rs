//! Community chest and chance cards.
//!
//! Decks are drawn with replacement: a draw never removes the card, so the
//! deck itself carries no state.

use serde::{Deserialize, Serialize};

/// Which deck a card is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeckKind {
    CommunityChest,
    Chance,
}

impl DeckKind {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            DeckKind::CommunityChest => "Community Chest",
            DeckKind::Chance => "Chance",
        }
    }
}

impl std::fmt::Display for DeckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A drawable card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub description: String,
    /// Applied to the drawer's balance. Absent means informational only.
    #[serde(default)]
    pub money_delta: Option<i64>,
}

impl Card {
    /// A card that moves money.
    pub fn money(description: impl Into<String>, delta: i64) -> Self {
        Self {
            description: description.into(),
            money_delta: Some(delta),
        }
    }

    /// A card with no effect beyond its text.
    pub fn flavor(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            money_delta: None,
        }
    }

    /// Money delta, treating an absent delta as zero.
    #[must_use]
    pub fn delta(&self) -> i64 {
        self.money_delta.unwrap_or(0)
    }
}
