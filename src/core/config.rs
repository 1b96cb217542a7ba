//! Engine configuration.
//!
//! Rule constants live here rather than in the engine so a session can be
//! started with house rules (bigger salary, cheaper jail fee) without touching
//! turn logic. Board-specific prices (square price, house and hotel price)
//! come from the [`BoardCatalog`](crate::board::BoardCatalog) instead.

use serde::{Deserialize, Serialize};

/// Rule constants for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cash every player starts with.
    pub starting_money: i64,

    /// Credited when a move wraps past the starting square.
    pub go_salary: i64,

    /// Price of leaving jail, voluntarily or forced after the last attempt.
    pub jail_fee: i64,

    /// Doubles attempts a jailed player gets before the fee is forced.
    pub max_jail_attempts: u8,

    /// Consecutive doubles that send a player to jail.
    pub doubles_to_jail: u8,

    /// Smallest allowed session.
    pub min_players: usize,

    /// Largest allowed session (one per token colour).
    pub max_players: usize,

    /// Notices kept by presenters before the oldest is dropped.
    pub notice_backlog: usize,

    /// Net-worth value of each house at end of session.
    pub house_value: i64,

    /// Net-worth value of a hotel at end of session.
    pub hotel_value: i64,

    /// Dice seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            starting_money: 1500,
            go_salary: 200,
            jail_fee: 50,
            max_jail_attempts: 3,
            doubles_to_jail: 3,
            min_players: 2,
            max_players: 8,
            notice_backlog: 3,
            house_value: 100,
            hotel_value: 200,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Use a fixed dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Change the starting cash.
    #[must_use]
    pub fn with_starting_money(mut self, money: i64) -> Self {
        self.starting_money = money;
        self
    }

    /// Change the salary for passing the start.
    #[must_use]
    pub fn with_go_salary(mut self, salary: i64) -> Self {
        self.go_salary = salary;
        self
    }

    /// Change the jail fee.
    #[must_use]
    pub fn with_jail_fee(mut self, fee: i64) -> Self {
        self.jail_fee = fee;
        self
    }

    /// Change how many notices presenters keep.
    #[must_use]
    pub fn with_notice_backlog(mut self, backlog: usize) -> Self {
        self.notice_backlog = backlog;
        self
    }

    /// Change the accepted player count range.
    #[must_use]
    pub fn with_player_range(mut self, min: usize, max: usize) -> Self {
        self.min_players = min;
        self.max_players = max;
        self
    }
}
