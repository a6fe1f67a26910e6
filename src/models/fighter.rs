//! Fighter: identity, base stats and combat health.

use serde::{Deserialize, Serialize};

/// Base stats of a fighter. Fixed once the fighter is created.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: i32,
    pub attack: i32,
    pub defense: i32,
}

impl Stats {
    pub fn new(speed: i32, attack: i32, defense: i32) -> Self {
        Self {
            speed,
            attack,
            defense,
        }
    }
}

/// A tournament participant.
///
/// Name and stats are read-only after construction. Health is only touched by
/// the battle the fighter is currently in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Fighter {
    name: String,
    stats: Stats,
    health: i32,
}

impl Fighter {
    /// Create a fighter with the given name and stats. Health starts at zero
    /// until the first battle restores it.
    pub fn new(name: impl Into<String>, stats: Stats) -> Self {
        Self {
            name: name.into(),
            stats,
            health: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    pub fn speed(&self) -> i32 {
        self.stats.speed
    }

    pub fn attack(&self) -> i32 {
        self.stats.attack
    }

    pub fn defense(&self) -> i32 {
        self.stats.defense
    }

    /// Current health. May be negative right after the finishing blow.
    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn is_knocked_out(&self) -> bool {
        self.health <= 0
    }

    /// Reset health at the start of a battle.
    pub(crate) fn restore_health(&mut self, starting_health: i32) {
        self.health = starting_health;
    }

    /// Subtract damage and return the remaining health.
    pub(crate) fn take_damage(&mut self, damage: i32) -> i32 {
        self.health -= damage;
        self.health
    }
}
