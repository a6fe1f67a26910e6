//! Corner and BattleState for a single pairwise fight.

use serde::{Deserialize, Serialize};

/// Which of the two fighters in a battle.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    /// The first fighter drawn for the match.
    One,
    /// The second fighter drawn for the match.
    Two,
}

impl Corner {
    pub fn opponent(self) -> Self {
        match self {
            Corner::One => Corner::Two,
            Corner::Two => Corner::One,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Corner::One => 0,
            Corner::Two => 1,
        }
    }
}

/// Progress of a battle.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BattleState {
    #[default]
    InProgress,
    /// Battle is over; the fighter in this corner won.
    Resolved(Corner),
}

impl BattleState {
    pub fn winner(self) -> Option<Corner> {
        match self {
            BattleState::InProgress => None,
            BattleState::Resolved(corner) => Some(corner),
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, BattleState::Resolved(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_a_resolved_battle_has_a_winner() {
        assert_eq!(BattleState::default(), BattleState::InProgress);
        assert_eq!(BattleState::InProgress.winner(), None);
        assert_eq!(BattleState::Resolved(Corner::Two).winner(), Some(Corner::Two));
        assert!(BattleState::Resolved(Corner::One).is_resolved());
    }

    #[test]
    fn opponent_swaps_corners() {
        assert_eq!(Corner::One.opponent(), Corner::Two);
        assert_eq!(Corner::Two.opponent().opponent(), Corner::Two);
    }
}
