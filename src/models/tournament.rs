//! Tournament, TournamentState and TournamentError.

use crate::config::ConfigError;
use crate::models::fighter::Fighter;
use serde::{Deserialize, Serialize};

/// Errors that can occur while setting up or running a tournament.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// Configuration is unusable; nothing was simulated.
    Config(ConfigError),
    /// Fixed roster has fewer entries than required participants.
    InsufficientRoster { required: usize, available: usize },
    /// Number of rounds does not give a power-of-two field of at least 2.
    InvalidParticipantCount(u32),
    /// Participant count was not a power of two at the start of a round.
    InvariantViolation(usize),
    /// Champion requested before the last round was fought.
    NotCompleted,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::Config(e) => write!(f, "Invalid configuration: {}", e),
            TournamentError::InsufficientRoster {
                required,
                available,
            } => write!(
                f,
                "Roster has {} characters but the tournament needs {}",
                available, required
            ),
            TournamentError::InvalidParticipantCount(rounds) => {
                write!(f, "{} rounds do not give a valid number of participants", rounds)
            }
            TournamentError::InvariantViolation(n) => {
                write!(f, "Round started with {} participants (not a power of two)", n)
            }
            TournamentError::NotCompleted => write!(f, "Tournament has not finished yet"),
        }
    }
}

impl std::error::Error for TournamentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TournamentError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for TournamentError {
    fn from(e: ConfigError) -> Self {
        TournamentError::Config(e)
    }
}

/// Current phase of the tournament.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TournamentState {
    /// Participants drawn; no match fought yet.
    #[default]
    Setup,
    /// At least one round under way.
    InProgress,
    /// One fighter left.
    Completed,
}

/// Current round and match within it.
///
/// `round` counts down to 1 (the final). `match_index` restarts at 1 for the
/// first match of every round.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundCounter {
    pub round: u32,
    pub match_index: u32,
}

/// Full tournament state: remaining fighters and bracket position.
#[derive(Clone, Debug, Serialize)]
pub struct Tournament {
    pub title: String,
    /// Fighters still in the tournament, in bracket order.
    pub participants: Vec<Fighter>,
    pub counter: RoundCounter,
    /// Rounds needed for the initial field (log2 of its size).
    pub total_rounds: u32,
    pub state: TournamentState,
}

impl Tournament {
    /// Create a tournament in Setup state with the given field.
    pub fn with_participants(title: impl Into<String>, participants: Vec<Fighter>) -> Self {
        let total_rounds = rounds_for(participants.len());
        Self {
            title: title.into(),
            participants,
            counter: RoundCounter {
                round: total_rounds + 1,
                match_index: 0,
            },
            total_rounds,
            state: TournamentState::Setup,
        }
    }

    /// Names of the remaining fighters, in bracket order.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.iter().map(|f| f.name().to_string()).collect()
    }

    /// The last fighter standing (only once the tournament is completed).
    pub fn champion(&self) -> Result<&Fighter, TournamentError> {
        match (self.state, self.participants.as_slice()) {
            (TournamentState::Completed, [champion]) => Ok(champion),
            _ => Err(TournamentError::NotCompleted),
        }
    }
}

/// log2 of the field size, rounded down. Zero for an empty or single field.
fn rounds_for(participants: usize) -> u32 {
    if participants < 2 {
        0
    } else {
        participants.ilog2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stats;

    fn field(n: usize) -> Vec<Fighter> {
        (0..n)
            .map(|i| Fighter::new(format!("F{i}"), Stats::new(50, 50, 50)))
            .collect()
    }

    #[test]
    fn counter_starts_one_above_total_rounds() {
        let t = Tournament::with_participants("Cup", field(16));
        assert_eq!(t.total_rounds, 4);
        assert_eq!(t.counter.round, 5);
        assert_eq!(t.counter.match_index, 0);
        assert_eq!(t.state, TournamentState::Setup);
    }

    #[test]
    fn champion_requires_completion() {
        let mut t = Tournament::with_participants("Cup", field(1));
        assert_eq!(t.champion(), Err(TournamentError::NotCompleted));
        t.state = TournamentState::Completed;
        assert_eq!(t.champion().unwrap().name(), "F0");
    }
}
