//! Data structures for the tournament: fighters, battles, bracket state.

mod battle;
mod fighter;
mod tournament;

pub use battle::{BattleState, Corner};
pub use fighter::{Fighter, Stats};
pub use tournament::{RoundCounter, Tournament, TournamentError, TournamentState};
