//! Martial arts tournament simulator: library with models, logic and narration.

pub mod config;
pub mod logic;
pub mod models;
pub mod narrator;
pub mod terminal;

pub use config::{
    load_roster_csv, ConfigError, PresentationConfig, RosterEntry, TournamentConfig, MAX_ROUNDS,
};
pub use logic::{
    damage, generate_participants, is_dodge, run_one_round, run_rounds, run_tournament,
    setup_tournament, shuffle_participants, Battle,
};
pub use models::{
    BattleState, Corner, Fighter, RoundCounter, Stats, Tournament, TournamentError,
    TournamentState,
};
pub use narrator::{EventLog, NarrationEvent, Narrator, SilentNarrator};
pub use terminal::TerminalNarrator;
