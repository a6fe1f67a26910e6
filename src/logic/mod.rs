//! Tournament logic: fighter generation, battles, bracket rounds.

mod battle;
mod generation;
mod rounds;

pub use battle::{damage, is_dodge, opening_attacker, Battle};
pub use generation::{
    generate_fighters, random_attribute, random_fighters, random_name, random_stats,
    roster_fighters,
};
pub use rounds::{
    generate_participants, run_one_round, run_rounds, run_tournament, setup_tournament,
    shuffle_participants,
};
