//! Bracket: draw the field, shuffle it, and fight rounds until one fighter is left.

use crate::config::TournamentConfig;
use crate::logic::battle::Battle;
use crate::logic::generation::generate_fighters;
use crate::models::{Corner, Fighter, Tournament, TournamentError, TournamentState};
use crate::narrator::Narrator;
use rand::seq::SliceRandom;
use rand::Rng;

/// Generate the 2^number_of_rounds fighters of a new tournament.
pub fn generate_participants<R: Rng + ?Sized>(
    config: &TournamentConfig,
    rng: &mut R,
) -> Result<Vec<Fighter>, TournamentError> {
    let required = config
        .participant_count()
        .filter(|n| *n >= 2 && n.is_power_of_two())
        .ok_or(TournamentError::InvalidParticipantCount(config.number_of_rounds))?;
    generate_fighters(config, required, rng)
}

/// Validate the config and create a tournament in Setup state.
pub fn setup_tournament<R: Rng + ?Sized>(
    config: &TournamentConfig,
    rng: &mut R,
) -> Result<Tournament, TournamentError> {
    config.validate()?;
    let participants = generate_participants(config, rng)?;
    log::info!(
        "{}: {} fighters ({})",
        config.title,
        participants.len(),
        if config.use_fixed_roster {
            "fixed roster"
        } else {
            "random fighters"
        }
    );
    Ok(Tournament::with_participants(config.title.clone(), participants))
}

/// Put the field in a uniformly random order.
pub fn shuffle_participants<R: Rng + ?Sized>(tournament: &mut Tournament, rng: &mut R) {
    tournament.participants.shuffle(rng);
}

/// Fight rounds until a single fighter remains, counting the round down each time.
pub fn run_rounds<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    config: &TournamentConfig,
    rng: &mut R,
    narrator: &mut dyn Narrator,
) -> Result<(), TournamentError> {
    let n = tournament.participants.len();
    if !n.is_power_of_two() {
        return Err(TournamentError::InvariantViolation(n));
    }
    while tournament.participants.len() > 1 {
        tournament.counter.round = tournament.counter.round.saturating_sub(1);
        run_one_round(tournament, config, rng, narrator)?;
    }
    tournament.state = TournamentState::Completed;
    if let Ok(champion) = tournament.champion() {
        log::info!("{} wins {}", champion.name(), tournament.title);
    }
    Ok(())
}

/// Fight one round.
///
/// Fighters are paired in order: (0, 1), (2, 3), ... Each pair fights a fresh
/// battle and the winners, in match order, become the new field.
pub fn run_one_round<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    config: &TournamentConfig,
    rng: &mut R,
    narrator: &mut dyn Narrator,
) -> Result<(), TournamentError> {
    let n = tournament.participants.len();
    if n < 2 || !n.is_power_of_two() {
        return Err(TournamentError::InvariantViolation(n));
    }
    tournament.state = TournamentState::InProgress;
    tournament.counter.match_index = 0;
    let round = tournament.counter.round;
    log::debug!("round {} starts with {} fighters", round, n);

    let mut pool = std::mem::take(&mut tournament.participants).into_iter();
    let mut winners = Vec::with_capacity(n / 2);
    while let Some(mut first) = pool.next() {
        let mut second = pool.next().ok_or(TournamentError::InvariantViolation(n))?;
        tournament.counter.match_index += 1;
        narrator.on_match_announced(
            round,
            tournament.counter.match_index,
            tournament.total_rounds,
            first.name(),
            second.name(),
        );

        let outcome =
            Battle::new(&mut first, &mut second, config, rng, narrator).fight(rng, narrator);
        let winner = match outcome {
            Corner::One => first,
            Corner::Two => second,
        };
        narrator.on_match_winner(round, winner.name());
        winners.push(winner);
    }

    tournament.participants = winners;
    if tournament.participants.len() == 1 {
        tournament.state = TournamentState::Completed;
    }
    Ok(())
}

/// Complete run: announce, draw, shuffle, and fight every round.
///
/// Returns the finished tournament; its only participant is the champion.
pub fn run_tournament<R: Rng + ?Sized>(
    config: &TournamentConfig,
    rng: &mut R,
    narrator: &mut dyn Narrator,
) -> Result<Tournament, TournamentError> {
    let mut tournament = setup_tournament(config, rng)?;
    narrator.on_tournament_start(&tournament.title);
    shuffle_participants(&mut tournament, rng);
    narrator.on_participants_drawn(&tournament.participant_names());
    run_rounds(&mut tournament, config, rng, narrator)?;
    Ok(tournament)
}
