//! Terminal tournament runner.
//! Run with: cargo run --bin tournament -- [--seed N] [--config FILE] [--roster FILE]
//! The seed can also come from env: TOURNAMENT_SEED. Without one a random seed is
//! picked and logged so the run can be replayed.

use budokai::{
    load_roster_csv, run_tournament, EventLog, TerminalNarrator, Tournament,
    TournamentConfig, TournamentError,
};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Single-elimination martial arts tournament simulator
#[derive(Parser, Debug)]
#[command(name = "tournament")]
#[command(about = "Single-elimination martial arts tournament simulator")]
#[command(version)]
struct Args {
    /// JSON config file (missing fields take their defaults)
    #[arg(long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// CSV roster (name,speed,attack,defense) replacing the configured one
    #[arg(long, value_name = "ROSTER_FILE")]
    roster: Option<PathBuf>,

    /// Random seed for a reproducible tournament
    #[arg(long)]
    seed: Option<u64>,

    /// Number of rounds (the field has 2^rounds fighters)
    #[arg(long)]
    rounds: Option<u32>,

    /// Generate random fighters instead of drawing from the roster
    #[arg(long)]
    random_names: bool,

    /// Narrate every blow of every battle
    #[arg(long)]
    full_battles: bool,

    /// Disable pauses and the typewriter effect
    #[arg(long)]
    no_pacing: bool,

    /// Print the recorded events as JSON instead of narrating
    #[arg(long)]
    json: bool,
}

fn build_config(args: &Args) -> Result<TournamentConfig, TournamentError> {
    let mut config = match &args.config {
        Some(path) => TournamentConfig::load_from_file(path)?,
        None => TournamentConfig::default(),
    };
    if let Some(path) = &args.roster {
        config.roster = load_roster_csv(path)?;
    }
    if let Some(rounds) = args.rounds {
        config.number_of_rounds = rounds;
    }
    if args.random_names {
        config.use_fixed_roster = false;
    }
    if args.full_battles {
        config.presentation.summarize_battles = false;
    }
    if args.no_pacing {
        config.presentation.pacing = false;
    }
    config.validate()?;
    Ok(config)
}

fn resolve_seed(args: &Args) -> u64 {
    args.seed
        .or_else(|| {
            std::env::var("TOURNAMENT_SEED")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or_else(|| rand::thread_rng().gen())
}

/// Run silently and render every recorded event as JSON.
fn events_json(config: &TournamentConfig, rng: &mut StdRng) -> Result<String, Box<dyn Error>> {
    let mut events = EventLog::new();
    run_tournament(config, rng, &mut events)?;
    Ok(events.to_json()?)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let config = build_config(args)?;
    let seed = resolve_seed(args);
    log::info!("Using seed {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    if args.json {
        println!("{}", events_json(&config, &mut rng)?);
        return Ok(());
    }

    let mut narrator = TerminalNarrator::stdout(config.presentation.clone());
    let tournament = run_tournament(&config, &mut rng, &mut narrator)?;
    report_champion(&tournament);
    Ok(())
}

fn report_champion(tournament: &Tournament) {
    if let Ok(champion) = tournament.champion() {
        let stats = champion.stats();
        log::info!(
            "Champion {} (speed {}, attack {}, defense {})",
            champion.name(),
            stats.speed,
            stats.attack,
            stats.defense
        );
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("warn"));

    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_mode_renders_the_whole_run() {
        let config = TournamentConfig {
            number_of_rounds: 2,
            ..TournamentConfig::default()
        };
        let json = events_json(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        let events: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(events[0]["event"], "tournament_start");
        let last = events.last().unwrap();
        assert_eq!(last["event"], "match_winner");
        assert_eq!(last["round"], 1);
    }

    #[test]
    fn json_mode_fails_on_a_bad_config() {
        let config = TournamentConfig {
            number_of_rounds: 0,
            ..TournamentConfig::default()
        };
        let err = events_json(&config, &mut StdRng::seed_from_u64(9)).unwrap_err();
        assert!(err.to_string().contains("Number of rounds"));
    }
}
