//! Fighter generation: draw from the fixed roster or build fighters at random.

use crate::config::{ConfigError, RosterEntry, TournamentConfig, MAX_ROUNDS};
use crate::models::{Fighter, Stats, TournamentError};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Attempts per fighter at finding a name nobody else has.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Upper bound on up-front allocation; the largest valid field.
const MAX_PRESIZE: usize = 1 << MAX_ROUNDS;

/// Produce `count` fighters in the mode selected by `use_fixed_roster`.
pub fn generate_fighters<R: Rng + ?Sized>(
    config: &TournamentConfig,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Fighter>, TournamentError> {
    if config.use_fixed_roster {
        roster_fighters(&config.roster, count, rng)
    } else {
        Ok(random_fighters(config, count, rng)?)
    }
}

/// Draw `count` fighters from the roster.
///
/// The first roster entry is always drawn. The other `count - 1` are sampled
/// uniformly, without replacement, from the rest of the roster.
pub fn roster_fighters<R: Rng + ?Sized>(
    roster: &[RosterEntry],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Fighter>, TournamentError> {
    if roster.len() < count {
        return Err(TournamentError::InsufficientRoster {
            required: count,
            available: roster.len(),
        });
    }
    let Some((first, rest)) = roster.split_first() else {
        return Ok(Vec::new());
    };
    if count == 0 {
        return Ok(Vec::new());
    }

    let mut fighters = Vec::with_capacity(count);
    fighters.push(Fighter::new(first.name.clone(), first.stats()));
    fighters.extend(
        rest.choose_multiple(rng, count - 1)
            .map(|entry| Fighter::new(entry.name.clone(), entry.stats())),
    );
    Ok(fighters)
}

/// Build `count` fighters with random names and attributes. Names are unique.
pub fn random_fighters<R: Rng + ?Sized>(
    config: &TournamentConfig,
    count: usize,
    rng: &mut R,
) -> Result<Vec<Fighter>, ConfigError> {
    config.validate_attribute_range()?;
    let alphabet = Alphabet::from_config(config)?;

    let capacity = count.min(MAX_PRESIZE);
    let mut taken = HashSet::with_capacity(capacity);
    let mut fighters = Vec::with_capacity(capacity);
    for _ in 0..count {
        let name = (0..MAX_NAME_ATTEMPTS)
            .map(|_| alphabet.name(config, rng))
            .find(|name| !taken.contains(name))
            .ok_or(ConfigError::NameSpaceExhausted {
                generated: fighters.len(),
                required: count,
            })?;
        taken.insert(name.clone());
        fighters.push(Fighter::new(name, random_stats(config, rng)));
    }
    Ok(fighters)
}

/// A single random name following the configured length and letter-run rules.
pub fn random_name<R: Rng + ?Sized>(
    config: &TournamentConfig,
    rng: &mut R,
) -> Result<String, ConfigError> {
    Ok(Alphabet::from_config(config)?.name(config, rng))
}

/// Speed, attack and defense drawn independently from the attribute range.
pub fn random_stats<R: Rng + ?Sized>(config: &TournamentConfig, rng: &mut R) -> Stats {
    Stats::new(
        random_attribute(config, rng),
        random_attribute(config, rng),
        random_attribute(config, rng),
    )
}

/// Uniform in `[min_attribute, max_attribute]`. The range must be valid.
pub fn random_attribute<R: Rng + ?Sized>(config: &TournamentConfig, rng: &mut R) -> i32 {
    rng.gen_range(config.min_attribute..=config.max_attribute)
}

/// Validated letters for name generation.
struct Alphabet {
    vowels: Vec<char>,
    consonants: Vec<char>,
}

impl Alphabet {
    fn from_config(config: &TournamentConfig) -> Result<Self, ConfigError> {
        config.validate_name_rules()?;
        Ok(Self {
            vowels: config.vowels.to_lowercase().chars().collect(),
            consonants: config.consonants.to_lowercase().chars().collect(),
        })
    }

    fn name<R: Rng + ?Sized>(&self, config: &TournamentConfig, rng: &mut R) -> String {
        let length = rng.gen_range(config.name_min_length..=config.name_max_length);
        let mut name = String::with_capacity(length);
        let mut vowel_run = 0;
        let mut consonant_run = 0;

        for _ in 0..length {
            let vowel = if vowel_run >= config.max_vowel_run {
                false
            } else if consonant_run >= config.max_consonant_run {
                true
            } else {
                rng.gen_bool(0.5)
            };
            let (pool, run, other) = if vowel {
                (&self.vowels, &mut vowel_run, &mut consonant_run)
            } else {
                (&self.consonants, &mut consonant_run, &mut vowel_run)
            };
            if let Some(&letter) = pool.choose(rng) {
                name.push(letter);
            }
            *run += 1;
            *other = 0;
        }

        capitalize(&name)
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
