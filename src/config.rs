//! Tournament configuration: tunable constants, roster, presentation settings.
//!
//! Every field has a default, so an empty JSON object `{}` is a valid config
//! file. Call [`TournamentConfig::validate`] before running anything.

use crate::models::Stats;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Largest accepted `number_of_rounds`; the field then has 65,536 fighters.
pub const MAX_ROUNDS: u32 = 16;

/// Configuration problems. All are fatal: the simulation never starts.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConfigError {
    /// Name length bounds are reversed or the minimum is below 1.
    InvalidNameLength { min: usize, max: usize },
    /// Dodge chance must be a percentage.
    DodgeChanceOutOfRange(u32),
    /// Rounds must lie in 1..=MAX_ROUNDS.
    InvalidNumberOfRounds(u32),
    InvalidAttributeRange { min: i32, max: i32 },
    InvalidStartingHealth(i32),
    /// Vowel and consonant runs must both allow at least one letter.
    InvalidRunLength { vowels: usize, consonants: usize },
    /// Alphabet is empty or repeats a letter.
    InvalidAlphabet(&'static str),
    /// A letter is both a vowel and a consonant.
    OverlappingAlphabets(char),
    DuplicateRosterName(String),
    /// A roster stat lies outside [min_attribute, max_attribute].
    RosterStatOutOfRange(String),
    /// Could not produce enough distinct random names.
    NameSpaceExhausted { generated: usize, required: usize },
    /// Config or roster file could not be read.
    Read(String),
    /// Config or roster file could not be parsed.
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidNameLength { min, max } => {
                write!(f, "Name length bounds are invalid (min {}, max {})", min, max)
            }
            ConfigError::DodgeChanceOutOfRange(p) => {
                write!(f, "Dodge chance must be between 0 and 100 (got {})", p)
            }
            ConfigError::InvalidNumberOfRounds(n) => {
                write!(
                    f,
                    "Number of rounds must be between 1 and {} (got {})",
                    MAX_ROUNDS, n
                )
            }
            ConfigError::InvalidAttributeRange { min, max } => {
                write!(f, "Attribute range is invalid (min {}, max {})", min, max)
            }
            ConfigError::InvalidStartingHealth(h) => {
                write!(f, "Starting health must be positive (got {})", h)
            }
            ConfigError::InvalidRunLength { vowels, consonants } => write!(
                f,
                "Letter runs must be at least 1 (vowels {}, consonants {})",
                vowels, consonants
            ),
            ConfigError::InvalidAlphabet(which) => {
                write!(f, "The {} alphabet must be non-empty with distinct letters", which)
            }
            ConfigError::OverlappingAlphabets(letter) => {
                write!(f, "'{}' is listed as both a vowel and a consonant", letter)
            }
            ConfigError::DuplicateRosterName(name) => {
                write!(f, "Roster lists '{}' more than once", name)
            }
            ConfigError::RosterStatOutOfRange(name) => {
                write!(f, "Roster entry '{}' has a stat outside the attribute range", name)
            }
            ConfigError::NameSpaceExhausted {
                generated,
                required,
            } => write!(
                f,
                "Only {} distinct names could be generated, {} are needed",
                generated, required
            ),
            ConfigError::Read(e) => write!(f, "Failed to read file: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}

/// One predefined character.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub speed: i32,
    pub attack: i32,
    pub defense: i32,
}

impl RosterEntry {
    pub fn new(name: impl Into<String>, speed: i32, attack: i32, defense: i32) -> Self {
        Self {
            name: name.into(),
            speed,
            attack,
            defense,
        }
    }

    pub fn stats(&self) -> Stats {
        Stats::new(self.speed, self.attack, self.defense)
    }
}

/// Terminal output settings. Never affect the simulation.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PresentationConfig {
    /// Skip the blow-by-blow lines of each battle.
    #[serde(default = "default_true")]
    pub summarize_battles: bool,
    /// Pauses and typewriter effect on/off.
    #[serde(default = "default_true")]
    pub pacing: bool,
    /// Pause after announcements, in milliseconds.
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
    /// Delay between characters of typed text, in milliseconds.
    #[serde(default = "default_keystroke_ms")]
    pub keystroke_ms: u64,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            summarize_battles: true,
            pacing: true,
            pause_ms: default_pause_ms(),
            keystroke_ms: default_keystroke_ms(),
        }
    }
}

/// Everything the simulation reads. Built once, read-only afterwards.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Health every fighter starts each battle with.
    #[serde(default = "default_starting_health")]
    pub starting_health: i32,
    #[serde(default = "default_min_attribute")]
    pub min_attribute: i32,
    #[serde(default = "default_max_attribute")]
    pub max_attribute: i32,
    /// Percent chance (0-100) that the defender dodges a blow.
    #[serde(default = "default_dodge_chance")]
    pub dodge_chance_percent: u32,
    /// The field has 2^number_of_rounds fighters.
    #[serde(default = "default_number_of_rounds")]
    pub number_of_rounds: u32,
    #[serde(default = "default_name_min_length")]
    pub name_min_length: usize,
    #[serde(default = "default_name_max_length")]
    pub name_max_length: usize,
    #[serde(default = "default_max_vowel_run")]
    pub max_vowel_run: usize,
    #[serde(default = "default_max_consonant_run")]
    pub max_consonant_run: usize,
    #[serde(default = "default_vowels")]
    pub vowels: String,
    #[serde(default = "default_consonants")]
    pub consonants: String,
    /// Draw fighters from `roster` instead of generating them.
    #[serde(default = "default_true")]
    pub use_fixed_roster: bool,
    /// Predefined characters. The first one always takes part.
    #[serde(default = "default_roster")]
    pub roster: Vec<RosterEntry>,
    #[serde(default)]
    pub presentation: PresentationConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            starting_health: default_starting_health(),
            min_attribute: default_min_attribute(),
            max_attribute: default_max_attribute(),
            dodge_chance_percent: default_dodge_chance(),
            number_of_rounds: default_number_of_rounds(),
            name_min_length: default_name_min_length(),
            name_max_length: default_name_max_length(),
            max_vowel_run: default_max_vowel_run(),
            max_consonant_run: default_max_consonant_run(),
            vowels: default_vowels(),
            consonants: default_consonants(),
            use_fixed_roster: true,
            roster: default_roster(),
            presentation: PresentationConfig::default(),
        }
    }
}

impl TournamentConfig {
    /// Load configuration from a JSON file and validate it.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Read(e.to_string()))?;
        let config = Self::from_json(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON config without validating it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Number of fighters in the initial field, if the round count is usable.
    pub fn participant_count(&self) -> Option<usize> {
        2usize.checked_pow(self.number_of_rounds)
    }

    /// Check every constraint the simulation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.number_of_rounds < 1 || self.number_of_rounds > MAX_ROUNDS {
            return Err(ConfigError::InvalidNumberOfRounds(self.number_of_rounds));
        }
        if self.dodge_chance_percent > 100 {
            return Err(ConfigError::DodgeChanceOutOfRange(self.dodge_chance_percent));
        }
        if self.starting_health < 1 {
            return Err(ConfigError::InvalidStartingHealth(self.starting_health));
        }
        self.validate_attribute_range()?;
        self.validate_name_rules()?;
        self.validate_roster()
    }

    pub fn validate_attribute_range(&self) -> Result<(), ConfigError> {
        if self.min_attribute < 0 || self.min_attribute > self.max_attribute {
            return Err(ConfigError::InvalidAttributeRange {
                min: self.min_attribute,
                max: self.max_attribute,
            });
        }
        Ok(())
    }

    /// Constraints of the random name generator.
    pub fn validate_name_rules(&self) -> Result<(), ConfigError> {
        if self.name_min_length < 1 || self.name_min_length > self.name_max_length {
            return Err(ConfigError::InvalidNameLength {
                min: self.name_min_length,
                max: self.name_max_length,
            });
        }
        if self.max_vowel_run < 1 || self.max_consonant_run < 1 {
            return Err(ConfigError::InvalidRunLength {
                vowels: self.max_vowel_run,
                consonants: self.max_consonant_run,
            });
        }
        let vowels = self.vowels.to_lowercase();
        let consonants = self.consonants.to_lowercase();
        if !is_alphabet(&vowels) {
            return Err(ConfigError::InvalidAlphabet("vowel"));
        }
        if !is_alphabet(&consonants) {
            return Err(ConfigError::InvalidAlphabet("consonant"));
        }
        match vowels.chars().find(|c| consonants.contains(*c)) {
            Some(letter) => Err(ConfigError::OverlappingAlphabets(letter)),
            None => Ok(()),
        }
    }

    /// Names are always unique; stats only matter when the roster is drawn from.
    fn validate_roster(&self) -> Result<(), ConfigError> {
        let range = self.min_attribute..=self.max_attribute;
        let mut seen = HashSet::new();
        for entry in &self.roster {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateRosterName(entry.name.clone()));
            }
            if !self.use_fixed_roster {
                continue;
            }
            let in_range = [entry.speed, entry.attack, entry.defense]
                .iter()
                .all(|v| range.contains(v));
            if !in_range {
                return Err(ConfigError::RosterStatOutOfRange(entry.name.clone()));
            }
        }
        Ok(())
    }
}

/// Read a roster from a CSV file with a `name,speed,attack,defense` header.
pub fn load_roster_csv(path: &Path) -> Result<Vec<RosterEntry>, ConfigError> {
    let file = std::fs::File::open(path).map_err(|e| ConfigError::Read(e.to_string()))?;
    read_roster_csv(file)
}

/// Read a roster from any CSV source (see [`load_roster_csv`]).
pub fn read_roster_csv<R: std::io::Read>(reader: R) -> Result<Vec<RosterEntry>, ConfigError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    rdr.deserialize::<RosterEntry>()
        .map(|row| row.map_err(|e| ConfigError::Parse(e.to_string())))
        .collect()
}

/// Non-empty with no repeated letters. Expects lower-cased input.
fn is_alphabet(letters: &str) -> bool {
    let mut seen = HashSet::new();
    !letters.is_empty() && letters.chars().all(|c| c.is_alphabetic() && seen.insert(c))
}

fn default_true() -> bool {
    true
}

fn default_pause_ms() -> u64 {
    1000
}

fn default_keystroke_ms() -> u64 {
    100
}

fn default_title() -> String {
    "42nd World Martial Arts Tournament".to_string()
}

fn default_starting_health() -> i32 {
    100
}

fn default_min_attribute() -> i32 {
    15
}

fn default_max_attribute() -> i32 {
    100
}

fn default_dodge_chance() -> u32 {
    20
}

fn default_number_of_rounds() -> u32 {
    4
}

fn default_name_min_length() -> usize {
    4
}

fn default_name_max_length() -> usize {
    7
}

fn default_max_vowel_run() -> usize {
    3
}

fn default_max_consonant_run() -> usize {
    2
}

fn default_vowels() -> String {
    "aeiou".to_string()
}

fn default_consonants() -> String {
    "bcdfghjklmnprstvxz".to_string()
}

fn default_roster() -> Vec<RosterEntry> {
    [
        ("Son Goku", 90, 85, 90),
        ("Son Gohan", 84, 84, 79),
        ("Vegeta", 85, 90, 80),
        ("Piccolo", 75, 75, 70),
        ("Trunks", 80, 80, 85),
        ("Son Goten", 86, 91, 79),
        ("Krillin", 70, 69, 82),
        ("Yamcha", 50, 50, 50),
        ("Tien Shinhan", 55, 55, 45),
        ("Chiaotzu", 45, 50, 45),
        ("Master Roshi", 60, 65, 60),
        ("Yajirobe", 30, 30, 30),
        ("Mr. Popo", 66, 66, 66),
        ("Raditz", 75, 70, 75),
        ("Nappa", 70, 65, 70),
        ("Frieza", 80, 80, 95),
        ("Android 17", 65, 50, 55),
        ("Android 18", 66, 70, 75),
        ("Cell", 68, 69, 71),
        ("Tao Pai Pai", 45, 50, 40),
        ("Mr. Satan", 20, 30, 20),
        ("Videl", 55, 76, 68),
        ("Pan", 69, 65, 90),
        ("Uub", 95, 80, 80),
    ]
    .into_iter()
    .map(|(name, speed, attack, defense)| RosterEntry::new(name, speed, attack, defense))
    .collect()
}
