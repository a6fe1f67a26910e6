//! Battle engine: one fight between two fighters, resolved turn by turn.

use crate::config::TournamentConfig;
use crate::models::{BattleState, Corner, Fighter};
use crate::narrator::Narrator;
use rand::Rng;
use std::cmp::Ordering;

/// A fight in progress. Created per pairing and dropped once it has a winner.
pub struct Battle<'a> {
    fighters: [&'a mut Fighter; 2],
    attacker: Corner,
    dodge_chance_percent: u32,
    state: BattleState,
}

impl<'a> Battle<'a> {
    /// Restore both fighters' health and decide who attacks first.
    pub fn new<R: Rng + ?Sized>(
        first: &'a mut Fighter,
        second: &'a mut Fighter,
        config: &TournamentConfig,
        rng: &mut R,
        narrator: &mut dyn Narrator,
    ) -> Self {
        first.restore_health(config.starting_health);
        second.restore_health(config.starting_health);
        let attacker = opening_attacker(first.speed(), second.speed(), rng);
        let battle = Self {
            fighters: [first, second],
            attacker,
            dodge_chance_percent: config.dodge_chance_percent,
            state: BattleState::InProgress,
        };
        narrator.on_battle_start(battle.fighter(attacker).name());
        battle
    }

    pub fn fighter(&self, corner: Corner) -> &Fighter {
        &*self.fighters[corner.index()]
    }

    /// Who throws the next blow.
    pub fn attacker(&self) -> Corner {
        self.attacker
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    /// Play one exchange: the defender dodges or takes a hit, then roles swap.
    ///
    /// Only the defender's health changes, so only the defender can be knocked
    /// out by a turn. Once resolved, further calls change nothing.
    pub fn resolve_turn<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        narrator: &mut dyn Narrator,
    ) -> BattleState {
        if self.state.is_resolved() {
            return self.state;
        }

        let defender = self.attacker.opponent();
        let roll = rng.gen_range(1..=100);
        if is_dodge(roll, self.dodge_chance_percent) {
            narrator.on_dodge(self.fighter(defender).name());
        } else {
            let dealt = damage(
                self.fighter(self.attacker).attack(),
                self.fighter(defender).defense(),
            );
            let remaining = self.fighters[defender.index()].take_damage(dealt);
            narrator.on_hit(self.fighter(defender).name(), dealt, remaining);
        }
        self.attacker = defender;

        self.state = self.check_knockout();
        self.state
    }

    /// Play turns until someone is knocked out and return the winner's corner.
    ///
    /// There is no turn limit. Two fighters who both deal zero damage fight
    /// forever.
    pub fn fight<R: Rng + ?Sized>(mut self, rng: &mut R, narrator: &mut dyn Narrator) -> Corner {
        let mut turns: u64 = 0;
        loop {
            turns += 1;
            if let Some(winner) = self.resolve_turn(rng, narrator).winner() {
                log::debug!(
                    "{} beat {} after {} turns",
                    self.fighter(winner).name(),
                    self.fighter(winner.opponent()).name(),
                    turns
                );
                return winner;
            }
        }
    }

    fn check_knockout(&self) -> BattleState {
        if self.fighters[0].is_knocked_out() {
            BattleState::Resolved(Corner::Two)
        } else if self.fighters[1].is_knocked_out() {
            BattleState::Resolved(Corner::One)
        } else {
            BattleState::InProgress
        }
    }
}

/// Faster fighter opens; equal speed is settled by a coin flip.
pub fn opening_attacker<R: Rng + ?Sized>(
    first_speed: i32,
    second_speed: i32,
    rng: &mut R,
) -> Corner {
    match first_speed.cmp(&second_speed) {
        Ordering::Greater => Corner::One,
        Ordering::Less => Corner::Two,
        Ordering::Equal => {
            if rng.gen_bool(0.5) {
                Corner::One
            } else {
                Corner::Two
            }
        }
    }
}

/// Damage of one blow.
///
/// Attack minus defense when that is positive; otherwise a tenth of the
/// attack, rounded half up. The floor is zero for attacks below 5.
pub fn damage(attack: i32, defense: i32) -> i32 {
    if attack > defense {
        attack - defense
    } else {
        (attack + 5).div_euclid(10)
    }
}

/// `roll` is a uniform draw in 1..=100.
pub fn is_dodge(roll: u32, dodge_chance_percent: u32) -> bool {
    roll <= dodge_chance_percent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stats;
    use crate::narrator::{EventLog, NarrationEvent, SilentNarrator};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn no_dodge() -> TournamentConfig {
        TournamentConfig {
            dodge_chance_percent: 0,
            ..TournamentConfig::default()
        }
    }

    fn fighter(name: &str, speed: i32, attack: i32, defense: i32) -> Fighter {
        Fighter::new(name, Stats::new(speed, attack, defense))
    }

    #[test]
    fn damage_examples() {
        assert_eq!(damage(90, 60), 30);
        assert_eq!(damage(50, 80), 5);
        assert_eq!(damage(0, 0), 0);
    }

    #[test]
    fn floor_damage_rounds_half_up() {
        assert_eq!(damage(4, 50), 0);
        assert_eq!(damage(5, 50), 1);
        assert_eq!(damage(14, 50), 1);
        assert_eq!(damage(15, 50), 2);
        assert_eq!(damage(60, 60), 6);
    }

    #[test]
    fn dodge_boundary() {
        assert!(is_dodge(20, 20));
        assert!(!is_dodge(21, 20));
        assert!(is_dodge(1, 1));
        assert!(!is_dodge(1, 0));
        assert!(is_dodge(100, 100));
    }

    #[test]
    fn faster_fighter_attacks_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(opening_attacker(80, 60, &mut rng), Corner::One);
        assert_eq!(opening_attacker(60, 80, &mut rng), Corner::Two);
    }

    #[test]
    fn equal_speed_can_go_either_way() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let openers: Vec<Corner> = (0..100).map(|_| opening_attacker(50, 50, &mut rng)).collect();
        assert!(openers.contains(&Corner::One));
        assert!(openers.contains(&Corner::Two));
    }

    #[test]
    fn battle_start_restores_health_and_announces_attacker() {
        let mut a = fighter("A", 90, 50, 50);
        let mut b = fighter("B", 10, 50, 50);
        let mut log = EventLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let battle = Battle::new(&mut a, &mut b, &no_dodge(), &mut rng, &mut log);
        assert_eq!(battle.attacker(), Corner::One);
        assert_eq!(battle.fighter(Corner::One).health(), 100);
        assert_eq!(battle.fighter(Corner::Two).health(), 100);
        assert_eq!(
            log.events,
            vec![NarrationEvent::BattleStart {
                attacker: "A".to_string()
            }]
        );
    }

    #[test]
    fn health_exactly_zero_ends_the_battle() {
        let mut a = fighter("A", 90, 50, 0);
        let mut b = fighter("B", 10, 0, 0);
        let mut log = EventLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let winner = Battle::new(&mut a, &mut b, &no_dodge(), &mut rng, &mut log)
            .fight(&mut rng, &mut log);

        assert_eq!(winner, Corner::One);
        assert_eq!(b.health(), 0);
        assert_eq!(
            log.events,
            vec![
                NarrationEvent::BattleStart {
                    attacker: "A".to_string()
                },
                NarrationEvent::Hit {
                    defender: "B".to_string(),
                    damage: 50,
                    remaining: 50
                },
                NarrationEvent::Hit {
                    defender: "A".to_string(),
                    damage: 0,
                    remaining: 100
                },
                NarrationEvent::Hit {
                    defender: "B".to_string(),
                    damage: 50,
                    remaining: 0
                },
            ]
        );
    }

    #[test]
    fn health_below_zero_ends_the_battle() {
        let mut a = fighter("A", 10, 0, 0);
        let mut b = fighter("B", 90, 60, 0);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut narrator = SilentNarrator;
        let mut battle = Battle::new(&mut a, &mut b, &no_dodge(), &mut rng, &mut narrator);

        assert_eq!(battle.resolve_turn(&mut rng, &mut narrator), BattleState::InProgress);
        assert_eq!(battle.fighter(Corner::One).health(), 40);
        assert_eq!(battle.resolve_turn(&mut rng, &mut narrator), BattleState::InProgress);
        assert_eq!(
            battle.resolve_turn(&mut rng, &mut narrator),
            BattleState::Resolved(Corner::Two)
        );
        assert_eq!(battle.fighter(Corner::One).health(), -20);
    }

    #[test]
    fn resolved_battle_ignores_further_turns() {
        let mut a = fighter("A", 90, 100, 0);
        let mut b = fighter("B", 10, 0, 0);
        let mut log = EventLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut battle = Battle::new(&mut a, &mut b, &no_dodge(), &mut rng, &mut log);
        assert_eq!(battle.state(), BattleState::InProgress);
        assert_eq!(
            battle.resolve_turn(&mut rng, &mut log),
            BattleState::Resolved(Corner::One)
        );
        assert_eq!(
            battle.resolve_turn(&mut rng, &mut log),
            BattleState::Resolved(Corner::One)
        );
        assert_eq!(battle.state().winner(), Some(Corner::One));
        assert_eq!(log.events.len(), 2);
    }

    #[test]
    fn dodge_swaps_roles_without_damage() {
        let config = TournamentConfig {
            dodge_chance_percent: 100,
            ..TournamentConfig::default()
        };
        let mut a = fighter("A", 90, 100, 0);
        let mut b = fighter("B", 10, 100, 0);
        let mut log = EventLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut battle = Battle::new(&mut a, &mut b, &config, &mut rng, &mut log);
        for _ in 0..10 {
            assert_eq!(battle.resolve_turn(&mut rng, &mut log), BattleState::InProgress);
        }
        assert_eq!(battle.attacker(), Corner::One);
        assert_eq!(battle.fighter(Corner::One).health(), 100);
        assert_eq!(battle.fighter(Corner::Two).health(), 100);
        assert_eq!(
            log.events[1..3],
            [
                NarrationEvent::Dodge {
                    defender: "B".to_string()
                },
                NarrationEvent::Dodge {
                    defender: "A".to_string()
                },
            ]
        );
    }

    /// Weak attacks against strong defense deal zero damage, so the battle
    /// never resolves on its own. Only a bounded number of turns is played.
    #[test]
    fn zero_damage_fighters_never_finish() {
        let mut a = fighter("A", 50, 4, 90);
        let mut b = fighter("B", 40, 4, 90);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut narrator = SilentNarrator;
        let config = TournamentConfig::default();
        let mut battle = Battle::new(&mut a, &mut b, &config, &mut rng, &mut narrator);
        for _ in 0..10_000 {
            assert_eq!(battle.resolve_turn(&mut rng, &mut narrator), BattleState::InProgress);
        }
        assert_eq!(battle.fighter(Corner::One).health(), 100);
        assert_eq!(battle.fighter(Corner::Two).health(), 100);
    }

    #[test]
    fn same_seed_same_battle() {
        let run = |seed: u64| {
            let mut a = fighter("Goku", 70, 85, 60);
            let mut b = fighter("Vegeta", 70, 80, 62);
            let mut log = EventLog::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let config = TournamentConfig::default();
            let winner = Battle::new(&mut a, &mut b, &config, &mut rng, &mut log)
                .fight(&mut rng, &mut log);
            (winner, log)
        };
        for seed in 0..20 {
            assert_eq!(run(seed), run(seed));
        }
    }
}
