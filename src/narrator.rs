//! Narration interface between the simulation and its audience.
//!
//! The simulation calls a [`Narrator`] with structured data as things happen.
//! Narrators render or record; they never feed back into the outcome.

use serde::{Deserialize, Serialize};

/// Receives simulation events in the order they happen.
pub trait Narrator {
    fn on_tournament_start(&mut self, title: &str);

    fn on_participants_drawn(&mut self, names: &[String]);

    /// `round` counts down to 1 (the final); `match_index` starts at 1 each round.
    fn on_match_announced(
        &mut self,
        round: u32,
        match_index: u32,
        total_rounds: u32,
        first: &str,
        second: &str,
    );

    fn on_match_winner(&mut self, round: u32, winner: &str);

    fn on_battle_start(&mut self, attacker: &str);

    fn on_dodge(&mut self, defender: &str);

    /// `remaining` may be negative after the finishing blow.
    fn on_hit(&mut self, defender: &str, damage: i32, remaining: i32);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentNarrator;

impl Narrator for SilentNarrator {
    fn on_tournament_start(&mut self, _title: &str) {}
    fn on_participants_drawn(&mut self, _names: &[String]) {}
    fn on_match_announced(&mut self, _: u32, _: u32, _: u32, _: &str, _: &str) {}
    fn on_match_winner(&mut self, _round: u32, _winner: &str) {}
    fn on_battle_start(&mut self, _attacker: &str) {}
    fn on_dodge(&mut self, _defender: &str) {}
    fn on_hit(&mut self, _defender: &str, _damage: i32, _remaining: i32) {}
}

/// One recorded simulation event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NarrationEvent {
    TournamentStart {
        title: String,
    },
    ParticipantsDrawn {
        names: Vec<String>,
    },
    MatchAnnounced {
        round: u32,
        match_index: u32,
        total_rounds: u32,
        first: String,
        second: String,
    },
    MatchWinner {
        round: u32,
        winner: String,
    },
    BattleStart {
        attacker: String,
    },
    Dodge {
        defender: String,
    },
    Hit {
        defender: String,
        damage: i32,
        remaining: i32,
    },
}

/// Records every event for later rendering or inspection.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct EventLog {
    pub events: Vec<NarrationEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Winners of the final (round 1). Exactly one for a finished tournament.
    pub fn champions(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                NarrationEvent::MatchWinner { round: 1, winner } => Some(winner.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Only the match announcements, in order.
    pub fn announcements(&self) -> impl Iterator<Item = &NarrationEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, NarrationEvent::MatchAnnounced { .. }))
    }

    /// The whole log as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.events)
    }
}

impl Narrator for EventLog {
    fn on_tournament_start(&mut self, title: &str) {
        self.events.push(NarrationEvent::TournamentStart {
            title: title.to_string(),
        });
    }

    fn on_participants_drawn(&mut self, names: &[String]) {
        self.events.push(NarrationEvent::ParticipantsDrawn {
            names: names.to_vec(),
        });
    }

    fn on_match_announced(
        &mut self,
        round: u32,
        match_index: u32,
        total_rounds: u32,
        first: &str,
        second: &str,
    ) {
        self.events.push(NarrationEvent::MatchAnnounced {
            round,
            match_index,
            total_rounds,
            first: first.to_string(),
            second: second.to_string(),
        });
    }

    fn on_match_winner(&mut self, round: u32, winner: &str) {
        self.events.push(NarrationEvent::MatchWinner {
            round,
            winner: winner.to_string(),
        });
    }

    fn on_battle_start(&mut self, attacker: &str) {
        self.events.push(NarrationEvent::BattleStart {
            attacker: attacker.to_string(),
        });
    }

    fn on_dodge(&mut self, defender: &str) {
        self.events.push(NarrationEvent::Dodge {
            defender: defender.to_string(),
        });
    }

    fn on_hit(&mut self, defender: &str, damage: i32, remaining: i32) {
        self.events.push(NarrationEvent::Hit {
            defender: defender.to_string(),
            damage,
            remaining,
        });
    }
}
