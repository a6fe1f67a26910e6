//! Terminal narration: ANSI styling, typewriter text and pauses.
//!
//! Output failures are logged and otherwise ignored; narration never stops a
//! tournament.

use crate::config::PresentationConfig;
use crate::narrator::Narrator;
use crossterm::style::{Attribute, Stylize};
use std::fmt::Display;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Renders events as styled text on a writer (stdout by default).
pub struct TerminalNarrator<W: Write> {
    out: W,
    presentation: PresentationConfig,
}

impl TerminalNarrator<io::Stdout> {
    pub fn stdout(presentation: PresentationConfig) -> Self {
        Self::new(io::stdout(), presentation)
    }
}

impl<W: Write> TerminalNarrator<W> {
    pub fn new(out: W, presentation: PresentationConfig) -> Self {
        Self { out, presentation }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn pause(&self) {
        if self.presentation.pacing {
            thread::sleep(Duration::from_millis(self.presentation.pause_ms));
        }
    }

    fn line(&mut self, text: impl Display) {
        let result = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        report(result);
    }

    /// Print text one character at a time.
    fn type_out(&mut self, text: &str) {
        if !self.presentation.pacing {
            report(write!(self.out, "{}", text).and_then(|_| self.out.flush()));
            return;
        }
        let delay = Duration::from_millis(self.presentation.keystroke_ms);
        for ch in text.chars() {
            if let Err(e) = write!(self.out, "{}", ch).and_then(|_| self.out.flush()) {
                report(Err(e));
                return;
            }
            thread::sleep(delay);
        }
    }
}

fn report(result: io::Result<()>) {
    if let Err(e) = result {
        log::warn!("failed to write narration: {}", e);
    }
}

impl<W: Write> Narrator for TerminalNarrator<W> {
    fn on_tournament_start(&mut self, title: &str) {
        let banner = format!("\nWelcome to the {}\n", title);
        self.line(banner.red().on_green().bold());
    }

    fn on_participants_drawn(&mut self, names: &[String]) {
        let mut text = format!("\n{} fighters take part in this tournament:\n", names.len());
        for name in names {
            text.push_str("*- ");
            text.push_str(name);
            text.push('\n');
        }
        text.push('\n');
        self.type_out(&text);
        self.pause();
    }

    fn on_match_announced(
        &mut self,
        round: u32,
        match_index: u32,
        total_rounds: u32,
        first: &str,
        second: &str,
    ) {
        let heading = if round == 1 {
            "The final is about to begin".to_string()
        } else {
            format!(
                "The {} match of the {} (round {} of {})",
                ordinal(match_index),
                round_label(round),
                total_rounds.saturating_sub(round) + 1,
                total_rounds
            )
        };
        self.line(heading);
        self.line(format!("{} faces {}", first.white(), second.white()));
        self.pause();
    }

    fn on_match_winner(&mut self, round: u32, winner: &str) {
        if round == 1 {
            let styled = winner
                .red()
                .attribute(Attribute::DoubleUnderlined)
                .slow_blink();
            self.line(format!("{} is the new world martial arts champion!\n", styled));
        } else {
            let styled = winner.green().underlined().slow_blink();
            self.line(format!("{} wins the match.\n", styled));
        }
        self.pause();
    }

    fn on_battle_start(&mut self, attacker: &str) {
        if self.presentation.summarize_battles {
            return;
        }
        self.line(format!("{} opens the attack.", attacker));
    }

    fn on_dodge(&mut self, defender: &str) {
        if self.presentation.summarize_battles {
            return;
        }
        self.line(format!("{} dodges the attack.", defender));
    }

    fn on_hit(&mut self, defender: &str, damage: i32, remaining: i32) {
        if self.presentation.summarize_battles {
            return;
        }
        self.line(format!(
            "{} takes {} damage. {} health left.",
            defender, damage, remaining
        ));
    }
}

/// Name of a bracket stage: 1 is the final, 2 the semifinals, and so on.
pub fn round_label(round: u32) -> String {
    match round {
        1 => "final".to_string(),
        2 => "semifinals".to_string(),
        3 => "quarterfinals".to_string(),
        n => format!("round of {}", 1u64 << n.min(63)),
    }
}

/// "first", "second", ... then "9th", "11th", "21st".
pub fn ordinal(n: u32) -> String {
    const WORDS: [&str; 8] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh", "eighth",
    ];
    if (1..=8).contains(&n) {
        return WORDS[n as usize - 1].to_string();
    }
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet(summarize_battles: bool) -> PresentationConfig {
        PresentationConfig {
            summarize_battles,
            pacing: false,
            ..PresentationConfig::default()
        }
    }

    fn render(narrator: TerminalNarrator<Vec<u8>>) -> String {
        String::from_utf8(narrator.into_inner()).unwrap()
    }

    #[test]
    fn labels_for_bracket_stages() {
        assert_eq!(round_label(1), "final");
        assert_eq!(round_label(2), "semifinals");
        assert_eq!(round_label(3), "quarterfinals");
        assert_eq!(round_label(4), "round of 16");
        assert_eq!(round_label(6), "round of 64");
    }

    #[test]
    fn ordinals() {
        assert_eq!(ordinal(1), "first");
        assert_eq!(ordinal(8), "eighth");
        assert_eq!(ordinal(9), "9th");
        assert_eq!(ordinal(12), "12th");
        assert_eq!(ordinal(21), "21st");
        assert_eq!(ordinal(32), "32nd");
        assert_eq!(ordinal(113), "113th");
    }

    #[test]
    fn announces_matches_and_winners() {
        let mut n = TerminalNarrator::new(Vec::new(), quiet(true));
        n.on_tournament_start("Cup");
        n.on_participants_drawn(&["Cell".to_string(), "Pan".to_string()]);
        n.on_match_announced(2, 3, 4, "Cell", "Pan");
        n.on_match_winner(2, "Cell");
        n.on_match_announced(1, 1, 4, "Cell", "Uub");
        n.on_match_winner(1, "Uub");
        let out = render(n);

        assert!(out.contains("Welcome to the Cup"));
        assert!(out.contains("2 fighters take part in this tournament:"));
        assert!(out.contains("*- Cell\n*- Pan\n"));
        assert!(out.contains("The third match of the semifinals (round 3 of 4)"));
        assert!(out.contains("wins the match."));
        assert!(out.contains("The final is about to begin"));
        assert!(out.contains("is the new world martial arts champion!"));
    }

    #[test]
    fn summary_mode_hides_blow_by_blow() {
        let mut n = TerminalNarrator::new(Vec::new(), quiet(true));
        n.on_battle_start("Cell");
        n.on_dodge("Pan");
        n.on_hit("Pan", 12, 88);
        assert_eq!(render(n), "");
    }

    #[test]
    fn full_mode_shows_blow_by_blow() {
        let mut n = TerminalNarrator::new(Vec::new(), quiet(false));
        n.on_battle_start("Cell");
        n.on_dodge("Pan");
        n.on_hit("Pan", 12, -3);
        assert_eq!(
            render(n),
            "Cell opens the attack.\nPan dodges the attack.\nPan takes 12 damage. -3 health left.\n"
        );
    }
}
