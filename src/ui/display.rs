//! Plain-text rendering of game output
//!
//! Every function returns a `String`; printing is left to the caller.

use std::fmt::Write;

use crate::command::{GameEvent, Rejection};
use crate::scoring::FinalReport;
use crate::session::GameState;
use crate::world::graph::LocationGraph;
use crate::world::location::{Location, TimeEffect};

pub const HELP_TEXT: &str = "\
Commands:
  north / south / east / west  - Travel through a portal
  treasure                     - Enter the treasure vault (needs all 3 keys)
  collect                      - Pick up the key at this location
  answer <text>                - Answer the question posed here
  help                         - Show this list
  status                       - Show health, keys, score and clocks
  reset                        - Start a new game
  quit                         - Save and exit";

/// Signed clock as `HH:MM:SS`, with a leading `-` when negative
pub fn format_clock(seconds: f64) -> String {
    let sign = if seconds < 0.0 { "-" } else { "" };
    let total = seconds.abs().floor() as u64;
    format!(
        "{}{:02}:{:02}:{:02}",
        sign,
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

fn effect_line(effect: &TimeEffect) -> String {
    match effect {
        TimeEffect::Normal => "Time flows normally here.".to_string(),
        TimeEffect::Accelerated { factor } => format!("Time runs {}x faster here.", factor),
        TimeEffect::Decelerated { factor } => format!("Time runs at {}x speed here.", factor),
        TimeEffect::Reverse => "Time runs backwards here.".to_string(),
    }
}

pub fn render_location(location: &Location) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ===", location.id);
    let _ = writeln!(out, "{}", location.description);
    let _ = writeln!(out, "{}", effect_line(&location.time_effect));
    let exits: Vec<&str> = location
        .exit_directions()
        .iter()
        .map(|d| d.name())
        .collect();
    let _ = write!(out, "Exits: {}", exits.join(", "));
    out
}

pub fn render_event(event: &GameEvent, graph: &LocationGraph) -> String {
    match event {
        GameEvent::HelpShown => HELP_TEXT.to_string(),
        GameEvent::Moved { to, .. } => {
            let location = graph.get(*to);
            format!("{}\n{}", location.welcome, render_location(location))
        }
        GameEvent::RiddlePosed { question } => format!("QUESTION: {}", question),
        GameEvent::KeyCollected { key, keys_needed } => match keys_needed {
            0 => format!("You collected the {}! The treasure vault is now open.", key),
            n => format!("You collected the {}! {} more to find.", key, n),
        },
        GameEvent::AnswerAccepted { points } => {
            format!("Correct! +{} points. You may leave freely.", points)
        }
        GameEvent::AnswerRejected {
            penalty,
            health,
            question,
        } => format!(
            "Wrong answer! -{} health (now {}). Try again: {}",
            penalty, health, question
        ),
        GameEvent::Won { bonus } => format!("You found the treasure! +{} bonus points.", bonus),
    }
}

pub fn render_rejection(rejection: &Rejection) -> String {
    rejection.to_string()
}

pub fn render_status(state: &GameState, graph: &LocationGraph) -> String {
    let location = graph.get(state.location);
    let keys: Vec<String> = state.keys.iter().map(|k| k.to_string()).collect();
    let mut out = String::new();
    let _ = writeln!(out, "Location:   {}", state.location);
    let _ = writeln!(out, "Game time:  {}", format_clock(state.game_time));
    if location.is_timed() && state.active {
        let _ = writeln!(out, "Time left:  {}", format_clock(state.location_timer));
    }
    let _ = writeln!(out, "Health:     {}", state.health);
    let _ = writeln!(
        out,
        "Keys:       {}",
        if keys.is_empty() {
            "none".to_string()
        } else {
            keys.join(", ")
        }
    );
    let _ = write!(out, "Score:      {}", state.score);
    if let Some(question) = state.current_question.as_ref().filter(|_| state.awaiting_answer) {
        let _ = write!(out, "\nQUESTION:   {}", question);
    }
    out
}

pub fn render_report(report: &FinalReport) -> String {
    let mut out = String::new();
    let headline = match report.cause {
        crate::session::TerminalCause::Won => "=== YOU WIN ===",
        crate::session::TerminalCause::TimeExpired => "=== TIME'S UP ===",
    };
    let _ = writeln!(out, "{}", headline);
    let _ = writeln!(out, "Total game time:   {}", format_clock(report.total_game_time));
    let _ = writeln!(out, "Final health:      {}", report.final_health);
    let _ = writeln!(
        out,
        "Keys collected:    {} ({:.0}%)",
        report.keys.len(),
        report.completion_rate
    );
    let _ = writeln!(out, "Locations visited: {}", report.visited.len());
    let _ = writeln!(
        out,
        "Score:             {} (keys {}, riddles {}, bonus {})",
        report.score,
        report.breakdown.key_points,
        report.breakdown.riddle_points,
        report.breakdown.win_bonus
    );
    let _ = write!(out, "Rank:              {}", report.rank);
    out
}
