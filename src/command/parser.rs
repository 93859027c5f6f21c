//! Parse a typed line into a command

use crate::core::types::Direction;

/// A player command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Move(Direction),
    Collect,
    /// Free text after `answer`, possibly empty
    Answer(String),
    /// Anything else, kept for the feedback message
    Unknown(String),
}

/// Parse one line of input
///
/// Case-insensitive. The first word picks the command; for `answer`, the
/// remaining words joined by single spaces form the response.
pub fn parse_command(input: &str) -> Command {
    let lowered = input.trim().to_lowercase();
    let mut words = lowered.split_whitespace();
    let Some(verb) = words.next() else {
        return Command::Unknown(String::new());
    };

    if let Some(direction) = Direction::parse(verb) {
        return Command::Move(direction);
    }

    match verb {
        "help" => Command::Help,
        "collect" => Command::Collect,
        "answer" => Command::Answer(words.collect::<Vec<_>>().join(" ")),
        other => Command::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement() {
        assert_eq!(parse_command("north"), Command::Move(Direction::North));
        assert_eq!(parse_command("  WEST "), Command::Move(Direction::West));
        assert_eq!(parse_command("treasure"), Command::Move(Direction::Treasure));
    }

    #[test]
    fn test_answer_keeps_all_words() {
        assert_eq!(
            parse_command("answer It was   the DISAPPEARANCES"),
            Command::Answer("it was the disappearances".into())
        );
        assert_eq!(parse_command("answer"), Command::Answer(String::new()));
    }

    #[test]
    fn test_unknown() {
        assert_eq!(parse_command("dance"), Command::Unknown("dance".into()));
        assert_eq!(parse_command(""), Command::Unknown(String::new()));
    }

    #[test]
    fn test_extra_words_ignored_for_simple_commands() {
        assert_eq!(parse_command("collect key"), Command::Collect);
        assert_eq!(parse_command("help me"), Command::Help);
    }
}
