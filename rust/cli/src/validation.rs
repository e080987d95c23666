//! Input parsing and validation for interactive commands.

use quartet_career::Tier;
use quartet_engine::deck::{clamp_luckiness, validate_luckiness};
use quartet_engine::round::Action;

/// Result of parsing one line typed during `play`.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    Quit,
    Invalid(String),
}

/// Accepts (case-insensitive):
/// - `d`, `draw` or an empty line → Draw
/// - `x`, `discard` → Discard
/// - `u`, `undo` → Undo
/// - `e`, `end` → End
/// - `q`, `quit` → Quit
///
/// ```rust
/// # use quartet_cli::validation::{parse_play_input, ParseResult};
/// use quartet_engine::round::Action;
///
/// assert_eq!(parse_play_input("x"), ParseResult::Action(Action::Discard));
/// assert_eq!(parse_play_input(""), ParseResult::Action(Action::Draw));
/// assert_eq!(parse_play_input("quit"), ParseResult::Quit);
/// assert!(matches!(parse_play_input("fold"), ParseResult::Invalid(_)));
/// ```
pub fn parse_play_input(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    match input.as_str() {
        "" | "d" | "draw" => ParseResult::Action(Action::Draw),
        "x" | "discard" => ParseResult::Action(Action::Discard),
        "u" | "undo" => ParseResult::Action(Action::Undo),
        "e" | "end" => ParseResult::Action(Action::End),
        "q" | "quit" => ParseResult::Quit,
        other => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Use d, x, u, e or q",
            other
        )),
    }
}

/// Rejects non-finite values and warns (via the returned flag) when the
/// value falls outside the range the deck honours.
pub fn validate_luck(luck: f64) -> Result<(f64, bool), String> {
    let luck = validate_luckiness(luck).map_err(|e| e.to_string())?;
    let clamped = clamp_luckiness(luck);
    Ok((luck, clamped != luck))
}

pub fn parse_tier(s: &str) -> Result<Tier, String> {
    s.parse::<Tier>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_forms_and_case() {
        assert_eq!(parse_play_input("DRAW"), ParseResult::Action(Action::Draw));
        assert_eq!(parse_play_input(" Undo "), ParseResult::Action(Action::Undo));
        assert_eq!(parse_play_input("end"), ParseResult::Action(Action::End));
        assert_eq!(parse_play_input("Q"), ParseResult::Quit);
    }

    #[test]
    fn invalid_input_has_hint() {
        match parse_play_input("raise 10") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Use d, x, u, e or q")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn luck_validation() {
        assert_eq!(validate_luck(1.1), Ok((1.1, false)));
        assert_eq!(validate_luck(2.0), Ok((2.0, true)));
        assert_eq!(validate_luck(0.5), Ok((0.5, true)));
        assert!(validate_luck(f64::INFINITY).is_err());
    }

    #[test]
    fn tier_names() {
        assert_eq!(parse_tier("national"), Ok(Tier::National));
        assert!(parse_tier("galactic").is_err());
    }
}
