//! Card, sequence and outcome formatters for terminal display.
//!
//! Unicode suit symbols are used where the terminal supports them, with an
//! ASCII letter fallback (`AH`, `10S`) elsewhere. The ASCII form is also what
//! the engine's card parser accepts.
//!
//! ```rust
//! use quartet_engine::cards::{Card, Rank, Suit};
//! use quartet_cli::formatters::{format_card, format_sequence};
//!
//! let ace = Card::new(Suit::Spades, Rank::Ace);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "AS");
//! assert!(format_sequence(&[ace]).starts_with("[A"));
//! ```

use quartet_engine::cards::{Card, Suit};
use quartet_engine::round::{ActionOutcome, Round};

/// How many of the newest visible cards the play view shows.
pub const VIEW_WIDTH: usize = 8;

/// On Windows only modern terminals get Unicode symbols; elsewhere they are assumed.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_suit(suit: Suit) -> String {
    if supports_unicode() {
        suit.symbol().to_string()
    } else {
        suit.letter().to_string()
    }
}

pub fn format_card(card: &Card) -> String {
    format!("{}{}", card.rank.label(), format_suit(card.suit))
}

/// `[A♠ K♥ Q♦]`, or `[]` when empty.
pub fn format_sequence(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Newest cards of the visible sequence, with an ellipsis when truncated.
pub fn format_visible(visible: &[Card]) -> String {
    if visible.len() <= VIEW_WIDTH {
        return format_sequence(visible);
    }
    let hidden = visible.len() - VIEW_WIDTH;
    format!("(+{}) {}", hidden, format_sequence(&visible[hidden..]))
}

/// One status line for the play view.
pub fn format_round_status(round: &Round) -> String {
    let mut line = format!(
        "Deck: {:>2}  Visible: {:>2}  {}",
        round.deck_count(),
        round.visible().len(),
        format_visible(round.visible())
    );
    if round.is_recycling() {
        line.push_str("  (recycling)");
    }
    if let Some(rule) = round.pending_rule() {
        line.push_str(&format!("  match: {}", rule.label()));
    }
    line
}

pub fn format_outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Drew(card) => format!("drew {}", format_card(card)),
        ActionOutcome::Recycled(card) => format!("recycled {}", format_card(card)),
        ActionOutcome::Discarded(result) => {
            let mut s = format!(
                "discarded {} ({})",
                format_sequence(&result.cards),
                result.rule.label()
            );
            if result.cleared {
                s.push_str(" - cleared!");
            }
            s
        }
        ActionOutcome::Undone => "undone".to_string(),
        ActionOutcome::Finished { won, score } => {
            format!("round over: {} score={}", if *won { "won" } else { "lost" }, score)
        }
        ActionOutcome::Ignored => "nothing to do".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartet_engine::cards::{parse_cards, Rank};

    #[test]
    fn empty_sequence() {
        assert_eq!(format_sequence(&[]), "[]");
    }

    #[test]
    fn ten_keeps_two_digits() {
        let card = Card::new(Suit::Hearts, Rank::Ten);
        assert!(format_card(&card).starts_with("10"));
    }

    #[test]
    fn long_sequences_are_truncated() {
        let cards = parse_cards("AH 2H 3H 4H 5H 6H 7H 8H 9H 10H").unwrap();
        let s = format_visible(&cards);
        assert!(s.starts_with("(+2) [3"), "{}", s);
    }

    #[test]
    fn finished_outcome_mentions_score() {
        let s = format_outcome(&ActionOutcome::Finished { won: true, score: -10 });
        assert_eq!(s, "round over: won score=-10");
    }
}
