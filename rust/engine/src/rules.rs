use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// The discard rules, in precedence order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DiscardRule {
    /// All four cards share a suit: all four go.
    SameSuit,
    /// Oldest and newest of the four share a rank: all four go.
    MatchingEnds,
    /// Oldest and newest share a suit: only the middle two go.
    MatchingSuitEnds,
}

impl DiscardRule {
    /// Offsets within the top four (0 = oldest) removed by this rule.
    pub fn removed_offsets(self) -> &'static [usize] {
        match self {
            DiscardRule::SameSuit | DiscardRule::MatchingEnds => &[0, 1, 2, 3],
            DiscardRule::MatchingSuitEnds => &[1, 2],
        }
    }

    pub fn removed_count(self) -> usize {
        self.removed_offsets().len()
    }

    pub fn label(self) -> &'static str {
        match self {
            DiscardRule::SameSuit => "same suit",
            DiscardRule::MatchingEnds => "matching ends",
            DiscardRule::MatchingSuitEnds => "matching suit ends",
        }
    }
}

/// Evaluates the four most recent cards of a visible sequence.
///
/// `visible` is ordered oldest to newest; only its last four cards are read.
/// Returns `None` when fewer than four cards are present or nothing matches.
///
/// # Examples
///
/// ```
/// use quartet_engine::cards::parse_cards;
/// use quartet_engine::rules::{evaluate_top_four, DiscardRule};
///
/// let seq = parse_cards("3S 7S 7S 9S").unwrap();
/// assert_eq!(evaluate_top_four(&seq), Some(DiscardRule::SameSuit));
///
/// let seq = parse_cards("2C 5D 9D 2D").unwrap();
/// assert_eq!(evaluate_top_four(&seq), Some(DiscardRule::MatchingEnds));
///
/// let seq = parse_cards("4H 8C 2D 4H").unwrap();
/// assert_eq!(evaluate_top_four(&seq), Some(DiscardRule::MatchingEnds));
///
/// let seq = parse_cards("2C 5D 9D 3H").unwrap();
/// assert_eq!(evaluate_top_four(&seq), None);
/// ```
pub fn evaluate_top_four(visible: &[Card]) -> Option<DiscardRule> {
    let top = top_four(visible)?;
    let [c1, c2, c3, c4] = top;
    if [c2, c3, c4].iter().all(|c| c.suit == c1.suit) {
        Some(DiscardRule::SameSuit)
    } else if c1.rank == c4.rank {
        Some(DiscardRule::MatchingEnds)
    } else if c1.suit == c4.suit {
        Some(DiscardRule::MatchingSuitEnds)
    } else {
        None
    }
}

/// The last four cards, oldest first.
pub fn top_four(visible: &[Card]) -> Option<[Card; 4]> {
    let start = visible.len().checked_sub(4)?;
    visible[start..].try_into().ok()
}
