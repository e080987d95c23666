use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::GameError;

/// Represents one of the four suits in a standard 52-card deck.
/// Used as a component of [`Card`] to fully define a playing card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Suit {
    /// Hearts suit (♥)
    Hearts,
    /// Diamonds suit (♦)
    Diamonds,
    /// Clubs suit (♣)
    Clubs,
    /// Spades suit (♠)
    Spades,
}

impl Suit {
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
            Suit::Spades => '♠',
        }
    }

    pub fn letter(self) -> char {
        match self {
            Suit::Hearts => 'H',
            Suit::Diamonds => 'D',
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
        }
    }
}

/// Represents the rank of a card. Aces are low: the numeric value runs 1..=13.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Rank {
    /// Ace (1)
    Ace = 1,
    /// Rank 2
    Two,
    /// Rank 3
    Three,
    /// Rank 4
    Four,
    /// Rank 5
    Five,
    /// Rank 6
    Six,
    /// Rank 7
    Seven,
    /// Rank 8
    Eight,
    /// Rank 9
    Nine,
    /// Rank 10
    Ten,
    /// Jack (11)
    Jack,
    /// Queen (12)
    Queen,
    /// King (13)
    King,
}

impl Rank {
    /// Converts a numeric rank in `1..=13` into a [`Rank`].
    pub fn from_u8(v: u8) -> Option<Rank> {
        all_ranks().get(usize::from(v).checked_sub(1)?).copied()
    }

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A single playing card. Cards are plain values: two cards with the same
/// suit and rank compare equal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Card {
    /// The suit of the card
    pub suit: Suit,
    /// The rank of the card (Ace through King)
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    pub fn shares_suit(&self, other: &Card) -> bool {
        self.suit == other.suit
    }

    pub fn shares_rank(&self, other: &Card) -> bool {
        self.rank == other.rank
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}

/// Parses `<rank><suit>` such as `AH`, `10s`, `Q♣` or `7♦`.
///
/// ```
/// use quartet_engine::cards::{Card, Rank, Suit};
///
/// let card: Card = "10S".parse().unwrap();
/// assert_eq!(card, Card::new(Suit::Spades, Rank::Ten));
/// assert_eq!("Q♣".parse::<Card>().unwrap().rank, Rank::Queen);
/// assert!("1X".parse::<Card>().is_err());
/// ```
impl FromStr for Card {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || GameError::InvalidCard(s.to_string());
        let suit_char = s.chars().last().ok_or_else(invalid)?;
        let rank_part = &s[..s.len() - suit_char.len_utf8()];
        let suit = match suit_char.to_ascii_uppercase() {
            'H' | '♥' => Suit::Hearts,
            'D' | '♦' => Suit::Diamonds,
            'C' | '♣' => Suit::Clubs,
            'S' | '♠' => Suit::Spades,
            _ => return Err(invalid()),
        };
        let rank = match rank_part.to_ascii_uppercase().as_str() {
            "A" | "1" => Rank::Ace,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "T" => Rank::Ten,
            other => other
                .parse::<u8>()
                .ok()
                .and_then(Rank::from_u8)
                .ok_or_else(invalid)?,
        };
        Ok(Card::new(suit, rank))
    }
}

/// Parses a whitespace or comma separated list of cards.
pub fn parse_cards(s: &str) -> Result<Vec<Card>, GameError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

pub fn all_suits() -> [Suit; 4] {
    [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades]
}

pub fn all_ranks() -> [Rank; 13] {
    [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ]
}

/// All 52 cards in canonical order: suit by suit, Ace up to King.
pub fn full_deck() -> Vec<Card> {
    let mut v = Vec::with_capacity(52);
    for &s in &all_suits() {
        for &r in &all_ranks() {
            v.push(Card { suit: s, rank: r });
        }
    }
    v
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_round_trips_through_numeric_value() {
        for r in all_ranks() {
            assert_eq!(Rank::from_u8(r.value()), Some(r));
        }
        assert_eq!(Rank::from_u8(0), None);
        assert_eq!(Rank::from_u8(14), None);
    }

    #[test]
    fn display_uses_suit_symbols() {
        assert_eq!(Card::new(Suit::Hearts, Rank::Four).to_string(), "4♥");
        assert_eq!(Card::new(Suit::Spades, Rank::Ten).to_string(), "10♠");
    }

    #[test]
    fn parse_cards_accepts_mixed_separators() {
        let cards = parse_cards("2C, 5d 9♦,2D").unwrap();
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0], Card::new(Suit::Clubs, Rank::Two));
        assert_eq!(cards[2], Card::new(Suit::Diamonds, Rank::Nine));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("".parse::<Card>().is_err());
        assert!("ZZ".parse::<Card>().is_err());
        assert!("14H".parse::<Card>().is_err());
    }

    #[test]
    fn canonical_order_starts_with_hearts_ace() {
        let deck = full_deck();
        assert_eq!(deck[0], Card::new(Suit::Hearts, Rank::Ace));
        assert_eq!(deck[12], Card::new(Suit::Hearts, Rank::King));
        assert_eq!(deck[51], Card::new(Suit::Spades, Rank::King));
    }
}
