use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Luckiness values are clamped into this range before biasing.
pub const MIN_LUCKINESS: f64 = 1.0;
pub const MAX_LUCKINESS: f64 = 1.25;

/// Face-down draw pile. The last element is the "bottom" card and is drawn first.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

impl Deck {
    /// Creates a deck in canonical order. Call [`Deck::reset`] to shuffle.
    pub fn new() -> Self {
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(0),
        }
    }

    /// Rebuilds the canonical 52 cards, shuffles, then applies the luck bias.
    ///
    /// The same `seed` and `luckiness` always produce the same order.
    ///
    /// ```
    /// use quartet_engine::deck::Deck;
    ///
    /// let mut a = Deck::new();
    /// let mut b = Deck::new();
    /// a.reset(Some(7), 1.1);
    /// b.reset(Some(7), 1.1);
    /// assert_eq!(a.cards(), b.cards());
    /// ```
    pub fn reset(&mut self, seed: Option<u64>, luckiness: f64) {
        let seed = seed.unwrap_or_else(rand::random);
        self.rng = ChaCha20Rng::seed_from_u64(seed);
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
        if luckiness > MIN_LUCKINESS {
            self.apply_bias(luckiness);
        }
    }

    fn apply_bias(&mut self, luckiness: f64) {
        let ops = bias_operations(luckiness);
        let offset = bias_offset(luckiness);
        for _ in 0..ops {
            if self.cards.len() < 2 {
                return;
            }
            let picked = self.rng.random_range(0..self.cards.len());
            let Some(found) = find_partner(&self.cards, picked) else {
                continue;
            };
            let card = self.cards.remove(found);
            self.cards.insert(found.saturating_sub(offset), card);
        }
    }

    /// Removes and returns the bottom (last) card.
    pub fn draw_from_bottom(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub(crate) fn replace_cards(&mut self, cards: Vec<Card>) {
        self.cards = cards;
    }
}

/// Number of relocation passes the bias performs for a luckiness value.
///
/// Non-decreasing in `luckiness`: 2 at or below 1.0, 7 at the 1.25 cap.
pub fn bias_operations(luckiness: f64) -> usize {
    let clamped = clamp_luckiness(luckiness);
    2 + ((clamped - MIN_LUCKINESS) * 20.0).floor() as usize
}

/// How many slots earlier a matched card is moved.
pub fn bias_offset(luckiness: f64) -> usize {
    let clamped = clamp_luckiness(luckiness);
    1 + ((clamped - MIN_LUCKINESS) * 4.0).floor() as usize
}

pub fn clamp_luckiness(luckiness: f64) -> f64 {
    if luckiness.is_nan() {
        return MIN_LUCKINESS;
    }
    luckiness.clamp(MIN_LUCKINESS, MAX_LUCKINESS)
}

/// Rejects non-finite luckiness values supplied from outside the engine.
pub fn validate_luckiness(luckiness: f64) -> Result<f64, GameError> {
    if luckiness.is_finite() {
        Ok(luckiness)
    } else {
        Err(GameError::InvalidLuckiness(luckiness.to_string()))
    }
}

// First card other than `picked` sharing the suit, else the first sharing the rank.
fn find_partner(cards: &[Card], picked: usize) -> Option<usize> {
    let target = cards[picked];
    let others = || (0..cards.len()).filter(move |&i| i != picked);
    others()
        .find(|&i| cards[i].shares_suit(&target))
        .or_else(|| others().find(|&i| cards[i].shares_rank(&target)))
}
