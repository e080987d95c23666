use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::rules::{evaluate_top_four, DiscardRule};

/// Cards dealt at the start of a round and after every clear.
pub const DEAL_SIZE: usize = 4;
/// Score bonus subtracted for a won round.
pub const WIN_BONUS: i32 = 10;
/// Score bonus subtracted per clear.
pub const CLEAR_BONUS: i32 = 2;

/// Observable lifecycle of a [`Round`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Initial four draws in progress (only seen by a never-started round)
    Dealing,
    /// Normal draw/discard loop
    Active,
    /// Deck exhausted; draws cycle the visible sequence
    Recycling,
    /// Terminal state
    GameOver { won: bool },
}

/// Inputs accepted by the round state machine.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    Draw,
    Discard,
    Undo,
    End,
}

/// What a single [`Action`] did.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// A card moved from the deck to the top of the visible sequence
    Drew(Card),
    /// The front card was cycled to the back
    Recycled(Card),
    /// Cards were discarded
    Discarded(DiscardResult),
    /// A snapshot was restored
    Undone,
    /// The round reached game over as a result of the action
    Finished { won: bool, score: i32 },
    /// Nothing changed (terminal round, no match, empty history, ...)
    Ignored,
}

/// Result of a successful discard, exposed for presentation layers.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DiscardResult {
    pub rule: DiscardRule,
    pub cards: Vec<Card>,
    /// True when the discard emptied the visible sequence
    pub cleared: bool,
}

/// Deep copy of the mutable card state, taken before every mutation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub deck: Vec<Card>,
    pub visible: Vec<Card>,
    pub discard_pile: Vec<Card>,
    pub clear_count: u32,
    pub recycling: bool,
}

/// One playthrough from a fresh shuffle to game over.
///
/// The round is total over its operations: anything inapplicable (a move after
/// game over, a discard without a match, an undo with no history) is a no-op.
///
/// # Examples
///
/// ```
/// use quartet_engine::round::{Phase, Round};
///
/// let mut round = Round::start(Some(42), 1.0);
/// assert_eq!(round.visible().len(), 4);
/// assert_eq!(round.deck_count(), 48);
/// assert_eq!(round.phase(), Phase::Active);
///
/// round.draw_card();
/// assert_eq!(round.visible().len(), 5);
/// assert!(round.undo());
/// assert_eq!(round.visible().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Round {
    deck: Deck,
    visible: Vec<Card>,
    discard_pile: Vec<Card>,
    recycling: bool,
    clear_count: u32,
    history: Vec<Snapshot>,
    undos_used: u32,
    draws: u32,
    recycles_since_discard: usize,
    is_over: bool,
    is_won: bool,
    started: bool,
    seed: Option<u64>,
    luckiness: f64,
    last_discard: Option<DiscardResult>,
}

impl Default for Round {
    fn default() -> Self {
        Self::new()
    }
}

impl Round {
    /// A round that has not been dealt yet. Use [`Round::start_new_game`].
    pub fn new() -> Self {
        Self {
            deck: Deck::new(),
            visible: Vec::with_capacity(52),
            discard_pile: Vec::with_capacity(52),
            recycling: false,
            clear_count: 0,
            history: Vec::new(),
            undos_used: 0,
            draws: 0,
            recycles_since_discard: 0,
            is_over: false,
            is_won: false,
            started: false,
            seed: None,
            luckiness: 1.0,
            last_discard: None,
        }
    }

    /// Convenience for `Round::new()` followed by `start_new_game`.
    pub fn start(seed: Option<u64>, luckiness: f64) -> Self {
        let mut round = Self::new();
        round.start_new_game(seed, luckiness);
        round
    }

    /// Reshuffles and deals four cards, discarding all prior state.
    pub fn start_new_game(&mut self, seed: Option<u64>, luckiness: f64) {
        self.deck.reset(seed, luckiness);
        self.visible.clear();
        self.discard_pile.clear();
        self.history.clear();
        self.recycling = false;
        self.clear_count = 0;
        self.undos_used = 0;
        self.draws = 0;
        self.recycles_since_discard = 0;
        self.is_over = false;
        self.is_won = false;
        self.seed = seed;
        self.luckiness = luckiness;
        self.last_discard = None;
        self.deal();
        self.started = true;
    }

    fn deal(&mut self) {
        for _ in 0..DEAL_SIZE {
            if let Some(card) = self.deck.draw_from_bottom() {
                self.visible.push(card);
                self.draws += 1;
            }
        }
    }

    /// Draws from the deck, or cycles the visible sequence once the deck is empty.
    pub fn draw_card(&mut self) -> ActionOutcome {
        if self.is_over {
            return ActionOutcome::Ignored;
        }
        self.push_snapshot();
        if let Some(outcome) = self.draw_or_recycle() {
            return outcome;
        }
        self.check_game_over()
            .unwrap_or(ActionOutcome::Ignored)
    }

    // One draw without a snapshot. `None` when the deck is empty and there
    // is nothing left to cycle.
    fn draw_or_recycle(&mut self) -> Option<ActionOutcome> {
        if let Some(card) = self.deck.draw_from_bottom() {
            self.visible.push(card);
            self.draws += 1;
            return Some(ActionOutcome::Drew(card));
        }
        self.recycling = true;
        if self.visible.len() > 1 {
            let card = self.visible.remove(0);
            self.visible.push(card);
            self.recycles_since_discard += 1;
            return Some(ActionOutcome::Recycled(card));
        }
        None
    }

    /// Applies the first matching discard rule to the top four cards.
    pub fn try_discard(&mut self) -> bool {
        if self.is_over {
            return false;
        }
        let Some(rule) = evaluate_top_four(&self.visible) else {
            return false;
        };
        self.push_snapshot();
        let base = self.visible.len() - DEAL_SIZE;
        let mut removed = Vec::with_capacity(rule.removed_count());
        for &offset in rule.removed_offsets().iter().rev() {
            removed.push(self.visible.remove(base + offset));
        }
        removed.reverse();
        self.discard_pile.extend_from_slice(&removed);
        self.recycles_since_discard = 0;

        let cleared = self.visible.is_empty();
        if cleared {
            self.clear_count += 1;
            tracing::debug!(clears = self.clear_count, "visible sequence cleared");
            // Four ordinary draws: a short deck spills into recycling.
            for _ in 0..DEAL_SIZE {
                self.draw_or_recycle();
            }
        }
        self.last_discard = Some(DiscardResult {
            rule,
            cards: removed,
            cleared,
        });
        self.check_game_over();
        true
    }

    /// Restores the most recent snapshot. Returns false when nothing was undone.
    pub fn undo(&mut self) -> bool {
        if self.is_over {
            return false;
        }
        let Some(snap) = self.history.pop() else {
            return false;
        };
        self.deck.replace_cards(snap.deck);
        self.visible = snap.visible;
        self.discard_pile = snap.discard_pile;
        self.clear_count = snap.clear_count;
        self.recycling = snap.recycling;
        self.recycles_since_discard = 0;
        self.last_discard = None;
        self.undos_used += 1;
        true
    }

    /// Forces the round to its terminal state. Won only if nothing is visible.
    pub fn end_game(&mut self) -> ActionOutcome {
        if self.is_over {
            return ActionOutcome::Ignored;
        }
        self.finish(self.visible.is_empty())
    }

    fn finish(&mut self, won: bool) -> ActionOutcome {
        self.is_over = true;
        self.is_won = won;
        let score = self.calculate_score();
        tracing::debug!(won, score, clears = self.clear_count, "round over");
        ActionOutcome::Finished { won, score }
    }

    /// Ends the round when the deck is empty, recycling is impossible and
    /// nothing matches. Returns the outcome when the round just finished.
    pub fn check_game_over(&mut self) -> Option<ActionOutcome> {
        if self.is_over {
            return None;
        }
        let no_recycle = self.deck.is_empty() && self.visible.len() <= 1;
        if no_recycle && evaluate_top_four(&self.visible).is_none() {
            return Some(self.finish(self.visible.is_empty()));
        }
        None
    }

    /// `remaining − 2×clears − (10 if won)`. Lower is better.
    pub fn calculate_score(&self) -> i32 {
        let remaining = (self.visible.len() + self.deck.count()) as i32;
        let bonus = if self.is_won { WIN_BONUS } else { 0 };
        remaining - CLEAR_BONUS * self.clear_count as i32 - bonus
    }

    /// In-place form of [`transition`].
    pub fn apply(&mut self, action: Action) -> ActionOutcome {
        let was_over = self.is_over;
        let outcome = match action {
            Action::Draw => self.draw_card(),
            Action::Discard => {
                if self.try_discard() {
                    match self.last_discard.clone() {
                        Some(result) => ActionOutcome::Discarded(result),
                        None => ActionOutcome::Ignored,
                    }
                } else {
                    ActionOutcome::Ignored
                }
            }
            Action::Undo => {
                if self.undo() {
                    ActionOutcome::Undone
                } else {
                    ActionOutcome::Ignored
                }
            }
            Action::End => self.end_game(),
        };
        if !was_over && self.is_over {
            return ActionOutcome::Finished {
                won: self.is_won,
                score: self.calculate_score(),
            };
        }
        outcome
    }

    fn push_snapshot(&mut self) {
        self.history.push(self.snapshot());
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            deck: self.deck.cards().to_vec(),
            visible: self.visible.clone(),
            discard_pile: self.discard_pile.clone(),
            clear_count: self.clear_count,
            recycling: self.recycling,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_over {
            Phase::GameOver { won: self.is_won }
        } else if !self.started {
            Phase::Dealing
        } else if self.recycling {
            Phase::Recycling
        } else {
            Phase::Active
        }
    }

    /// The rule that would fire on the current top four, if any.
    pub fn pending_rule(&self) -> Option<DiscardRule> {
        if self.is_over {
            return None;
        }
        evaluate_top_four(&self.visible)
    }

    pub fn can_discard(&self) -> bool {
        self.pending_rule().is_some()
    }

    /// True when the deck is empty and no future draw can produce a match:
    /// fewer than four visible cards, or a full recycle cycle without a match.
    pub fn is_stalled(&self) -> bool {
        if self.is_over || !self.deck.is_empty() || self.can_discard() {
            return false;
        }
        self.visible.len() < DEAL_SIZE || self.recycles_since_discard >= self.visible.len()
    }

    pub fn visible(&self) -> &[Card] {
        &self.visible
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discard_pile
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn deck_count(&self) -> usize {
        self.deck.count()
    }

    /// Total cards across deck, visible sequence and discard pile. Always 52.
    pub fn total_cards(&self) -> usize {
        self.deck.count() + self.visible.len() + self.discard_pile.len()
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn is_won(&self) -> bool {
        self.is_won
    }

    pub fn is_recycling(&self) -> bool {
        self.recycling
    }

    pub fn clear_count(&self) -> u32 {
        self.clear_count
    }

    pub fn undos_used(&self) -> u32 {
        self.undos_used
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn recycles_since_discard(&self) -> usize {
        self.recycles_since_discard
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn luckiness(&self) -> f64 {
        self.luckiness
    }

    pub fn last_discard(&self) -> Option<&DiscardResult> {
        self.last_discard.as_ref()
    }

    #[doc(hidden)]
    pub fn with_cards_for_test(deck: Vec<Card>, visible: Vec<Card>, discard_pile: Vec<Card>) -> Self {
        let mut round = Self::new();
        round.deck.replace_cards(deck);
        round.visible = visible;
        round.discard_pile = discard_pile;
        round.recycling = round.deck.is_empty();
        round.started = true;
        round
    }
}

/// Pure transition: returns the next state and the outcome, leaving `round` untouched.
///
/// ```
/// use quartet_engine::round::{transition, Action, ActionOutcome, Round};
///
/// let round = Round::start(Some(3), 1.0);
/// let (next, outcome) = transition(&round, Action::Draw);
/// assert!(matches!(outcome, ActionOutcome::Drew(_)));
/// assert_eq!(round.visible().len(), 4);
/// assert_eq!(next.visible().len(), 5);
/// ```
pub fn transition(round: &Round, action: Action) -> (Round, ActionOutcome) {
    let mut next = round.clone();
    let outcome = next.apply(action);
    (next, outcome)
}
