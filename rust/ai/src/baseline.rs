//! Baseline policies.
//!
//! [`BaselinePlayer`] discards whenever a rule matches, ends the round once
//! it is stalled and draws otherwise. [`LookaheadPlayer`] compares discarding
//! with drawing past a match by playing both lines out greedily.

use crate::Autoplayer;
use quartet_engine::round::{transition, Action, Round};

/// Greedy reference policy.
///
/// ```rust
/// use quartet_ai::baseline::BaselinePlayer;
/// use quartet_ai::Autoplayer;
/// use quartet_engine::round::{Action, Round};
///
/// let ai = BaselinePlayer::new();
/// let round = Round::start(Some(1), 1.0);
/// let action = ai.choose(&round);
/// assert!(matches!(action, Action::Draw | Action::Discard));
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselinePlayer;

impl BaselinePlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Autoplayer for BaselinePlayer {
    fn choose(&self, round: &Round) -> Action {
        greedy_action(round)
    }

    fn name(&self) -> &str {
        "BaselinePlayer"
    }
}

fn greedy_action(round: &Round) -> Action {
    if round.can_discard() {
        Action::Discard
    } else if round.is_stalled() {
        Action::End
    } else {
        Action::Draw
    }
}

/// Final score of a greedy playout from `round`.
fn greedy_rollout(mut round: Round, budget: usize) -> i32 {
    let mut steps = 0;
    while !round.is_over() && steps < budget {
        let action = greedy_action(&round);
        round.apply(action);
        steps += 1;
    }
    if !round.is_over() {
        round.apply(Action::End);
    }
    round.calculate_score()
}

/// One-step lookahead over greedy rollouts.
///
/// Only differs from the baseline when a discard is available: it also tries
/// drawing past the match and keeps whichever line scores lower.
#[derive(Debug, Clone)]
pub struct LookaheadPlayer {
    rollout_budget: usize,
}

impl Default for LookaheadPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl LookaheadPlayer {
    pub fn new() -> Self {
        Self {
            rollout_budget: 2_000,
        }
    }

    pub fn with_rollout_budget(rollout_budget: usize) -> Self {
        Self { rollout_budget }
    }
}

impl Autoplayer for LookaheadPlayer {
    fn choose(&self, round: &Round) -> Action {
        if !round.can_discard() {
            return greedy_action(round);
        }
        let (after_discard, _) = transition(round, Action::Discard);
        let (after_draw, _) = transition(round, Action::Draw);
        let discard_score = greedy_rollout(after_discard, self.rollout_budget);
        let draw_score = greedy_rollout(after_draw, self.rollout_budget);
        // ties go to the discard
        if draw_score < discard_score {
            Action::Draw
        } else {
            Action::Discard
        }
    }

    fn name(&self) -> &str {
        "LookaheadPlayer"
    }
}
