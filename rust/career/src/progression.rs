//! Tier progression and best-of-4 aggregation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::CareerError;
use crate::form::FormMeter;
use crate::tier::Tier;

/// Placements at or above this qualify for the next tier.
pub const QUALIFYING_PLACEMENT: usize = 4;
/// Rounds in a best-of-4 session.
pub const AO3_ROUNDS: usize = 4;

/// Per-player career state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    pub tier: Tier,
    pub highest_tier: Tier,
    /// Tiers where the player has placed in the top four at least once
    pub qualified: BTreeSet<Tier>,
    pub last_placement: Option<usize>,
    pub form: FormMeter,
    pub rounds_played: u32,
}

impl Default for Career {
    fn default() -> Self {
        Self::new(FormMeter::default())
    }
}

impl Career {
    pub fn new(form: FormMeter) -> Self {
        Self {
            tier: Tier::Local,
            highest_tier: Tier::Local,
            qualified: BTreeSet::new(),
            last_placement: None,
            form,
            rounds_played: 0,
        }
    }

    /// Records a completed round in the current tier and updates form.
    /// Returns the requested form delta.
    pub fn record_placement(&mut self, placement: usize, total_players: usize, won: bool) -> i32 {
        self.last_placement = Some(placement);
        self.rounds_played += 1;
        if placement <= QUALIFYING_PLACEMENT {
            self.qualified.insert(self.tier);
        }
        self.form.apply_change(placement, total_players, won)
    }

    /// Moves up one tier when the last placement qualifies.
    pub fn advance_tier_if_eligible(&mut self) -> Option<Tier> {
        let placement = self.last_placement?;
        if placement > QUALIFYING_PLACEMENT {
            return None;
        }
        let next = self.tier.next()?;
        self.tier = next;
        self.highest_tier = self.highest_tier.max(next);
        tracing::info!(tier = %next, placement, "advanced tier");
        Some(next)
    }

    /// Local is always open; higher tiers need a top-four finish in the tier below.
    pub fn can_enter(&self, tier: Tier) -> bool {
        match tier.previous() {
            None => true,
            Some(prev) => self.highest_tier >= prev && self.qualified.contains(&prev),
        }
    }

    /// Switches to `tier` if the qualification gate allows it.
    pub fn enter(&mut self, tier: Tier) -> Result<(), CareerError> {
        if !self.can_enter(tier) {
            return Err(CareerError::TierLocked(tier));
        }
        self.tier = tier;
        self.highest_tier = self.highest_tier.max(tier);
        Ok(())
    }

    pub fn luckiness(&self) -> f64 {
        self.form.luckiness()
    }
}

/// Score and explicit win flag of one round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub score: i32,
    pub won: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ao3Aggregate {
    /// Mean of the best three scores
    pub average: f64,
    /// The three counted scores, best first
    pub counted: [i32; 3],
    pub dropped: i32,
    pub wins: usize,
}

impl Ao3Aggregate {
    /// Average rounded to an integer score for ranking.
    pub fn ranking_score(&self) -> i32 {
        self.average.round() as i32
    }
}

/// Averages the best three of the first four rounds and counts wins.
///
/// ```
/// use quartet_career::progression::{best_of_four, RoundSummary};
///
/// let rounds = [
///     RoundSummary { score: 6, won: false },
///     RoundSummary { score: -12, won: true },
///     RoundSummary { score: 20, won: false },
///     RoundSummary { score: 0, won: false },
/// ];
/// let agg = best_of_four(&rounds).unwrap();
/// assert_eq!(agg.counted, [-12, 0, 6]);
/// assert_eq!(agg.dropped, 20);
/// assert_eq!(agg.average, -2.0);
/// assert_eq!(agg.wins, 1);
/// ```
pub fn best_of_four(rounds: &[RoundSummary]) -> Result<Ao3Aggregate, CareerError> {
    if rounds.len() < AO3_ROUNDS {
        return Err(CareerError::InsufficientData {
            expected: AO3_ROUNDS,
            actual: rounds.len(),
        });
    }
    let session = &rounds[..AO3_ROUNDS];
    let mut scores: Vec<i32> = session.iter().map(|r| r.score).collect();
    scores.sort_unstable();
    let counted = [scores[0], scores[1], scores[2]];
    let average = counted.iter().map(|&s| f64::from(s)).sum::<f64>() / 3.0;
    Ok(Ao3Aggregate {
        average,
        counted,
        dropped: scores[3],
        wins: session.iter().filter(|r| r.won).count(),
    })
}
