//! Synthetic opponent scores and standings.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rival::Rival;
use crate::tier::{DifficultyCurve, Tier};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingEntry {
    pub name: String,
    pub score: i32,
    /// `None` for the player's own entry
    pub rival_id: Option<u32>,
    pub is_player: bool,
    pub won: bool,
}

/// Sorted field for one simulated round. Lower scores rank higher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub tier: Tier,
    pub entries: Vec<StandingEntry>,
    /// 1-based position of the player's entry
    pub placement: usize,
}

impl Standings {
    pub fn total_players(&self) -> usize {
        self.entries.len()
    }

    pub fn player_entry(&self) -> Option<&StandingEntry> {
        self.entries.iter().find(|e| e.is_player)
    }
}

/// Draws one synthetic score for `rival` from `curve`.
pub fn rival_score<R: Rng + ?Sized>(curve: &DifficultyCurve, rival: &Rival, rng: &mut R) -> i32 {
    let spread = curve.spread();
    let skew = 1.0 - curve.bias;
    let mean = curve.range_min + spread * (0.4 + skew * (rival.seed_factor() - 0.5));
    let variance = (spread * skew * 0.45).max(1.0);
    let jitter: f64 = rng.random_range(-1.0..=1.0);
    (mean + jitter * variance).round() as i32
}

/// Fills the tier's field from `pool` (placeholders when short), adds the
/// player and ranks everyone. Ties are broken by name.
///
/// ```
/// use quartet_career::rival::Rival;
/// use quartet_career::simulation::simulate_round;
/// use quartet_career::tier::Tier;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha20Rng;
///
/// let pool = vec![Rival::new(1, "Ada", 42)];
/// let mut rng = ChaCha20Rng::seed_from_u64(7);
/// let standings = simulate_round(Tier::Local, &pool, "You", -20, true, &mut rng);
/// assert_eq!(standings.total_players(), Tier::Local.player_count());
/// assert_eq!(standings.placement, 1);
/// ```
pub fn simulate_round<R: Rng + ?Sized>(
    tier: Tier,
    pool: &[Rival],
    player_name: &str,
    player_score: i32,
    player_won: bool,
    rng: &mut R,
) -> Standings {
    let curve = tier.curve();
    let slots = tier.player_count().saturating_sub(1);
    let mut entries = Vec::with_capacity(slots + 1);
    for slot in 0..slots {
        let rival = match pool.get(slot) {
            Some(r) => r.clone(),
            None => Rival::placeholder(slot),
        };
        let score = rival_score(&curve, &rival, rng);
        entries.push(StandingEntry {
            name: rival.display_name,
            score,
            rival_id: Some(rival.id),
            is_player: false,
            won: false,
        });
    }
    entries.push(StandingEntry {
        name: player_name.to_string(),
        score: player_score,
        rival_id: None,
        is_player: true,
        won: player_won,
    });
    entries.sort_by(|a, b| a.score.cmp(&b.score).then_with(|| a.name.cmp(&b.name)));
    let placement = entries
        .iter()
        .position(|e| e.is_player)
        .map(|i| i + 1)
        .unwrap_or(entries.len());
    tracing::debug!(%tier, placement, players = entries.len(), "simulated standings");
    Standings {
        tier,
        entries,
        placement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn rival_scores_stay_near_the_curve() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        for tier in Tier::ALL {
            let curve = tier.curve();
            for seed in 0..100u64 {
                let rival = Rival::new(1, "x", seed);
                let s = rival_score(&curve, &rival, &mut rng) as f64;
                let slack = (curve.spread() * (1.0 - curve.bias) * 0.45).max(1.0) + 1.0;
                assert!(s >= curve.range_min - curve.spread() * 0.5 - slack);
                assert!(s <= curve.range_max + slack);
            }
        }
    }

    #[test]
    fn ties_break_by_name() {
        let pool: Vec<Rival> = Vec::new();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let standings = simulate_round(Tier::Local, &pool, "AAA", 1_000, false, &mut rng);
        assert_eq!(standings.placement, standings.total_players());
        let names: Vec<&str> = standings.entries.iter().map(|e| e.name.as_str()).collect();
        for pair in standings.entries.windows(2) {
            assert!(pair[0].score <= pair[1].score);
            if pair[0].score == pair[1].score {
                assert!(pair[0].name <= pair[1].name, "{:?}", names);
            }
        }
    }

    #[test]
    fn short_pool_is_padded_with_placeholders() {
        let pool = vec![Rival::new(1, "Ada", 10), Rival::new(2, "Bram", 20)];
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let standings = simulate_round(Tier::Global, &pool, "You", 0, false, &mut rng);
        assert_eq!(standings.total_players(), 16);
        assert!(standings.entries.iter().any(|e| e.name == "Rival 15"));
        assert!(standings.entries.iter().any(|e| e.name == "Bram"));
        assert_eq!(standings.entries.iter().filter(|e| e.is_player).count(), 1);
    }
}
