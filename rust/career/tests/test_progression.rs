use quartet_career::error::CareerError;
use quartet_career::form::FormMeter;
use quartet_career::progression::{best_of_four, Career, RoundSummary};
use quartet_career::tier::Tier;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

#[test]
fn form_meter_stays_in_bounds_over_many_updates() {
    let mut rng = ChaCha20Rng::seed_from_u64(123);
    let mut meter = FormMeter::new(50);
    for _ in 0..5_000 {
        let total = rng.random_range(1..=48);
        let placement = rng.random_range(1..=total);
        meter.apply_change(placement, total, rng.random_bool(0.3));
        assert!(meter.value() <= 100);
        let luck = meter.luckiness();
        assert!((1.0..=1.15 + 1e-12).contains(&luck));
    }
}

#[test]
fn climbing_to_global_requires_each_tier() {
    let mut career = Career::default();
    for expected in [Tier::Provincial, Tier::National, Tier::Global] {
        assert!(!career.can_enter(expected));
        career.record_placement(1, career.tier.player_count(), true);
        assert_eq!(career.advance_tier_if_eligible(), Some(expected));
    }
    assert_eq!(career.highest_tier, Tier::Global);
    for tier in Tier::ALL {
        assert!(career.can_enter(tier));
    }
}

#[test]
fn dropping_down_keeps_qualifications() {
    let mut career = Career::default();
    career.record_placement(2, 16, false);
    career.advance_tier_if_eligible();
    career.enter(Tier::Local).unwrap();
    assert_eq!(career.tier, Tier::Local);
    assert!(career.can_enter(Tier::Provincial));
    career.enter(Tier::Provincial).unwrap();
    assert_eq!(career.enter(Tier::Global), Err(CareerError::TierLocked(Tier::Global)));
}

#[test]
fn best_of_four_uses_only_the_first_four_rounds() {
    let rounds = [
        RoundSummary { score: 9, won: false },
        RoundSummary { score: 3, won: false },
        RoundSummary { score: 12, won: false },
        RoundSummary { score: 6, won: false },
        RoundSummary { score: -20, won: true },
    ];
    let agg = best_of_four(&rounds).unwrap();
    assert_eq!(agg.counted, [3, 6, 9]);
    assert_eq!(agg.average, 6.0);
    assert_eq!(agg.wins, 0);
    assert_eq!(agg.ranking_score(), 6);
}

#[test]
fn best_of_four_with_no_rounds() {
    assert_eq!(
        best_of_four(&[]),
        Err(CareerError::InsufficientData {
            expected: 4,
            actual: 0
        })
    );
}
