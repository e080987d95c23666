use quartet_engine::cards::{full_deck, Card};
use quartet_engine::round::{transition, Action, ActionOutcome, Phase, Round};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

fn all_cards(round: &Round) -> HashSet<Card> {
    round
        .deck()
        .cards()
        .iter()
        .chain(round.visible())
        .chain(round.discard_pile())
        .copied()
        .collect()
}

fn random_action(rng: &mut ChaCha20Rng) -> Action {
    match rng.random_range(0..10) {
        0..=4 => Action::Draw,
        5..=7 => Action::Discard,
        8 => Action::Undo,
        _ => Action::Draw,
    }
}

#[test]
fn new_game_deals_four_and_is_active() {
    let round = Round::start(Some(1), 1.0);
    assert_eq!(round.visible().len(), 4);
    assert_eq!(round.deck_count(), 48);
    assert!(round.discard_pile().is_empty());
    assert_eq!(round.phase(), Phase::Active);
    assert_eq!(round.undo_depth(), 0);
    assert_eq!(round.seed(), Some(1));
}

#[test]
fn fresh_round_has_not_been_dealt() {
    let round = Round::new();
    assert_eq!(round.phase(), Phase::Dealing);
}

#[test]
fn card_count_invariant_holds_for_random_play() {
    let want: HashSet<Card> = full_deck().into_iter().collect();
    for seed in 0..40u64 {
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let mut round = Round::start(Some(seed), 1.0 + (seed % 6) as f64 * 0.05);
        for _ in 0..400 {
            round.apply(random_action(&mut rng));
            assert_eq!(round.total_cards(), 52, "seed {}", seed);
            if round.is_over() {
                break;
            }
        }
        assert_eq!(all_cards(&round), want, "seed {}", seed);
    }
}

#[test]
fn undo_restores_previous_state_exactly() {
    let mut rng = ChaCha20Rng::seed_from_u64(77);
    let mut round = Round::start(Some(77), 1.0);
    for _ in 0..150 {
        if round.is_over() {
            break;
        }
        let before = round.snapshot();
        let action = if round.can_discard() {
            Action::Discard
        } else {
            Action::Draw
        };
        let outcome = round.apply(action);
        if round.is_over() {
            break;
        }
        if outcome != ActionOutcome::Ignored {
            let (undone, out) = transition(&round, Action::Undo);
            assert_eq!(out, ActionOutcome::Undone);
            let restored = undone.snapshot();
            assert_eq!(restored.deck, before.deck);
            assert_eq!(restored.visible, before.visible);
            assert_eq!(restored.discard_pile, before.discard_pile);
        }
        if rng.random_bool(0.1) {
            round.apply(Action::Undo);
        }
    }
}

#[test]
fn undo_with_empty_history_is_a_no_op() {
    let mut round = Round::start(Some(3), 1.0);
    assert!(!round.undo());
    assert_eq!(round.undos_used(), 0);
}

#[test]
fn draws_empty_the_deck_then_recycle() {
    let mut round = Round::start(Some(11), 1.0);
    for _ in 0..48 {
        assert!(matches!(round.draw_card(), ActionOutcome::Drew(_)));
    }
    assert_eq!(round.deck_count(), 0);
    assert_eq!(round.visible().len(), 52);
    let front = round.visible()[0];
    assert_eq!(round.draw_card(), ActionOutcome::Recycled(front));
    assert_eq!(*round.visible().last().unwrap(), front);
    assert!(round.is_recycling());
}

#[test]
fn same_seed_and_moves_give_same_result() {
    fn play(seed: u64) -> (i32, bool, Vec<Card>) {
        let mut round = Round::start(Some(seed), 1.1);
        while !round.is_over() {
            if round.can_discard() {
                round.apply(Action::Discard);
            } else if round.is_stalled() {
                round.apply(Action::End);
            } else {
                round.apply(Action::Draw);
            }
        }
        (round.calculate_score(), round.is_won(), round.visible().to_vec())
    }
    assert_eq!(play(2024), play(2024));
}

#[test]
fn greedy_play_always_terminates_with_consistent_score() {
    for seed in 0..25u64 {
        let mut round = Round::start(Some(seed), 1.0);
        let mut steps = 0;
        while !round.is_over() {
            steps += 1;
            assert!(steps < 10_000, "seed {} did not terminate", seed);
            if round.can_discard() {
                round.apply(Action::Discard);
            } else if round.is_stalled() {
                round.apply(Action::End);
            } else {
                round.apply(Action::Draw);
            }
        }
        let remaining = (round.visible().len() + round.deck_count()) as i32;
        let win = if round.is_won() { 10 } else { 0 };
        assert_eq!(
            round.calculate_score(),
            remaining - 2 * round.clear_count() as i32 - win
        );
        assert_eq!(round.is_won(), round.visible().is_empty());
    }
}

#[test]
fn restart_replaces_previous_round_wholesale() {
    let mut round = Round::start(Some(8), 1.0);
    round.draw_card();
    round.end_game();
    round.start_new_game(Some(8), 1.0);
    assert!(!round.is_over());
    assert_eq!(round.visible().len(), 4);
    assert_eq!(round.undo_depth(), 0);
    assert_eq!(round.undos_used(), 0);
    assert_eq!(round.clear_count(), 0);
}
