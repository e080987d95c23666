use quartet_cli::run;
use quartet_engine::cards::Card;
use std::collections::HashSet;

fn run_ok(args: &[&str]) -> String {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let code = run(args.iter().copied(), &mut out, &mut err);
    assert_eq!(code, 0, "stderr={}", String::from_utf8_lossy(&err));
    String::from_utf8_lossy(&out).into_owned()
}

#[test]
fn deal_prints_every_card_once() {
    let out = run_ok(&["quartet", "deal", "--seed", "1"]);
    let mut seen = HashSet::new();
    for line in out.lines().skip(1) {
        let inner = line.split_once('[').map(|(_, r)| r.trim_end_matches(']')).unwrap();
        for tok in inner.split_whitespace() {
            let card: Card = tok.parse().unwrap();
            assert!(seen.insert(card), "duplicate {}", tok);
        }
    }
    assert_eq!(seen.len(), 52);
}

#[test]
fn deal_depends_on_luck() {
    let neutral = run_ok(&["quartet", "deal", "--seed", "9", "--luck", "1.0"]);
    let lucky = run_ok(&["quartet", "deal", "--seed", "9", "--luck", "1.25"]);
    let body = |s: &str| s.lines().skip(1).collect::<Vec<_>>().join("\n");
    assert_ne!(body(&neutral), body(&lucky));
}

#[test]
fn rng_prints_sample() {
    let out = run_ok(&["quartet", "rng", "--seed", "2"]);
    assert!(out.contains("RNG sample:"));
}

#[test]
fn auto_play_reaches_a_result() {
    let out = run_ok(&["quartet", "play", "--auto", "--seed", "77"]);
    assert!(out.contains("play: seed=77"));
    assert!(out.contains("Result:"));
}
