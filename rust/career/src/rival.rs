use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Number of rivals generated for a new career.
pub const INITIAL_RIVALS: usize = 15;
/// A stored pool smaller than this is replaced rather than reused.
pub const MIN_STORED_RIVALS: usize = 8;

/// A synthetic competitor. The seed shapes where its scores land.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rival {
    pub id: u32,
    pub display_name: String,
    pub seed: u64,
}

impl Rival {
    pub fn new(id: u32, display_name: impl Into<String>, seed: u64) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            seed,
        }
    }

    /// Stand-in used when the pool has fewer rivals than a tier needs.
    pub fn placeholder(slot: usize) -> Self {
        let n = slot as u64 + 1;
        Self {
            id: 10_000 + slot as u32,
            display_name: format!("Rival {}", n),
            seed: n.wrapping_mul(7_919).wrapping_add(13),
        }
    }

    pub fn seed_factor(&self) -> f64 {
        (self.seed % 100) as f64 / 100.0
    }
}

const DEFAULT_NAMES: &[&str] = &[
    "Alex Mercer", "Samira Nadeem", "Jonas Reed", "Priya Patel", "Leo Carter",
    "Maya Ortega", "Ethan Blake", "Zara Noor", "Oliver Finch", "Nora Quinn",
    "Hugo Park", "Ivy Sato", "Caleb Stone", "Lena Russo", "Mateo Cruz",
    "Riley Brooks", "Sofia Lane", "Marcus Vale", "Tess Harper", "Owen Price",
    "Ava Morgan", "Noah Briggs", "Mila Rivers", "Kai Fisher", "Amir Khan",
    "Elena Voss", "Theo Lang", "Grace Holloway", "Ian Murphy", "Chloe Bennett",
];

/// Name source for rival generation. Passed in rather than shared globally.
#[derive(Debug, Clone)]
pub struct RivalBank {
    names: Vec<String>,
}

impl Default for RivalBank {
    fn default() -> Self {
        Self::new(DEFAULT_NAMES.iter().map(|s| s.to_string()))
    }
}

impl RivalBank {
    pub fn new(names: impl IntoIterator<Item = String>) -> Self {
        Self {
            names: names.into_iter().collect(),
        }
    }

    /// Up to `count` rivals with distinct names and random seeds.
    pub fn generate<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<Rival> {
        let mut names = self.names.clone();
        names.sort();
        names.dedup();
        names.shuffle(rng);
        names
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(i, name)| Rival::new(i as u32 + 1, name, rng.random()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::collections::HashSet;

    #[test]
    fn generates_distinct_names() {
        let bank = RivalBank::new(["A", "B", "A", "C"].iter().map(|s| s.to_string()));
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let rivals = bank.generate(INITIAL_RIVALS, &mut rng);
        assert_eq!(rivals.len(), 3);
        let names: HashSet<_> = rivals.iter().map(|r| r.display_name.clone()).collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn default_bank_fills_initial_pool() {
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let rivals = RivalBank::default().generate(INITIAL_RIVALS, &mut rng);
        assert_eq!(rivals.len(), INITIAL_RIVALS);
        let ids: HashSet<_> = rivals.iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), INITIAL_RIVALS);
        assert_eq!(DEFAULT_NAMES.len(), 30);
        assert!(rivals.iter().all(|r| DEFAULT_NAMES.contains(&r.display_name.as_str())));
    }

    #[test]
    fn placeholders_are_stable() {
        assert_eq!(Rival::placeholder(3), Rival::placeholder(3));
        assert_eq!(Rival::placeholder(0).display_name, "Rival 1");
    }
}
