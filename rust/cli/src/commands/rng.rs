//! `rng`: prints ChaCha20 samples so a seed's determinism can be checked by eye.

use crate::error::CliError;
use rand::{RngCore, SeedableRng};
use std::io::Write;

pub fn handle_rng_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let s = seed.unwrap_or_else(rand::random);
    let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(s);
    let vals: Vec<u64> = (0..5).map(|_| rng.next_u64()).collect();
    writeln!(out, "RNG seed: {}", s)?;
    writeln!(out, "RNG sample: {:?}", vals)?;
    Ok(())
}
