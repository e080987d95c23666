//! `deal`: shows a shuffled deck in the order cards will be drawn.

use crate::error::CliError;
use crate::formatters::format_sequence;
use crate::ui;
use crate::validation::validate_luck;
use quartet_engine::deck::Deck;
use std::io::Write;

/// Cards per printed row.
const ROW: usize = 13;

pub fn handle_deal_command(
    seed: Option<u64>,
    luck: f64,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let (luck, clamped) = validate_luck(luck).map_err(|e| {
        let _ = ui::write_error(err, &e);
        CliError::InvalidInput(e)
    })?;
    if clamped {
        ui::display_warning(err, &format!("luckiness {} is clamped to 1.0..=1.25", luck))?;
    }
    let seed = seed.unwrap_or_else(rand::random);
    let mut deck = Deck::new();
    deck.reset(Some(seed), luck);

    writeln!(out, "Seed: {} Luck: {}", seed, luck)?;
    let mut order: Vec<_> = deck.cards().to_vec();
    order.reverse();
    for (i, row) in order.chunks(ROW).enumerate() {
        writeln!(out, "{:>2}: {}", i * ROW + 1, format_sequence(row))?;
    }
    Ok(())
}
