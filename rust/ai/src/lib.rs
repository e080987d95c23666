//! # quartet-ai: Automated Players
//!
//! Policies that drive a [`Round`] without a human at the keyboard. Used by
//! the simulation and career commands to produce scores in bulk.
//!
//! ## Core Components
//!
//! - [`Autoplayer`] - Trait defining the interface for move selection
//! - [`baseline`] - Greedy and lookahead policies
//! - [`create_player`] - Factory function for creating players by name
//! - [`play_to_completion`] - Runs a round until it is over
//!
//! ## Quick Start
//!
//! ```rust
//! use quartet_ai::{create_player, play_to_completion};
//! use quartet_engine::round::Round;
//!
//! let player = create_player("baseline").unwrap();
//! let mut round = Round::start(Some(42), 1.0);
//! let steps = play_to_completion(&mut round, player.as_ref(), 10_000);
//! assert!(round.is_over());
//! assert!(steps > 0);
//! ```

use quartet_engine::round::{Action, Round};
use thiserror::Error;

pub mod baseline;

/// Names accepted by [`create_player`].
pub const PLAYER_NAMES: &[&str] = &["baseline", "lookahead"];

/// Trait defining the interface for automated players.
///
/// # Example Implementation
///
/// ```rust
/// use quartet_ai::Autoplayer;
/// use quartet_engine::round::{Action, Round};
///
/// struct AlwaysDraw;
///
/// impl Autoplayer for AlwaysDraw {
///     fn choose(&self, round: &Round) -> Action {
///         if round.is_stalled() { Action::End } else { Action::Draw }
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysDraw"
///     }
/// }
/// ```
pub trait Autoplayer: Send + Sync {
    /// Pick the next action for a round that is not over.
    fn choose(&self, round: &Round) -> Action;

    /// Return the name/identifier of this player.
    fn name(&self) -> &str;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown player type: {0} (expected one of: baseline, lookahead)")]
    UnknownPlayer(String),
}

/// Factory function to create players by type string.
///
/// ```rust
/// use quartet_ai::create_player;
///
/// assert_eq!(create_player("baseline").unwrap().name(), "BaselinePlayer");
/// assert!(create_player("oracle").is_err());
/// ```
pub fn create_player(kind: &str) -> Result<Box<dyn Autoplayer>, AiError> {
    match kind.trim().to_ascii_lowercase().as_str() {
        "baseline" => Ok(Box::new(baseline::BaselinePlayer::new())),
        "lookahead" => Ok(Box::new(baseline::LookaheadPlayer::new())),
        other => Err(AiError::UnknownPlayer(other.to_string())),
    }
}

/// Applies the player's choices until the round is over or `max_steps` is hit,
/// in which case the round is ended. Returns the number of actions applied.
pub fn play_to_completion(round: &mut Round, player: &dyn Autoplayer, max_steps: usize) -> usize {
    let mut steps = 0;
    while !round.is_over() {
        if steps >= max_steps {
            round.apply(Action::End);
            break;
        }
        let action = player.choose(round);
        round.apply(action);
        steps += 1;
    }
    steps
}
