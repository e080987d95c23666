//! # quartet-engine: Round State Machine Core
//!
//! A deterministic engine for a single-player patience game: cards are drawn
//! into a visible sequence and runs of four are discarded when they match one
//! of the discard rules. Lower remaining-card scores are better.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and canonical deck order
//! - [`deck`] - Seeded ChaCha20 shuffling with the optional luck-bias pass
//! - [`rules`] - Discard rule evaluation over the top four cards
//! - [`round`] - The round state machine: draw, recycle, discard, undo, scoring
//! - [`logger`] - Result records, the result sink trait and a JSONL logger
//! - [`errors`] - Error types for parsing and validation
//!
//! ## Quick Start
//!
//! ```rust
//! use quartet_engine::round::{Action, Round};
//!
//! let mut round = Round::start(Some(42), 1.0);
//! while !round.is_over() {
//!     if round.can_discard() {
//!         round.apply(Action::Discard);
//!     } else if round.is_stalled() {
//!         round.apply(Action::End);
//!     } else {
//!         round.apply(Action::Draw);
//!     }
//! }
//! assert_eq!(round.total_cards(), 52);
//! println!("score: {}", round.calculate_score());
//! ```
//!
//! ## Deterministic Shuffles
//!
//! Seed and luckiness fully determine the deck order:
//!
//! ```rust
//! use quartet_engine::deck::Deck;
//!
//! let mut a = Deck::new();
//! let mut b = Deck::new();
//! a.reset(Some(42), 1.0);
//! b.reset(Some(42), 1.0);
//! assert_eq!(a.cards(), b.cards());
//! ```

pub mod cards;
pub mod deck;
pub mod errors;
pub mod logger;
pub mod round;
pub mod rules;
