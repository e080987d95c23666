//! # quartet-career
//!
//! Competitive layer on top of `quartet-engine`: tiers and their difficulty
//! curves, synthetic rivals, standings simulation, the form meter that feeds
//! deck luckiness, tier progression, best-of-4 aggregation and the store
//! seams used to persist a career.
//!
//! ```rust
//! use quartet_career::session::CareerSession;
//! use quartet_career::store::MemoryStore;
//! use quartet_engine::logger::MemorySink;
//! use quartet_engine::round::Action;
//!
//! let mut session = CareerSession::new("player-1", "You", MemoryStore::new(), MemorySink::default(), 7);
//! let mut round = session.start_round(Some(99));
//! while !round.is_over() {
//!     let action = if round.can_discard() {
//!         Action::Discard
//!     } else if round.is_stalled() {
//!         Action::End
//!     } else {
//!         Action::Draw
//!     };
//!     round.apply(action);
//! }
//! let report = session.finish_round(&round).unwrap();
//! assert!(report.placement() >= 1 && report.placement() <= 16);
//! assert_eq!(session.sink().records.len(), 1);
//! ```

pub mod error;
pub mod form;
pub mod progression;
pub mod rival;
pub mod session;
pub mod simulation;
pub mod store;
pub mod tier;

pub use error::{CareerError, StoreError};
pub use form::FormMeter;
pub use progression::{best_of_four, Ao3Aggregate, Career, RoundSummary};
pub use rival::{Rival, RivalBank};
pub use session::{Ao3Session, CareerReport, CareerSession};
pub use simulation::{simulate_round, Standings};
pub use store::{CareerStore, FormMeterStore, MemoryStore, RivalStore};
pub use tier::Tier;
