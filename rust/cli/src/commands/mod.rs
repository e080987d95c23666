//! Command handler modules for the `quartet` CLI.
//!
//! Each subcommand lives in its own file and exposes
//! `handle_<name>_command(...) -> Result<(), CliError>`. Output streams are
//! passed in as `&mut dyn Write` so handlers can be driven from tests.

pub mod career;
pub mod cfg;
pub mod deal;
pub mod play;
pub mod rng;
pub mod sim;
pub mod stats;

pub use career::{CareerOptions, handle_career_command};
pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use play::{PlayOptions, handle_play_command};
pub use rng::handle_rng_command;
pub use sim::{SimOptions, handle_sim_command};
pub use stats::handle_stats_command;
