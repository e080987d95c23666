//! `cfg`: prints every configuration value with the layer it came from.
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "luckiness": { "value": 1.0, "source": "env" },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "luckiness": {
            "value": config.luckiness,
            "source": sources.luckiness,
        },
        "player_name": {
            "value": config.player_name,
            "source": sources.player_name,
        },
        "policy": {
            "value": config.policy,
            "source": sources.policy,
        },
        "adaptive": {
            "value": config.adaptive,
            "source": sources.adaptive,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
