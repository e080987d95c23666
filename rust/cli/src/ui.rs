//! UI helper functions for terminal output formatting.

use std::io::Write;

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// Prompt shown before each interactive command.
pub fn write_prompt(out: &mut dyn Write) -> std::io::Result<()> {
    write!(out, "Action (d=draw x=discard u=undo e=end q=quit): ")?;
    out.flush()
}
