//! Macros for common CLI error handling patterns.

/// Writes a line and returns the error exit code from the enclosing
/// function when the stream is closed.
#[macro_export]
macro_rules! write_or_exit {
    ($dest:expr, $($arg:tt)*) => {
        if writeln!($dest, $($arg)*).is_err() {
            return $crate::exit_code::ERROR;
        }
    };
}
