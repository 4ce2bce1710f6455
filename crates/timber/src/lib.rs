#![deny(missing_docs)]

//! Defines the output format of traces, events, and spans produced
//! by lander and the libraries it uses.

mod formatter;

pub use tracing_core::Level;

/// possible log levels
pub const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Initializes a global tracing subscriber that writes to stderr.
///
/// By default, no logs are printed. `error` and `warn` get a compact single-line
/// format, `trace` adds timestamps and thread ids.
pub fn init(level: Option<Level>) {
    if let Some(level) = level {
        formatter::install(level);
    }
}
