use std::io;

use tracing_subscriber::fmt;

use crate::Level;

/// How much surrounding detail each log line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verbosity {
    Quiet,
    Normal,
    Chatty,
}

impl From<Level> for Verbosity {
    fn from(level: Level) -> Self {
        if level <= Level::WARN {
            Verbosity::Quiet
        } else if level == Level::TRACE {
            Verbosity::Chatty
        } else {
            Verbosity::Normal
        }
    }
}

pub(crate) fn install(level: Level) {
    match Verbosity::from(level) {
        Verbosity::Quiet => {
            let format = fmt::format().without_time().with_target(false).compact();
            fmt()
                .with_max_level(level)
                .event_format(format)
                .with_writer(io::stderr)
                .init();
        }
        Verbosity::Normal => {
            let format = fmt::format().without_time().pretty();
            fmt()
                .with_max_level(level)
                .event_format(format)
                .with_writer(io::stderr)
                .init();
        }
        Verbosity::Chatty => {
            fmt()
                .with_max_level(level)
                .with_writer(io::stderr)
                .with_thread_ids(true)
                .init();
        }
    }
}
