pub mod cli;
pub mod command;
mod dot_apollo;
mod error;
mod options;
mod utils;

pub use error::{LanderError, LanderErrorCode, LanderResult};
