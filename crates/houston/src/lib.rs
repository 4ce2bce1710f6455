#![deny(missing_docs)]

//! Utilites for configuring the lander CLI tool.

mod config;
mod error;
mod profile;

pub use config::Config;
pub use error::HoustonProblem;

pub use profile::mask_key;
/// Utilites for saving and loading credential profiles.
pub use profile::{Credential, CredentialOrigin, Profile};
