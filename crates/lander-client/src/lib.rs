//! Tower client for the Apollo Studio queries the lander CLI makes.

mod error;

/// Module related to constructing request headers.
pub mod headers;

/// Module for the operations lander runs against Studio.
pub mod operations;

/// Types shared between operations.
pub mod shared;

mod studio_client;

pub use error::LanderClientError;
pub use studio_client::StudioClient;
