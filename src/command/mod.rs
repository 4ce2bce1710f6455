pub(crate) mod output;
mod service;

pub(crate) use service::ReferenceClock;
pub use service::Service;
