/// all `lander service` operations
pub mod service;
