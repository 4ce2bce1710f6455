#![warn(missing_docs)]

//! Provides [`tower`] implementations for the HTTP requests lander sends

use std::time::Duration;

use buildstructor::Builder;
use bytes::Bytes;
use derive_getters::Getters;
pub use http_body_util::Full;
use tower::{timeout::error::Elapsed, util::BoxCloneService};

pub mod body;
mod error;
pub mod extend_headers;
mod reqwest;

pub use error::HttpServiceError;
pub use reqwest::ReqwestService;

/// Ease-of-use synonym for the request type this crate operates on
pub type HttpRequest = http::Request<Full<Bytes>>;
/// Ease-of-use synonym for the response type this crate operates on.
/// Bodies are collected eagerly, so consumers get the raw bytes.
pub type HttpResponse = http::Response<Bytes>;
/// Ease-of-use synonym for the [`tower::Service`] type this crate provides
pub type HttpService = BoxCloneService<HttpRequest, HttpResponse, HttpServiceError>;

/// Default amount of time a single request may take before it is abandoned
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration object for constructing an [`HttpService`].
#[derive(Clone, Debug, Builder, Default, Getters)]
pub struct HttpServiceConfig {
    timeout: Option<Duration>,
}

impl From<Box<dyn std::error::Error + Send + Sync>> for HttpServiceError {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        match err.downcast::<Elapsed>() {
            Ok(_) => HttpServiceError::TimedOut,
            Err(err) => match err.downcast::<HttpServiceError>() {
                Ok(err) => *err,
                Err(err) => HttpServiceError::Unexpected(err),
            },
        }
    }
}
