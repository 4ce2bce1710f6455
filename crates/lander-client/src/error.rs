use std::fmt;

use http::StatusCode;
use lander_graphql::GraphQLServiceError;
use lander_http::HttpServiceError;
use thiserror::Error;

use crate::shared::GraphRef;

/// LanderClientError represents all possible failures that can occur during a client request.
#[derive(Error, Debug)]
pub enum LanderClientError {
    /// The registry answered the query with GraphQL errors.
    #[error("The registry responded with an error: {msg}")]
    GraphQl {
        /// The error messages, one per line.
        msg: String,
    },

    /// The API key sent with the request was rejected.
    #[error("Invalid credentials provided.")]
    InvalidCredentials,

    /// The graph could not be found, or the API key has no access to it.
    #[error("Could not find graph with name \"{graph_ref}\".")]
    GraphNotFound {
        /// The graph that was asked for.
        graph_ref: GraphRef,
    },

    /// The response was well-formed GraphQL but did not have the shape lander expects.
    #[error("The registry returned a malformed response: {msg}")]
    MalformedResponse {
        /// What was wrong with it.
        msg: String,
    },

    /// A string could not be parsed into a [`GraphRef`].
    #[error("Graph IDs must be in the format <NAME> or <NAME>@<VARIANT>, where <NAME> can only contain letters, numbers, or the characters `-` or `_`, and must be 64 characters or less. <VARIANT> must be 64 characters or less.")]
    InvalidGraphRef,

    /// Tried to build a [`http::HeaderMap`] with an invalid header value.
    #[error("Invalid header value.")]
    InvalidHeader(#[from] http::header::InvalidHeaderValue),

    /// The registry answered with a non-success status and a body that wasn't GraphQL.
    #[error("The registry responded with HTTP {status_code}.")]
    ServerError {
        /// The status the registry answered with.
        status_code: StatusCode,
    },

    /// The request never produced a response.
    #[error("Could not send the request to the registry. {source}")]
    SendRequest {
        /// The transport failure.
        #[from]
        source: HttpServiceError,
    },

    /// The HTTP client could not be constructed.
    #[error("Could not build the HTTP client.")]
    ClientBuild(#[from] reqwest::Error),

    /// The service stack failed outside of a request.
    #[error("The service failed to become ready: {}", .0)]
    ServiceReady(Box<dyn std::error::Error + Send + Sync>),
}

fn join_messages(errors: &[graphql_client::Error]) -> String {
    errors
        .iter()
        .map(|error| error.message.clone())
        .collect::<Vec<_>>()
        .join("\n")
}

impl<T: fmt::Debug + Send + Sync> From<GraphQLServiceError<T>> for LanderClientError {
    fn from(value: GraphQLServiceError<T>) -> Self {
        match value {
            GraphQLServiceError::NoData(errors) => LanderClientError::GraphQl {
                msg: if errors.is_empty() {
                    "no data was returned".to_string()
                } else {
                    join_messages(&errors)
                },
            },
            GraphQLServiceError::PartialError { errors, .. } => LanderClientError::GraphQl {
                msg: join_messages(&errors),
            },
            GraphQLServiceError::InvalidCredentials => LanderClientError::InvalidCredentials,
            GraphQLServiceError::Deserialization {
                error, status_code, ..
            } => {
                if status_code.is_success() {
                    LanderClientError::MalformedResponse {
                        msg: error.to_string(),
                    }
                } else {
                    LanderClientError::ServerError { status_code }
                }
            }
            GraphQLServiceError::UpstreamService(err) => {
                match err.downcast::<HttpServiceError>() {
                    Ok(err) => LanderClientError::SendRequest { source: *err },
                    Err(err) => LanderClientError::ServiceReady(err),
                }
            }
            err @ (GraphQLServiceError::Serialization(_)
            | GraphQLServiceError::Http(_)
            | GraphQLServiceError::InvalidUri(_)) => LanderClientError::ServiceReady(Box::new(
                std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()),
            )),
        }
    }
}
