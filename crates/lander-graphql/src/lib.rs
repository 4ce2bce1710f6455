#![warn(missing_docs)]

//! Provides GraphQL middleware for HTTP services

use std::{fmt, future::Future, pin::Pin, str::FromStr};

use bytes::Bytes;
use graphql_client::GraphQLQuery;
use http::{uri::InvalidUri, HeaderValue, Method, StatusCode, Uri};
use lander_http::{Full, HttpRequest, HttpResponse};
use tower::{Layer, Service};
use url::Url;

const JSON_CONTENT_TYPE: &str = "application/json";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Errors that may occur from using a [`GraphQLService`]
#[derive(thiserror::Error, Debug)]
pub enum GraphQLServiceError<T: Send + Sync + fmt::Debug> {
    /// There was no data field provided in the response
    #[error("No data was returned. {}", join_messages(.0))]
    NoData(Vec<graphql_client::Error>),
    /// The response returned some data, but there were errors
    #[error("Data was returned, but with errors: {}", join_messages(.errors))]
    PartialError {
        /// The partial data returned
        data: T,
        /// The GraphQL errors that were produced
        errors: Vec<graphql_client::Error>,
    },
    /// The request failed to present credentials that authorize it
    #[error("Invalid credentials provided.")]
    InvalidCredentials,
    /// Request serialization error
    #[error("Serialization error")]
    Serialization(serde_json::Error),
    /// Response deserialization error
    #[error("Could not parse the response (HTTP {status_code})")]
    Deserialization {
        /// The source error
        error: serde_json::Error,
        /// The data that was attempted to be deserialized
        data: Bytes,
        /// The [`StatusCode`] of the response
        status_code: StatusCode,
    },
    /// [`http`]-related error, probably from building the request
    #[error("HTTP error: {:?}", .0)]
    Http(#[from] http::Error),
    /// The endpoint [`Url`] could not be turned into a [`Uri`]
    #[error("Unable to convert URL to URI.")]
    InvalidUri(#[from] InvalidUri),
    /// The underlying HTTP service failed
    #[error("Upstream service error: {}", .0)]
    UpstreamService(Box<dyn std::error::Error + Send + Sync>),
}

fn join_messages(errors: &[graphql_client::Error]) -> String {
    errors
        .iter()
        .map(|error| error.message.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrapper around [`GraphQLQuery::Variables`]
pub struct GraphQLRequest<Q: GraphQLQuery> {
    variables: Q::Variables,
}

impl<Q> fmt::Debug for GraphQLRequest<Q>
where
    Q: GraphQLQuery,
    Q::Variables: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{:?}", self.variables)
    }
}

impl<Q> PartialEq for GraphQLRequest<Q>
where
    Q: GraphQLQuery,
    Q::Variables: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
    }
}

impl<Q: GraphQLQuery> GraphQLRequest<Q> {
    /// Constructs a new [`GraphQLRequest`]
    pub const fn new(variables: Q::Variables) -> GraphQLRequest<Q> {
        GraphQLRequest { variables }
    }

    /// Consumes the [`GraphQLRequest`] and produces the inner variables
    pub fn into_inner(self) -> Q::Variables {
        self.variables
    }
}

/// [`Layer`] that wraps an HTTP service with GraphQL middleware
pub struct GraphQLLayer {
    endpoint: Url,
}

impl GraphQLLayer {
    /// Constructs a new [`GraphQLLayer`] posting to `endpoint`
    pub const fn new(endpoint: Url) -> GraphQLLayer {
        GraphQLLayer { endpoint }
    }
}

impl<S> Layer<S> for GraphQLLayer {
    type Service = GraphQLService<S>;
    fn layer(&self, inner: S) -> Self::Service {
        GraphQLService::new(self.endpoint.clone(), inner)
    }
}

/// Middleware that turns a [`GraphQLRequest`] into an HTTP POST and decodes the
/// GraphQL response envelope
#[derive(Clone, Debug)]
pub struct GraphQLService<S> {
    inner: S,
    endpoint: Url,
}

impl<S> GraphQLService<S> {
    /// Constructs a new [`GraphQLService`]
    pub const fn new(endpoint: Url, inner: S) -> GraphQLService<S> {
        GraphQLService { endpoint, inner }
    }
}

impl<Q, S> Service<GraphQLRequest<Q>> for GraphQLService<S>
where
    Q: GraphQLQuery + Send + Sync + 'static,
    Q::Variables: Send,
    Q::ResponseData: Send + Sync + fmt::Debug,
    S: Service<HttpRequest, Response = HttpResponse> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    type Response = Q::ResponseData;
    type Error = GraphQLServiceError<Q::ResponseData>;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        tower::Service::poll_ready(&mut self.inner, cx)
            .map_err(|err| GraphQLServiceError::UpstreamService(Box::new(err)))
    }

    fn call(&mut self, req: GraphQLRequest<Q>) -> Self::Future {
        // https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
        let cloned = self.inner.clone();
        let mut client = std::mem::replace(&mut self.inner, cloned);
        let endpoint = self.endpoint.clone();

        let fut = async move {
            let body = Q::build_query(req.into_inner());
            tracing::debug!(operation_name = body.operation_name, "sending graphql request");
            let body_bytes =
                Bytes::from(serde_json::to_vec(&body).map_err(GraphQLServiceError::Serialization)?);
            let req = http::Request::builder()
                .uri(Uri::from_str(endpoint.as_str())?)
                .method(Method::POST)
                .header(
                    http::header::CONTENT_TYPE,
                    HeaderValue::from_static(JSON_CONTENT_TYPE),
                )
                .body(Full::new(body_bytes))?;
            let resp = client
                .call(req)
                .await
                .map_err(|err| GraphQLServiceError::UpstreamService(Box::new(err)))?;
            let status_code = resp.status();
            let body = resp.into_body();
            let graphql_response: graphql_client::Response<Q::ResponseData> =
                serde_json::from_slice(&body).map_err(|error| {
                    GraphQLServiceError::Deserialization {
                        error,
                        data: body.clone(),
                        status_code,
                    }
                })?;

            match (graphql_response.data, graphql_response.errors) {
                (data, Some(errors)) if !errors.is_empty() => {
                    tracing::debug!(?errors, "graphql response contained errors");
                    if errors
                        .iter()
                        .any(|error| error.message.contains(INVALID_CREDENTIALS))
                    {
                        Err(GraphQLServiceError::InvalidCredentials)
                    } else if let Some(data) = data {
                        Err(GraphQLServiceError::PartialError { data, errors })
                    } else {
                        Err(GraphQLServiceError::NoData(errors))
                    }
                }
                (Some(data), _) => Ok(data),
                (None, _) => Err(GraphQLServiceError::NoData(Vec::default())),
            }
        };
        Box::pin(fut)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bytes::Bytes;
    use graphql_client::{GraphQLQuery, QueryBody};
    use http::{HeaderValue, Method, StatusCode, Uri};
    use lander_http::{body::body_to_bytes, HttpRequest, HttpResponse, HttpServiceError};
    use rstest::{fixture, rstest};
    use serde::{Deserialize, Serialize};
    use speculoos::prelude::*;
    use tokio::task;
    use tower::{Service, ServiceBuilder, ServiceExt};
    use tower_test::mock;
    use url::Url;

    use super::{GraphQLLayer, GraphQLRequest, GraphQLServiceError, JSON_CONTENT_TYPE};

    struct TestQuery {}

    #[derive(Serialize)]
    struct TestQueryVariables {
        variable: i32,
    }

    #[derive(Serialize, Deserialize, Debug, Eq, PartialEq)]
    struct TestQueryResponse {
        inner_data: i32,
    }

    impl GraphQLQuery for TestQuery {
        type Variables = TestQueryVariables;
        type ResponseData = TestQueryResponse;

        fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
            QueryBody {
                variables,
                query: "query AskAQuestion { __typename }",
                operation_name: "AskAQuestion",
            }
        }
    }

    #[fixture]
    fn endpoint() -> Url {
        Url::parse("http://example.com/graphql").unwrap()
    }

    fn graphql_error(message: &str) -> graphql_client::Error {
        graphql_client::Error {
            message: message.to_string(),
            locations: None,
            path: None,
            extensions: None,
        }
    }

    /// Sends a single `TestQuery` through the layer and answers it with
    /// `status` and `body`, after checking the outgoing request.
    async fn round_trip(
        endpoint: Url,
        status: StatusCode,
        body: Bytes,
    ) -> Result<TestQueryResponse, GraphQLServiceError<TestQueryResponse>> {
        let (mock_service, mut handle) = mock::spawn::<HttpRequest, HttpResponse>();
        let mut service = ServiceBuilder::new()
            .layer(GraphQLLayer::new(endpoint.clone()))
            .map_err(HttpServiceError::Unexpected)
            .service(mock_service.into_inner());
        let service = ServiceExt::<GraphQLRequest<TestQuery>>::ready(&mut service)
            .await
            .unwrap();
        let service_call_fut = service.call(GraphQLRequest::new(TestQueryVariables { variable: 7 }));

        task::spawn(async move {
            let (mut actual, send_response) = handle.next_request().await.unwrap();

            assert_that!(actual.uri()).is_equal_to(&Uri::from_str(endpoint.as_str()).unwrap());
            assert_that!(actual.method()).is_equal_to(&Method::POST);
            assert_that!(actual.headers().get(http::header::CONTENT_TYPE).unwrap())
                .is_equal_to(&HeaderValue::from_static(JSON_CONTENT_TYPE));

            let request_body = body_to_bytes(actual.body_mut()).await.unwrap();
            let expected_query_body = TestQuery::build_query(TestQueryVariables { variable: 7 });
            assert_that!(request_body)
                .is_equal_to(Bytes::from(serde_json::to_vec(&expected_query_body).unwrap()));

            let mock_http_response = http::Response::builder()
                .status(status)
                .body(body)
                .unwrap();
            send_response.send_response(mock_http_response);
        });

        service_call_fut.await
    }

    fn response_body(response: graphql_client::Response<TestQueryResponse>) -> Bytes {
        Bytes::from(serde_json::to_vec(&response).unwrap())
    }

    #[rstest]
    #[tokio::test]
    async fn test_successful_request(endpoint: Url) {
        let body = response_body(graphql_client::Response {
            data: Some(TestQueryResponse { inner_data: 14 }),
            errors: None,
            extensions: None,
        });

        let result = round_trip(endpoint, StatusCode::OK, body).await;

        assert_that!(result)
            .is_ok()
            .is_equal_to(TestQueryResponse { inner_data: 14 });
    }

    #[rstest]
    #[tokio::test]
    async fn test_error_no_data(endpoint: Url) {
        let body = response_body(graphql_client::Response {
            data: None,
            errors: Some(vec![graphql_error("something went wrong")]),
            extensions: None,
        });

        let result = round_trip(endpoint, StatusCode::OK, body).await;

        assert_that!(result).is_err().matches(|err| match err {
            GraphQLServiceError::NoData(errors) => {
                errors == &vec![graphql_error("something went wrong")]
            }
            _ => false,
        });
    }

    #[rstest]
    #[tokio::test]
    async fn test_partial_data(endpoint: Url) {
        let body = response_body(graphql_client::Response {
            data: Some(TestQueryResponse { inner_data: 1 }),
            errors: Some(vec![graphql_error("one field failed")]),
            extensions: None,
        });

        let result = round_trip(endpoint, StatusCode::OK, body).await;

        assert_that!(result).is_err().matches(|err| {
            matches!(
                err,
                GraphQLServiceError::PartialError { data, .. } if data.inner_data == 1
            )
        });
    }

    #[rstest]
    #[tokio::test]
    async fn test_invalid_credentials(endpoint: Url) {
        let body = response_body(graphql_client::Response {
            data: None,
            errors: Some(vec![graphql_error(
                "Invalid credentials provided for this request",
            )]),
            extensions: None,
        });

        let result = round_trip(endpoint, StatusCode::OK, body).await;

        assert_that!(result)
            .is_err()
            .matches(|err| matches!(err, GraphQLServiceError::InvalidCredentials));
    }

    #[rstest]
    #[case::ok(StatusCode::OK)]
    #[case::internal_server_error(StatusCode::INTERNAL_SERVER_ERROR)]
    #[tokio::test]
    async fn test_json_deserialization_error(
        endpoint: Url,
        #[case] expected_status_code: StatusCode,
    ) {
        let body = Bytes::from("something went wrong".as_bytes());

        let result = round_trip(endpoint, expected_status_code, body).await;

        assert_that!(result).is_err().matches(|err| match err {
            GraphQLServiceError::Deserialization {
                data, status_code, ..
            } => {
                status_code == &expected_status_code
                    && data == &Bytes::from("something went wrong".as_bytes())
            }
            _ => false,
        });
    }
}
