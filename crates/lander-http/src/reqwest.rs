use std::pin::Pin;

use buildstructor::buildstructor;
use futures::Future;
use tower::{util::BoxCloneService, Service, ServiceBuilder, ServiceExt};

use crate::{
    body::body_to_bytes, HttpRequest, HttpResponse, HttpService, HttpServiceConfig,
    HttpServiceError, DEFAULT_TIMEOUT,
};

/// A [`Service`] that wraps a [`reqwest`] client and uses [`http`] constructs for requests and responses
#[derive(Clone, Debug)]
pub struct ReqwestService {
    client: BoxCloneService<reqwest::Request, reqwest::Response, HttpServiceError>,
}

#[buildstructor]
impl ReqwestService {
    /// Constructs a new [`ReqwestService`]
    #[builder]
    pub fn new(
        config: Option<HttpServiceConfig>,
        client: Option<reqwest::Client>,
    ) -> Result<ReqwestService, reqwest::Error> {
        let config = config.unwrap_or_default();
        let client = match client {
            Some(client) => client,
            None => reqwest::Client::builder().build()?,
        };
        let timeout = config.timeout().unwrap_or(DEFAULT_TIMEOUT);
        tracing::trace!(?timeout, "building http service");
        let client = ServiceBuilder::new()
            .map_err(HttpServiceError::from)
            .timeout(timeout)
            .service(client)
            .boxed_clone();
        Ok(ReqwestService { client })
    }
}

impl From<reqwest::Error> for HttpServiceError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_body() {
            HttpServiceError::Body(value.into())
        } else if value.is_connect() {
            HttpServiceError::Connect(value.into())
        } else if value.is_timeout() {
            HttpServiceError::TimedOut
        } else {
            HttpServiceError::Unexpected(value.into())
        }
    }
}

impl Service<HttpRequest> for ReqwestService {
    type Response = HttpResponse;
    type Error = HttpServiceError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.client.poll_ready(cx)
    }

    fn call(&mut self, mut req: HttpRequest) -> Self::Future {
        // https://docs.rs/tower/latest/tower/trait.Service.html#be-careful-when-cloning-inner-services
        let cloned = self.client.clone();
        let mut client = std::mem::replace(&mut self.client, cloned);
        let fut = async move {
            let bytes = body_to_bytes(req.body_mut())
                .await
                .map_err(|err| HttpServiceError::Body(Box::new(err)))?;
            let req = req.map(move |_| reqwest::Body::from(bytes));
            let req = reqwest::Request::try_from(req)?;
            tracing::debug!(method = %req.method(), url = %req.url(), "sending request");
            let mut resp = http::Response::from(client.call(req).await?);
            tracing::debug!(status = ?resp.status(), headers = ?resp.headers());
            let bytes = body_to_bytes(resp.body_mut())
                .await
                .map_err(|err| HttpServiceError::Body(Box::new(err)))?;
            Ok(resp.map(|_| bytes))
        };
        Box::pin(fut)
    }
}

impl From<ReqwestService> for HttpService {
    fn from(value: ReqwestService) -> Self {
        value.boxed_clone()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::Result;
    use bytes::Bytes;
    use http::HeaderValue;
    use http_body_util::Full;
    use httpmock::{Method, MockServer};
    use rstest::{fixture, rstest};
    use speculoos::prelude::*;
    use tower::{Service, ServiceExt};

    use crate::{HttpService, HttpServiceConfig, HttpServiceError, ReqwestService};

    #[fixture]
    fn raw_service() -> HttpService {
        ReqwestService::builder()
            .client(reqwest::Client::default())
            .build()
            .unwrap()
            .boxed_clone()
    }

    #[fixture]
    fn timeout_service() -> HttpService {
        ReqwestService::builder()
            .config(
                HttpServiceConfig::builder()
                    .timeout(Duration::from_millis(100))
                    .build(),
            )
            .client(reqwest::Client::default())
            .build()
            .unwrap()
            .boxed_clone()
    }

    #[rstest]
    #[case::raw_service(raw_service(), None)]
    #[case::fast_enough(timeout_service(), None)]
    #[case::too_slow(timeout_service(), Some(Duration::from_millis(500)))]
    #[tokio::test]
    async fn make_a_request(
        #[case] mut service: HttpService,
        #[case] request_length: Option<Duration>,
    ) -> Result<()> {
        let server = MockServer::start();
        let uri = format!("http://{}", server.address());

        let mock = server.mock(|when, then| {
            when.method(Method::POST)
                .path("/")
                .header("x-some-header", "x-some-value")
                .body("abc");

            let then = then
                .status(200)
                .header("x-resp-header", "x-resp-value")
                .body("def");
            if let Some(request_length) = request_length {
                then.delay(request_length);
            }
        });

        let request = http::Request::builder()
            .uri(uri)
            .method(http::Method::POST)
            .header("x-some-header", "x-some-value")
            .body(Full::new(Bytes::from("abc".as_bytes())))?;

        let resp = service.ready().await?.call(request).await;

        mock.assert_calls(1);

        if request_length.is_some() {
            assert_that!(resp)
                .is_err()
                .matches(|err| matches!(err, HttpServiceError::TimedOut));
        } else {
            let resp = resp?;
            assert_that!(resp.headers().get("x-resp-header"))
                .is_some()
                .is_equal_to(&HeaderValue::from_static("x-resp-value"));
            assert_that!(resp.body()).is_equal_to(&Bytes::from("def".as_bytes()));
        }

        Ok(())
    }
}
