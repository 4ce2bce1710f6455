use buildstructor::buildstructor;
use houston::Credential;
use lander_graphql::{GraphQLLayer, GraphQLService};
use lander_http::{
    extend_headers::{ExtendHeaders, ExtendHeadersLayer},
    HttpService,
};
use tower::ServiceBuilder;
use url::Url;

use crate::{headers::build_studio_headers, LanderClientError};

/// Represents a client for making GraphQL requests to Apollo Studio.
pub struct StudioClient {
    credential: Credential,
    endpoint: Url,
    version: String,
    http_service: HttpService,
}

#[buildstructor]
impl StudioClient {
    /// Constructs a new [`StudioClient`] that sends its requests through `http_service`.
    /// For use in lander, the `endpoint` is usually Apollo Studio's GraphQL API.
    #[builder]
    pub fn new(
        credential: Credential,
        endpoint: Url,
        version: String,
        http_service: HttpService,
    ) -> StudioClient {
        StudioClient {
            credential,
            endpoint,
            version,
            http_service,
        }
    }

    /// The endpoint requests are sent to.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Assembles the service stack for Studio queries: GraphQL over HTTP with the
    /// Studio identification headers applied to every request.
    pub fn studio_graphql_service(
        &self,
    ) -> Result<GraphQLService<ExtendHeaders<HttpService>>, LanderClientError> {
        let headers = build_studio_headers(&self.credential, &self.version)?;
        tracing::debug!(endpoint = %self.endpoint, "building studio graphql service");
        Ok(ServiceBuilder::new()
            .layer(GraphQLLayer::new(self.endpoint.clone()))
            .layer(ExtendHeadersLayer::new(headers))
            .service(self.http_service.clone()))
    }
}
