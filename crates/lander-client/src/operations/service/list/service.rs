use std::{fmt, future::Future, pin::Pin};

use buildstructor::Builder;
use derive_getters::Getters;
use graphql_client::GraphQLQuery;
use lander_graphql::{GraphQLRequest, GraphQLServiceError};
use tower::Service;

use super::types::{ImplementingServices, ServiceListResponseData};
use crate::{shared::GraphRef, LanderClientError};

type Timestamp = String;

#[derive(GraphQLQuery)]
// The paths are relative to the directory where your `Cargo.toml` is located.
#[graphql(
    query_path = "src/operations/service/list/list_query.graphql",
    schema_path = ".schema/schema.graphql",
    response_derives = "Eq, PartialEq, Debug, Serialize, Deserialize",
    deprecated = "warn"
)]
/// This struct is used to generate the module containing `Variables` and
/// `ResponseData` structs.
/// Snake case of this name is the mod name. i.e. service_list_query
pub struct ServiceListQuery;

impl fmt::Debug for service_list_query::Variables {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.debug_struct("Variables")
            .field("id", &self.id)
            .field("graph_variant", &self.graph_variant)
            .finish()
    }
}

impl PartialEq for service_list_query::Variables {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.graph_variant == other.graph_variant
    }
}

/// Asks for the services implementing one variant of a graph.
#[derive(Builder, Clone, Debug, Getters, PartialEq)]
pub struct ServiceListRequest {
    graph_ref: GraphRef,
}

impl From<&ServiceListRequest> for service_list_query::Variables {
    fn from(req: &ServiceListRequest) -> Self {
        service_list_query::Variables {
            id: req.graph_ref.name.clone(),
            graph_variant: req.graph_ref.variant.clone(),
        }
    }
}

/// Runs [`ServiceListQuery`] over a GraphQL service and decodes the result
/// into [`ImplementingServices`].
#[derive(Clone)]
pub struct ServiceList<S: Clone> {
    inner: S,
}

impl<S: Clone> ServiceList<S> {
    pub const fn new(inner: S) -> ServiceList<S> {
        ServiceList { inner }
    }
}

impl<S, Fut> Service<ServiceListRequest> for ServiceList<S>
where
    S: Service<
            GraphQLRequest<ServiceListQuery>,
            Response = ServiceListResponseData,
            Error = GraphQLServiceError<ServiceListResponseData>,
            Future = Fut,
        > + Clone
        + Send
        + 'static,
    Fut: Future<Output = Result<S::Response, S::Error>> + Send,
{
    type Response = Option<ImplementingServices>;
    type Error = LanderClientError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        tower::Service::<GraphQLRequest<ServiceListQuery>>::poll_ready(&mut self.inner, cx)
            .map_err(|err| LanderClientError::ServiceReady(Box::new(err)))
    }

    fn call(&mut self, req: ServiceListRequest) -> Self::Future {
        let cloned = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, cloned);
        let fut = async move {
            let variables = service_list_query::Variables::from(&req);
            tracing::debug!(graph_ref = %req.graph_ref, "listing implementing services");
            let response_data = inner.call(GraphQLRequest::new(variables)).await?;
            implementing_services_from_response_data(req.graph_ref, response_data)
        };
        Box::pin(fut)
    }
}

/// A graph that exists but reports no implementing services (e.g. an unknown
/// variant) comes back as `None` rather than an error.
fn implementing_services_from_response_data(
    graph_ref: GraphRef,
    response_data: ServiceListResponseData,
) -> Result<Option<ImplementingServices>, LanderClientError> {
    let service = response_data
        .service
        .ok_or(LanderClientError::GraphNotFound { graph_ref })?;
    service
        .implementing_services
        .map(ImplementingServices::try_from)
        .transpose()
}
