use chrono::{DateTime, Utc};
use serde::Serialize;

use super::service::service_list_query;
use crate::LanderClientError;

pub(crate) type ServiceListResponseData = service_list_query::ResponseData;
pub(crate) type QueryImplementingServices =
    service_list_query::ServiceListQueryServiceImplementingServices;
pub(crate) type QueryServiceRecord = service_list_query::ServiceListQueryServiceImplementingServicesOnFederatedImplementingServicesServices;

/// One service that makes up a federated graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceRecord {
    pub graph_id: String,
    pub graph_variant: String,
    pub name: String,
    pub url: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<QueryServiceRecord> for ServiceRecord {
    type Error = LanderClientError;

    fn try_from(record: QueryServiceRecord) -> Result<Self, Self::Error> {
        let updated_at = DateTime::parse_from_rfc3339(&record.updated_at)
            .map_err(|err| LanderClientError::MalformedResponse {
                msg: format!(
                    "service \"{}\" has an invalid updatedAt timestamp \"{}\": {err}",
                    record.name, record.updated_at
                ),
            })?
            .with_timezone(&Utc);
        Ok(ServiceRecord {
            graph_id: record.graph_id,
            graph_variant: record.graph_variant,
            name: record.name,
            url: record.url,
            updated_at,
        })
    }
}

/// The services implementing a graph variant, as Studio reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImplementingServices {
    /// The graph is federated; `services` are in the order Studio returned them.
    Federated { services: Vec<ServiceRecord> },
    /// The graph is a monolith with no implementing services.
    NonFederated,
}

impl TryFrom<QueryImplementingServices> for ImplementingServices {
    type Error = LanderClientError;

    fn try_from(value: QueryImplementingServices) -> Result<Self, Self::Error> {
        match value {
            QueryImplementingServices::FederatedImplementingServices(federated) => {
                let services = federated
                    .services
                    .into_iter()
                    .map(ServiceRecord::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ImplementingServices::Federated { services })
            }
            QueryImplementingServices::NonFederatedImplementingService => {
                Ok(ImplementingServices::NonFederated)
            }
        }
    }
}
