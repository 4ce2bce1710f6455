mod service;
mod types;

pub use service::{service_list_query, ServiceList, ServiceListQuery, ServiceListRequest};
pub use types::{ImplementingServices, ServiceRecord};
