use lander_client::operations::service::list::{ImplementingServices, ServiceRecord};

/// What a fetched service list amounts to, for deciding what to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Classification<'a> {
    pub(crate) federated: bool,
    pub(crate) services: &'a [ServiceRecord],
    pub(crate) is_empty: bool,
}

/// `None` means there is nothing to display yet.
pub(crate) fn classify(
    implementing_services: Option<&ImplementingServices>,
) -> Option<Classification<'_>> {
    let classification = match implementing_services? {
        ImplementingServices::NonFederated => Classification {
            federated: false,
            services: &[],
            is_empty: false,
        },
        ImplementingServices::Federated { services } => Classification {
            federated: true,
            services: services.as_slice(),
            is_empty: services.is_empty(),
        },
    };
    Some(classification)
}
