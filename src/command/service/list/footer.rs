use super::classify::Classification;

const NOT_FEDERATED: &str =
    "This graph is not federated. There are no services composing the graph.";
const NO_SERVICES: &str = "There are no services on this federated graph.";

/// The status message and "view more" link printed under the service list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Footer {
    pub(crate) message: Option<&'static str>,
    pub(crate) link: String,
}

impl Footer {
    /// Whether the link line is set apart from what precedes it by a blank line.
    pub(crate) const fn has_gap_before_link(&self) -> bool {
        self.message.is_none()
    }
}

pub(crate) fn compose(
    classification: Option<&Classification<'_>>,
    graph_name: &str,
    frontend_url: &str,
) -> Footer {
    let message = match classification {
        None
        | Some(Classification {
            federated: false, ..
        }) => Some(NOT_FEDERATED),
        Some(Classification { is_empty: true, .. }) => Some(NO_SERVICES),
        Some(_) => None,
    };
    Footer {
        message,
        link: format!("{frontend_url}/graph/{graph_name}/service-list"),
    }
}
