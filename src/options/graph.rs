use clap::Parser;
use lander_client::shared::GraphRef;

use crate::error::PreconditionError;
use crate::LanderResult;

/// Which graph to list services for.
#[derive(Debug, Clone, Default, Parser)]
pub struct GraphOpt {
    /// ID of the graph in Apollo Studio, optionally with an @<VARIANT>.
    /// Defaults to the graph in .apollo/config.yaml, then to the graph a graph API key belongs to
    #[arg(long = "graph", short = 'g', value_name = "GRAPH_ID")]
    pub graph: Option<String>,

    /// Variant of the graph to list services for
    #[arg(long = "variant", visible_alias = "tag", short = 't', value_name = "VARIANT")]
    pub variant: Option<String>,
}

impl GraphOpt {
    /// Works out the graph ref from, in order: `--graph`, the project's configured
    /// graph name, and the graph id embedded in a `service:<id>:<secret>` API key.
    /// `--variant` beats a variant carried by either name; `current` is the fallback.
    pub(crate) fn resolve(
        &self,
        configured_name: Option<&str>,
        api_key: Option<&str>,
    ) -> LanderResult<GraphRef> {
        let name = self
            .graph
            .as_deref()
            .or(configured_name)
            .or_else(|| api_key.and_then(graph_id_from_api_key))
            .ok_or(PreconditionError::NoGraphId)?;

        let (id, configured_variant) = match name.split_once('@') {
            Some((id, variant)) => (id, Some(variant)),
            None => (name, None),
        };
        let variant = self
            .variant
            .as_deref()
            .or(configured_variant)
            .map(str::to_string);

        let graph_ref = GraphRef::new(id.to_string(), variant)?;
        tracing::debug!(%graph_ref, "resolved graph");
        Ok(graph_ref)
    }
}

/// Graph API keys look like `service:<graph id>:<secret>`.
fn graph_id_from_api_key(api_key: &str) -> Option<&str> {
    let mut parts = api_key.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("service"), Some(id), Some(_)) if !id.is_empty() => Some(id),
        _ => None,
    }
}
