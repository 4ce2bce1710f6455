use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::LanderClientError;

const DEFAULT_VARIANT: &str = "current";

static GRAPH_NAME: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9_-]{0,63}$"));

/// Identifies a single variant of a graph in Apollo Studio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRef {
    pub name: String,
    pub variant: String,
}

impl GraphRef {
    /// Creates a [`GraphRef`], falling back to the `current` variant.
    pub fn new(name: String, variant: Option<String>) -> Result<GraphRef, LanderClientError> {
        let is_valid_name = match GRAPH_NAME.as_ref() {
            Ok(re) => re.is_match(&name),
            Err(_) => false,
        };
        if !is_valid_name {
            return Err(LanderClientError::InvalidGraphRef);
        }
        let variant = variant.unwrap_or_else(|| DEFAULT_VARIANT.to_string());
        if variant.is_empty() || variant.len() > 64 {
            return Err(LanderClientError::InvalidGraphRef);
        }
        Ok(GraphRef { name, variant })
    }
}

impl fmt::Display for GraphRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.variant)
    }
}

impl FromStr for GraphRef {
    type Err = LanderClientError;

    fn from_str(graph_ref: &str) -> Result<Self, Self::Err> {
        match graph_ref.split_once('@') {
            Some((name, variant)) => GraphRef::new(name.to_string(), Some(variant.to_string())),
            None => GraphRef::new(graph_ref.to_string(), None),
        }
    }
}
