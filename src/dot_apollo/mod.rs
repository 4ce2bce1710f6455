use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;

use crate::error::PreconditionError;
use crate::LanderResult;

/// The project configuration kept in `.apollo/config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DotApollo {
    #[serde(default)]
    service: Option<ServiceConfig>,
    #[serde(default)]
    engine: Option<EngineConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    /// `<graph id>` or `<graph id>@<variant>`
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    pub endpoint: Option<String>,
    pub frontend: Option<String>,
}

impl DotApollo {
    fn config_yaml_path(project_dir: &Utf8Path) -> Utf8PathBuf {
        project_dir.join(".apollo").join("config.yaml")
    }

    /// Reads the project config under `project_dir`, if there is one.
    pub(crate) fn read_yaml_from_fs(project_dir: &Utf8Path) -> LanderResult<Option<Self>> {
        let config_path = Self::config_yaml_path(project_dir);
        if !config_path.exists() {
            tracing::debug!("no project config at {}", &config_path);
            return Ok(None);
        }
        tracing::debug!("reading config from {}", &config_path);
        let raw_contents = fs::read_to_string(&config_path)?;
        if raw_contents.trim().is_empty() {
            return Ok(Some(Self::default()));
        }
        let config: Self = serde_yaml::from_str(&raw_contents).map_err(|source| {
            PreconditionError::InvalidProjectConfig {
                path: config_path,
                source,
            }
        })?;
        Ok(Some(config))
    }

    /// The configured graph, as written (possibly with an `@variant`).
    pub(crate) fn graph_name(&self) -> Option<&str> {
        self.service
            .as_ref()
            .and_then(|service| service.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    pub(crate) const fn engine(&self) -> Option<&EngineConfig> {
        self.engine.as_ref()
    }
}
