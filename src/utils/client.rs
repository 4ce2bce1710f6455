use std::time::Duration;

use houston::{Config, Credential, Profile};
use lander_client::{LanderClientError, StudioClient};
use lander_http::{HttpService, HttpServiceConfig, ReqwestService};
use url::Url;

use crate::error::PreconditionError;
use crate::LanderResult;

/// the Apollo graph registry's production API endpoint
const STUDIO_PROD_API_ENDPOINT: &str = "https://graphql.api.apollographql.com/api/graphql";

/// the root of Apollo Studio's web UI
const STUDIO_PROD_FRONTEND: &str = "https://studio.apollographql.com";

/// the version of lander currently set in `Cargo.toml`
const LANDER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything needed to talk to Studio, resolved from the environment,
/// the project config and the global config home.
#[derive(Debug, Clone)]
pub struct StudioClientConfig {
    endpoint: String,
    frontend: String,
    config: Config,
    version: String,
}

impl StudioClientConfig {
    /// Overrides win over project settings, which win over the production defaults.
    pub fn new(
        override_endpoint: Option<String>,
        override_frontend: Option<String>,
        project_engine: Option<&crate::dot_apollo::EngineConfig>,
        config: Config,
    ) -> StudioClientConfig {
        let version = if cfg!(debug_assertions) {
            format!("{LANDER_VERSION} (dev)")
        } else {
            LANDER_VERSION.to_string()
        };

        let endpoint = override_endpoint
            .or_else(|| project_engine.and_then(|engine| engine.endpoint.clone()))
            .unwrap_or_else(|| STUDIO_PROD_API_ENDPOINT.to_string());
        let frontend = override_frontend
            .or_else(|| project_engine.and_then(|engine| engine.frontend.clone()))
            .unwrap_or_else(|| STUDIO_PROD_FRONTEND.to_string());
        tracing::debug!(%endpoint, %frontend, %version);

        StudioClientConfig {
            endpoint,
            frontend,
            config,
            version,
        }
    }

    /// Base URL of the Studio web UI, without a trailing slash.
    pub fn frontend_url(&self) -> &str {
        self.frontend.trim_end_matches('/')
    }

    pub fn get_credential(&self, profile_name: &str) -> LanderResult<Credential> {
        Ok(Profile::get_credential(profile_name, &self.config)?)
    }

    pub fn get_client(
        &self,
        credential: Credential,
        timeout: Duration,
    ) -> LanderResult<StudioClient> {
        let endpoint = Url::parse(&self.endpoint).map_err(|source| {
            PreconditionError::InvalidUrl {
                url: self.endpoint.clone(),
                source,
            }
        })?;
        let http_service = ReqwestService::builder()
            .config(HttpServiceConfig::builder().timeout(timeout).build())
            .build()
            .map_err(LanderClientError::from)?;
        Ok(StudioClient::builder()
            .credential(credential)
            .endpoint(endpoint)
            .version(self.version.clone())
            .http_service(HttpService::from(http_service))
            .build())
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::TempDir;
    use camino::Utf8PathBuf;
    use rstest::{fixture, rstest};
    use speculoos::prelude::*;

    use super::*;
    use crate::dot_apollo::EngineConfig;

    #[fixture]
    fn config() -> Config {
        let tmp_home = TempDir::new().unwrap();
        let home = Utf8PathBuf::try_from(tmp_home.path().to_path_buf()).unwrap();
        Config::new(Some(&home), None).unwrap()
    }

    #[rstest]
    fn it_defaults_to_production(config: Config) {
        let client_config = StudioClientConfig::new(None, None, None, config);
        assert_that!(client_config.endpoint.as_str()).is_equal_to(STUDIO_PROD_API_ENDPOINT);
        assert_that!(client_config.frontend_url()).is_equal_to(STUDIO_PROD_FRONTEND);
    }

    #[rstest]
    fn project_settings_beat_defaults_and_env_beats_both(config: Config) {
        let engine = EngineConfig {
            endpoint: Some("https://engine.internal/api/graphql".to_string()),
            frontend: Some("https://studio.internal/".to_string()),
        };

        let from_project = StudioClientConfig::new(None, None, Some(&engine), config.clone());
        assert_that!(from_project.endpoint.as_str())
            .is_equal_to("https://engine.internal/api/graphql");
        assert_that!(from_project.frontend_url()).is_equal_to("https://studio.internal");

        let from_env = StudioClientConfig::new(
            Some("http://localhost:4000/graphql".to_string()),
            Some("http://localhost:3000".to_string()),
            Some(&engine),
            config,
        );
        assert_that!(from_env.endpoint.as_str()).is_equal_to("http://localhost:4000/graphql");
        assert_that!(from_env.frontend_url()).is_equal_to("http://localhost:3000");
    }

    #[rstest]
    fn it_rejects_unparseable_endpoints(config: Config) {
        let client_config =
            StudioClientConfig::new(Some("not a url".to_string()), None, None, config);
        let credential = Credential {
            api_key: "service:mygraph:abc".to_string(),
            origin: houston::CredentialOrigin::EnvVar,
        };

        let result = client_config.get_client(credential, Duration::from_secs(1));

        assert_that!(result.map(|_| ())).is_err();
    }
}
