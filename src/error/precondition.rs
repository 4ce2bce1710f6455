use camino::Utf8PathBuf;
use thiserror::Error;

/// Problems found before lander talks to Studio at all.
#[derive(Error, Debug)]
pub enum PreconditionError {
    /// No flag, project config, or graph API key named a graph.
    #[error("Could not determine which graph to list services for.")]
    NoGraphId,

    /// `.apollo/config.yaml` exists but is not valid.
    #[error("Could not parse the project configuration at {path}. {source}")]
    InvalidProjectConfig {
        path: Utf8PathBuf,
        source: serde_yaml::Error,
    },

    /// A configured Studio URL does not parse.
    #[error("\"{url}\" is not a valid URL. {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
}
