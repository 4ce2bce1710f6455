use std::env;
use std::str::FromStr;

use camino::Utf8PathBuf;
use clap::builder::{PossibleValuesParser, TypedValueParser};
use clap::{Parser, Subcommand};
use houston::Config;
use timber::{Level, LEVELS};

use crate::command::{self, ReferenceClock};
use crate::dot_apollo::DotApollo;
use crate::error::LanderError;
use crate::options::OutputFormat;
use crate::utils::client::StudioClientConfig;
use crate::utils::env::{LanderEnv, LanderEnvKey};
use crate::LanderResult;

#[derive(Debug, Parser)]
#[command(
    name = "lander",
    version,
    about = "
Lander - lists the services that make up your federated graph

To authenticate with Apollo Studio, set APOLLO_KEY to an API key generated
in Apollo Studio.

    $ lander service list --graph my-graph@production
"
)]
pub struct Lander {
    #[command(subcommand)]
    pub command: Command,

    /// Specify lander's log level
    #[arg(
        long = "log",
        short = 'l',
        global = true,
        ignore_case = true,
        value_parser = PossibleValuesParser::new(LEVELS).try_map(|level| Level::from_str(&level))
    )]
    pub log_level: Option<Level>,

    /// Specify lander's output format
    #[arg(long = "format", global = true, value_enum, default_value_t)]
    pub format: OutputFormat,

    #[arg(skip)]
    pub env_store: LanderEnv,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Federated service commands
    Service(command::Service),
}

impl Lander {
    pub async fn run(&self) -> LanderResult<()> {
        let project = self.get_project_config()?;
        let client_config = self.get_client_config(project.as_ref())?;
        let clock = ReferenceClock::from_test_mode(self.env_store.is_set(LanderEnvKey::TestMode)?);

        match &self.command {
            Command::Service(command) => {
                command
                    .run(&client_config, project.as_ref(), self.format, clock)
                    .await
            }
        }
    }

    /// Prints `error` the way `--format` asks for.
    pub fn print_error(&self, error: &LanderError) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Plain => error.print(),
            OutputFormat::Json => {
                calm_io::stdoutln!("{}", error.get_json())?;
                Ok(())
            }
        }
    }

    pub(crate) fn get_lander_config(&self) -> LanderResult<Config> {
        let override_home: Option<Utf8PathBuf> = self
            .env_store
            .get(LanderEnvKey::ConfigHome)?
            .map(|p| Utf8PathBuf::from(&p));
        let override_api_key = self.env_store.get(LanderEnvKey::Key)?;
        Ok(Config::new(override_home.as_ref(), override_api_key)?)
    }

    pub(crate) fn get_client_config(
        &self,
        project: Option<&DotApollo>,
    ) -> LanderResult<StudioClientConfig> {
        let override_endpoint = self.env_store.get(LanderEnvKey::RegistryUrl)?;
        let override_frontend = self.env_store.get(LanderEnvKey::FrontendUrl)?;
        let config = self.get_lander_config()?;
        Ok(StudioClientConfig::new(
            override_endpoint,
            override_frontend,
            project.and_then(DotApollo::engine),
            config,
        ))
    }

    fn get_project_config(&self) -> LanderResult<Option<DotApollo>> {
        let current_dir = Utf8PathBuf::try_from(env::current_dir()?)?;
        DotApollo::read_yaml_from_fs(&current_dir)
    }
}
