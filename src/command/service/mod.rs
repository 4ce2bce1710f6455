mod list;

use clap::{Parser, Subcommand};

pub(crate) use list::ReferenceClock;

use crate::dot_apollo::DotApollo;
use crate::options::OutputFormat;
use crate::utils::client::StudioClientConfig;
use crate::LanderResult;

#[derive(Debug, Clone, Parser)]
pub struct Service {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the services that make up a federated graph
    List(list::List),
}

impl Service {
    pub(crate) async fn run(
        &self,
        client_config: &StudioClientConfig,
        project: Option<&DotApollo>,
        format: OutputFormat,
        clock: ReferenceClock,
    ) -> LanderResult<()> {
        match &self.command {
            Command::List(command) => command.run(client_config, project, format, clock).await,
        }
    }
}
