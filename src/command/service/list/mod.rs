mod classify;
mod fetch;
mod footer;
mod table;
mod view;

use std::fmt::Display;
use std::io;
use std::time::Duration;

use chrono::{Local, TimeZone, Utc};
use clap::Parser;
use lander_client::operations::service::list::{ServiceList, ServiceListRequest};
use lander_client::shared::GraphRef;
use lander_client::StudioClient;

use self::fetch::{FetchController, FetchObserver};
pub(crate) use self::table::ReferenceClock;
use self::view::{JsonView, PlainView, ViewContext};
use crate::dot_apollo::DotApollo;
use crate::options::{GraphOpt, OutputFormat, ProfileOpt};
use crate::utils::client::StudioClientConfig;
use crate::LanderResult;

#[derive(Debug, Clone, Parser)]
pub struct List {
    #[clap(flatten)]
    graph: GraphOpt,

    #[clap(flatten)]
    profile: ProfileOpt,

    /// Seconds to wait for Apollo Studio to respond
    #[arg(long = "client-timeout", default_value = "30", value_name = "SECONDS")]
    client_timeout: u64,
}

impl List {
    pub(crate) async fn run(
        &self,
        client_config: &StudioClientConfig,
        project: Option<&DotApollo>,
        format: OutputFormat,
        clock: ReferenceClock,
    ) -> LanderResult<()> {
        let credential = client_config.get_credential(&self.profile.profile_name);
        let api_key = credential
            .as_ref()
            .ok()
            .map(|credential| credential.api_key.as_str());
        // the graph has to be known before anything goes over the wire
        let graph_ref = self
            .graph
            .resolve(project.and_then(DotApollo::graph_name), api_key)?;
        let client = client_config.get_client(credential?, self.timeout())?;

        tracing::debug!(%graph_ref, endpoint = %client.endpoint(), "listing services");
        match clock {
            // pinned clocks come with a pinned time zone so output is reproducible
            ReferenceClock::Pinned(_) => {
                self.render(&client, &graph_ref, client_config, format, clock, Utc)
                    .await
            }
            ReferenceClock::System => {
                self.render(&client, &graph_ref, client_config, format, clock, Local)
                    .await
            }
        }
    }

    const fn timeout(&self) -> Duration {
        Duration::from_secs(self.client_timeout)
    }

    async fn render<Tz>(
        &self,
        client: &StudioClient,
        graph_ref: &GraphRef,
        client_config: &StudioClientConfig,
        format: OutputFormat,
        clock: ReferenceClock,
        time_zone: Tz,
    ) -> LanderResult<()>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let context = ViewContext {
            graph_ref,
            frontend_url: client_config.frontend_url(),
            clock,
            time_zone,
        };
        match format {
            OutputFormat::Plain => {
                let mut view = PlainView::new(io::stdout(), io::stderr(), context);
                fetch_with(&mut view, client, graph_ref).await
            }
            OutputFormat::Json => {
                let mut view = JsonView::new(io::stdout(), context);
                fetch_with(&mut view, client, graph_ref).await
            }
        }
    }
}

async fn fetch_with<O: FetchObserver>(
    observer: &mut O,
    client: &StudioClient,
    graph_ref: &GraphRef,
) -> LanderResult<()> {
    let service = ServiceList::new(client.studio_graphql_service()?);
    let request = ServiceListRequest::builder()
        .graph_ref(graph_ref.clone())
        .build();
    FetchController::new(observer)
        .fetch(service, request)
        .await
        .map(|_| ())
}
