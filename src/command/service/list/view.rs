use std::fmt::Display;
use std::io::{self, Write};

use chrono::TimeZone;
use lander_client::operations::service::list::ImplementingServices;
use lander_client::shared::GraphRef;
use lander_std::{hyperlink, success_checkmark, Style};
use serde::Serialize;

use super::classify::{classify, Classification};
use super::fetch::{FetchObserver, FetchState};
use super::footer::{compose, Footer};
use super::table::{format_services, services_table, DisplayRow, ReferenceClock};
use crate::command::output::JsonOutput;

/// What the views need to know about the graph being listed.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewContext<'a, Tz> {
    pub(crate) graph_ref: &'a GraphRef,
    pub(crate) frontend_url: &'a str,
    pub(crate) clock: ReferenceClock,
    pub(crate) time_zone: Tz,
}

impl<Tz> ViewContext<'_, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn rows(&self, classification: Option<&Classification<'_>>) -> Vec<DisplayRow> {
        match classification {
            Some(Classification {
                federated: true,
                is_empty: false,
                services,
            }) => format_services(services, self.clock.now(), &self.time_zone),
            _ => Vec::new(),
        }
    }

    fn footer(&self, classification: Option<&Classification<'_>>) -> Footer {
        compose(classification, &self.graph_ref.name, self.frontend_url)
    }
}

/// Human readable output: progress on `stderr`, the table and footer on `stdout`.
pub(crate) struct PlainView<'a, Out, Err, Tz> {
    stdout: Out,
    stderr: Err,
    context: ViewContext<'a, Tz>,
}

impl<'a, Out, Err, Tz> PlainView<'a, Out, Err, Tz> {
    pub(crate) const fn new(stdout: Out, stderr: Err, context: ViewContext<'a, Tz>) -> Self {
        PlainView {
            stdout,
            stderr,
            context,
        }
    }
}

impl<Out, Err, Tz> FetchObserver for PlainView<'_, Out, Err, Tz>
where
    Out: Write,
    Err: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn on_transition(&mut self, state: FetchState<'_>) -> io::Result<()> {
        let rendered = match state {
            FetchState::Loading => writeln!(
                self.stderr,
                "{} Fetching list of services for graph {}",
                Style::InfoPrefix.paint("==>"),
                Style::Link.paint(self.context.graph_ref.to_string())
            ),
            FetchState::Succeeded(implementing_services) => {
                self.render_success(implementing_services)
            }
            // the error itself is reported once the command returns
            FetchState::Failed(_) => Ok(()),
        };
        tolerate_closed_pipe(rendered)
    }
}

impl<Out, Err, Tz> PlainView<'_, Out, Err, Tz>
where
    Out: Write,
    Err: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn render_success(
        &mut self,
        implementing_services: Option<&ImplementingServices>,
    ) -> io::Result<()> {
        writeln!(
            self.stderr,
            "{} Fetched list of services for graph {}",
            success_checkmark(),
            Style::Link.paint(self.context.graph_ref.to_string())
        )?;

        let classification = classify(implementing_services);
        let rows = self.context.rows(classification.as_ref());
        if !rows.is_empty() {
            writeln!(self.stdout, "{}", services_table(&rows))?;
        }

        let footer = self.context.footer(classification.as_ref());
        if let Some(message) = footer.message {
            writeln!(self.stdout, "{}", Style::Failure.paint(message))?;
        }
        if footer.has_gap_before_link() {
            writeln!(self.stdout)?;
        }
        writeln!(self.stdout, "View full details at: {}", hyperlink(&footer.link))?;
        self.stdout.flush()
    }
}

/// A reader that hung up early (`lander service list | head -1`) is not a failure.
fn tolerate_closed_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
            tracing::debug!("output closed early, dropping the rest");
            Ok(())
        }
        result => result,
    }
}

#[derive(Debug, Serialize)]
struct ServiceListJson<'a> {
    services: Vec<DisplayRow>,
    message: Option<&'a str>,
    link: &'a str,
}

/// Machine readable output: a single JSON document on `stdout` once the fetch succeeds.
pub(crate) struct JsonView<'a, Out, Tz> {
    stdout: Out,
    context: ViewContext<'a, Tz>,
}

impl<'a, Out, Tz> JsonView<'a, Out, Tz> {
    pub(crate) const fn new(stdout: Out, context: ViewContext<'a, Tz>) -> Self {
        JsonView { stdout, context }
    }
}

impl<Out, Tz> FetchObserver for JsonView<'_, Out, Tz>
where
    Out: Write,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn on_transition(&mut self, state: FetchState<'_>) -> io::Result<()> {
        let FetchState::Succeeded(implementing_services) = state else {
            return Ok(());
        };

        let classification = classify(implementing_services);
        let footer = self.context.footer(classification.as_ref());
        let output = JsonOutput::success(ServiceListJson {
            services: self.context.rows(classification.as_ref()),
            message: footer.message,
            link: &footer.link,
        });
        let written = writeln!(self.stdout, "{}", serde_json::to_string_pretty(&output)?)
            .and_then(|()| self.stdout.flush());
        tolerate_closed_pipe(written)
    }
}
