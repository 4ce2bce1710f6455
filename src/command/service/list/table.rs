use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone, Utc};
use comfy_table::Table;
use itertools::Itertools;
use lander_client::operations::service::list::ServiceRecord;
use serde::Serialize;

use crate::utils::table::get_table;

/// 2019-06-13T00:00:00Z, the instant "now" is pinned to in test mode.
const TEST_MODE_REFERENCE_SECS: i64 = 1_560_384_000;

/// Where the formatter's notion of "now" comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReferenceClock {
    System,
    Pinned(DateTime<Utc>),
}

impl ReferenceClock {
    pub(crate) fn from_test_mode(test_mode: bool) -> Self {
        if !test_mode {
            return ReferenceClock::System;
        }
        DateTime::from_timestamp(TEST_MODE_REFERENCE_SECS, 0)
            .map_or(ReferenceClock::System, ReferenceClock::Pinned)
    }

    pub(crate) fn now(&self) -> DateTime<Utc> {
        match self {
            ReferenceClock::System => Utc::now(),
            ReferenceClock::Pinned(instant) => *instant,
        }
    }
}

/// One line of the service table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct DisplayRow {
    pub(crate) name: String,
    pub(crate) url: String,
    pub(crate) last_updated: String,
}

/// Turns service records into table rows, sorted case-insensitively by name.
/// Services with equal names (ignoring case) keep the order they arrived in.
pub(crate) fn format_services<Tz>(
    services: &[ServiceRecord],
    reference_time: DateTime<Utc>,
    time_zone: &Tz,
) -> Vec<DisplayRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    services
        .iter()
        .filter_map(|service| display_row(service, reference_time, time_zone))
        .sorted_by_key(|row| row.name.to_uppercase())
        .collect()
}

fn display_row<Tz>(
    service: &ServiceRecord,
    reference_time: DateTime<Utc>,
    time_zone: &Tz,
) -> Option<DisplayRow>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut date = String::new();
    write!(
        date,
        "{}",
        service
            .updated_at
            .with_timezone(time_zone)
            .format("%-d %B %Y")
    )
    .ok()?;
    Some(DisplayRow {
        name: service.name.clone(),
        url: service.url.clone().unwrap_or_default(),
        last_updated: format!(
            "{date} ({})",
            relative_time(service.updated_at, reference_time)
        ),
    })
}

/// Describes `instant` relative to `reference` in words, e.g. "3 days ago" or "in an hour".
pub(crate) fn relative_time(instant: DateTime<Utc>, reference: DateTime<Utc>) -> String {
    let diff_ms = (instant - reference).num_milliseconds();
    let abs_ms = diff_ms.unsigned_abs() as f64;

    let seconds = (abs_ms / 1_000.0).round();
    let minutes = (abs_ms / 60_000.0).round();
    let hours = (abs_ms / 3_600_000.0).round();
    let days_exact = abs_ms / 86_400_000.0;
    let days = days_exact.round();
    // 146097 days in 400 years, 4800 months in 400 years
    let months_exact = days_exact * 4_800.0 / 146_097.0;
    let months = months_exact.round();
    let years = (months_exact / 12.0).round();

    let phrase = if seconds < 45.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        format!("{minutes} minutes")
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        format!("{hours} hours")
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        format!("{days} days")
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        format!("{months} months")
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        format!("{years} years")
    };

    if diff_ms > 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

pub(crate) fn services_table(rows: &[DisplayRow]) -> Table {
    let mut table = get_table(["Name", "URL", "Last Updated"]);
    for row in rows {
        table.add_row([&row.name, &row.url, &row.last_updated]);
    }
    table
}
