//! Schedule assembly.
//!
//! Runs the whole lookup for one show: roster, rider matching, class list,
//! then each matched rider's rides, strictly one request at a time.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::ShowConfig;
use crate::foxvillage::{
    CLASS_DATA_KEY, ClassRecord, FetchError, Payload, RIDER_DATA_KEY, RIDER_PAGE_DATA_KEY,
    RawScheduleEntry, RosterEntry, ShowSource,
};

use super::classes::{ClassLookup, ClassMapping, build_class_lookup, format_class_string};
use super::matcher::{MatchedRider, find_riders_by_names};
use super::normalize::{
    DateTimeError, UNPARSED_PLACEHOLDER, extract_class_number, format_time, french_day,
    normalize_ring_name,
};

/// Default pause between two rider fetches.
pub const DEFAULT_PACING: Duration = Duration::from_millis(500);

/// One ride on the final schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub rider_name: String,
    pub rider_id: i64,
    pub class: String,
    pub ring: String,
    /// Weekday name, see [`french_day`](super::french_day).
    pub day: String,
    /// Local `HH:MM`.
    pub time: String,
}

/// Errors that abort a run.
///
/// Everything after the roster fetch degrades to partial results instead.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("failed to fetch roster for show {show_id}: {source}")]
    Roster {
        show_id: u64,
        #[source]
        source: FetchError,
    },
}

/// Builds a show schedule from a [`ShowSource`].
#[derive(Debug, Clone)]
pub struct ScheduleAssembler<S> {
    source: S,
    pacing: Duration,
}

impl<S: ShowSource> ScheduleAssembler<S> {
    /// Create an assembler with the default pacing delay.
    pub fn new(source: S) -> Self {
        Self {
            source,
            pacing: DEFAULT_PACING,
        }
    }

    /// Set the pause between rider fetches.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn pacing(&self) -> Duration {
        self.pacing
    }

    /// Assemble the schedule of every configured rider found on the roster.
    ///
    /// Rows are ordered by rider (in match order), then by ride as listed
    /// by the API. Only a failed roster fetch is an error: a missing class
    /// list leaves labels undecorated, and a failed rider fetch only drops
    /// that rider's rows.
    pub async fn run(&self, config: &ShowConfig) -> Result<Vec<ScheduleRow>, ScheduleError> {
        if config.rider_names.is_empty() {
            info!("no rider names configured");
            return Ok(Vec::new());
        }

        let show_id = config.show_id;
        info!(show_id, riders = ?config.rider_names, "looking up riders");

        let roster_payload = self
            .source
            .roster(show_id)
            .await
            .map_err(|source| ScheduleError::Roster { show_id, source })?;
        let roster: Vec<RosterEntry> = records_or_empty(roster_payload, RIDER_DATA_KEY);
        info!(count = roster.len(), "loaded roster");

        let riders = find_riders_by_names(&roster, &config.rider_names);
        if riders.is_empty() {
            info!("no matching riders found");
            return Ok(Vec::new());
        }

        let lookup = match self.source.classes(show_id).await {
            Ok(payload) => build_class_lookup(records_or_empty::<ClassRecord>(payload, CLASS_DATA_KEY)),
            Err(e) => {
                warn!(show_id, error = %e, "failed to fetch class list, using bare class numbers");
                ClassLookup::new()
            }
        };
        info!(count = lookup.len(), "loaded class definitions");

        let mut rows = Vec::new();

        for (index, rider) in riders.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.pacing).await;
            }

            info!(rider = %rider.rider_name, rider_id = rider.rider_id, "fetching rider schedule");

            match self.source.rider_schedule(show_id, rider.rider_id).await {
                Ok(payload) => {
                    let entries = records_or_empty(payload, RIDER_PAGE_DATA_KEY);
                    let new_rows = rider_rows(rider, entries, &lookup, &config.class_mapping);
                    info!(rider = %rider.rider_name, count = new_rows.len(), "got rides");
                    rows.extend(new_rows);
                }
                Err(e) => {
                    warn!(rider = %rider.rider_name, rider_id = rider.rider_id, error = %e, "failed to fetch rider schedule");
                }
            }
        }

        info!(rows = rows.len(), riders = riders.len(), "schedule assembled");
        Ok(rows)
    }
}

/// Convert one rider's raw rides into schedule rows, in source order.
pub fn rider_rows(
    rider: &MatchedRider,
    entries: Vec<RawScheduleEntry>,
    lookup: &ClassLookup,
    mapping: &ClassMapping,
) -> Vec<ScheduleRow> {
    entries
        .into_iter()
        .map(|entry| {
            let class_id = extract_class_number(entry.class_text.as_deref().unwrap_or_default());
            let class = format_class_string(class_id, entry.test.as_deref(), lookup, mapping);

            let day = french_day(entry.day.as_deref().unwrap_or_default()).map(str::to_string);
            let time = format_time(entry.ride_time.as_deref().unwrap_or_default());

            ScheduleRow {
                rider_name: rider.rider_name.clone(),
                rider_id: rider.rider_id,
                day: or_placeholder(day, rider, &class, "day"),
                time: or_placeholder(time, rider, &class, "time"),
                ring: normalize_ring_name(entry.ring.as_deref().unwrap_or_default()).to_string(),
                class,
            }
        })
        .collect()
}

fn or_placeholder(
    value: Result<String, DateTimeError>,
    rider: &MatchedRider,
    class: &str,
    field: &'static str,
) -> String {
    value.unwrap_or_else(|e| {
        warn!(rider = %rider.rider_name, class, field, error = %e, "unparseable ride value");
        UNPARSED_PLACEHOLDER.to_string()
    })
}

fn records_or_empty<T: DeserializeOwned>(payload: Payload, key: &'static str) -> Vec<T> {
    payload.into_records(key).unwrap_or_else(|e| {
        warn!(key, error = %e, "unexpected response shape, treating as empty");
        Vec::new()
    })
}
