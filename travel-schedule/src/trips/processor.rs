//! Conversion of raw search responses into sorted, filtered trip lists.
//!
//! Incomplete records are skipped individually; the pipeline as a whole
//! never fails and may legitimately return an empty list.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use tracing::debug;

use crate::rasp::{Carrier, IntervalSegment, Segment, SegmentsResponse};

use super::filter::{FilterOptions, apply_filters};
use super::format::{
    clean_carrier_title, format_date, format_day_month, format_duration, format_time,
    parse_sort_key,
};
use super::trip::{CarrierSummary, TRANSFER_INFO, Trip, TripId};

/// Builds display-ready trips against a fixed "current instant".
///
/// `now` is the fallback for anything undated: it is the sort key of
/// interval segments and of unparseable timestamps, and its date is shown
/// when a timestamp carries none.
#[derive(Debug, Clone, Copy)]
pub struct TripResultProcessor {
    now: DateTime<FixedOffset>,
}

impl TripResultProcessor {
    /// Create a processor pinned to the given instant.
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self { now }
    }

    /// Create a processor pinned to the local wall clock.
    pub fn at_local_now() -> Self {
        Self::new(Local::now().fixed_offset())
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    /// Build the trip list for one search response.
    ///
    /// Direct segments come first, then interval segments; filters are
    /// applied, and the result is stably sorted by sort key.
    pub fn build_trip_list(
        &self,
        response: &SegmentsResponse,
        filters: Option<&FilterOptions>,
    ) -> Vec<Trip> {
        let direct = response.segments.iter().flatten();
        let interval = response.interval_segments.iter().flatten();

        let mut trips: Vec<Trip> = direct
            .filter_map(|s| self.normalize_segment(s))
            .chain(interval.filter_map(|s| self.normalize_interval(s)))
            .collect();

        if let Some(filters) = filters {
            trips = apply_filters(trips, filters);
        }

        trips.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));
        trips
    }

    /// Normalize a direct segment.
    ///
    /// Returns `None` when departure, arrival, duration or carrier is missing.
    pub fn normalize_segment(&self, segment: &Segment) -> Option<Trip> {
        let carrier = segment.thread.as_ref().and_then(|t| t.carrier.as_ref());

        let (Some(departure), Some(arrival), Some(duration), Some(carrier)) = (
            non_empty(segment.departure.as_deref()),
            non_empty(segment.arrival.as_deref()),
            segment.duration,
            carrier,
        ) else {
            debug!(
                thread = segment.thread.as_ref().and_then(|t| t.uid.as_deref()),
                "skipping incomplete segment"
            );
            return None;
        };

        Some(Trip {
            id: TripId::generate(),
            carrier: summarize_carrier(carrier),
            departure_time: format_time(departure),
            arrival_time: format_time(arrival),
            duration_text: format_duration(duration),
            date_text: format_date(departure, self.today()),
            has_transfers: false,
            transfer_info: None,
            sort_key: parse_sort_key(departure, self.now),
        })
    }

    /// Normalize an interval segment.
    ///
    /// Interval segments have no timestamps: the origin and destination
    /// titles stand in for departure and arrival and go through the same
    /// time formatting, which leaves ordinary place names untouched. They
    /// are dated today and sort as `now`.
    pub fn normalize_interval(&self, segment: &IntervalSegment) -> Option<Trip> {
        let origin = non_empty(segment.from.as_ref().and_then(|p| p.title.as_deref()));
        let destination = non_empty(segment.to.as_ref().and_then(|p| p.title.as_deref()));
        let carrier = segment.thread.as_ref().and_then(|t| t.carrier.as_ref());

        let (Some(origin), Some(destination), Some(duration), Some(carrier)) =
            (origin, destination, segment.duration, carrier)
        else {
            debug!("skipping incomplete interval segment");
            return None;
        };

        let has_transfers = segment.has_transfers.unwrap_or(false);

        Some(Trip {
            id: TripId::generate(),
            carrier: summarize_carrier(carrier),
            departure_time: format_time(origin),
            arrival_time: format_time(destination),
            duration_text: format_duration(duration),
            date_text: format_day_month(self.today()),
            has_transfers,
            transfer_info: has_transfers.then(|| TRANSFER_INFO.to_string()),
            sort_key: self.now,
        })
    }
}

/// Blank strings count as missing.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn summarize_carrier(carrier: &Carrier) -> CarrierSummary {
    CarrierSummary {
        title: clean_carrier_title(carrier.title.as_deref()),
        logo: carrier.logo.clone(),
        code: carrier.code,
    }
}
