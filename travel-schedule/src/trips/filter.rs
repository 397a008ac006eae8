//! User-selected filters over a trip list.

use std::collections::BTreeSet;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::trip::Trip;

/// Error returned when parsing an unknown filter value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid filter value: {0}")]
pub struct InvalidFilter(String);

/// Departure time-of-day bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TimeSlot {
    Morning,
    Day,
    Evening,
    Night,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 4] = [
        TimeSlot::Morning,
        TimeSlot::Day,
        TimeSlot::Evening,
        TimeSlot::Night,
    ];

    /// Half-open range of departure hours in this slot.
    pub fn hours(&self) -> Range<u32> {
        match self {
            TimeSlot::Morning => 6..12,
            TimeSlot::Day => 12..18,
            TimeSlot::Evening => 18..24,
            TimeSlot::Night => 0..6,
        }
    }

    pub fn contains_hour(&self, hour: u32) -> bool {
        self.hours().contains(&hour)
    }

    /// Label shown on the filter screen.
    pub fn label(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "Утро 06:00 - 12:00",
            TimeSlot::Day => "День 12:00 - 18:00",
            TimeSlot::Evening => "Вечер 18:00 - 00:00",
            TimeSlot::Night => "Ночь 00:00 - 06:00",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeSlot::Morning => "morning",
            TimeSlot::Day => "day",
            TimeSlot::Evening => "evening",
            TimeSlot::Night => "night",
        }
    }
}

impl FromStr for TimeSlot {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeSlot::ALL
            .into_iter()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| InvalidFilter(s.to_string()))
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the user wants options with transfers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransferPreference {
    Yes,
    No,
}

impl TransferPreference {
    /// Value of the upstream `transfers` search parameter.
    pub fn as_query_param(&self) -> bool {
        matches!(self, TransferPreference::Yes)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransferPreference::Yes => "Да",
            TransferPreference::No => "Нет",
        }
    }
}

impl FromStr for TransferPreference {
    type Err = InvalidFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "true" | "да" => Ok(TransferPreference::Yes),
            "no" | "false" | "нет" => Ok(TransferPreference::No),
            _ => Err(InvalidFilter(s.to_string())),
        }
    }
}

/// Filters chosen on the filter screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// Empty means "any time".
    pub time_slots: BTreeSet<TimeSlot>,
    pub show_transfers: Option<TransferPreference>,
}

impl FilterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(mut self, slot: TimeSlot) -> Self {
        self.time_slots.insert(slot);
        self
    }

    pub fn with_transfers(mut self, preference: TransferPreference) -> Self {
        self.show_transfers = Some(preference);
        self
    }

    /// Whether the user picked anything at all.
    pub fn has_any_selection(&self) -> bool {
        !self.time_slots.is_empty() || self.show_transfers.is_some()
    }

    /// Parse a comma-separated slot list such as `morning,evening`.
    pub fn parse_slots(list: &str) -> Result<BTreeSet<TimeSlot>, InvalidFilter> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse)
            .collect()
    }

    /// Value for the upstream `transfers` search parameter.
    pub fn transfers_param(&self) -> Option<bool> {
        self.show_transfers.map(|p| p.as_query_param())
    }

    /// Whether a single trip passes every active filter.
    pub fn matches(&self, trip: &Trip) -> bool {
        self.matches_time(trip) && self.matches_transfers(trip)
    }

    fn matches_time(&self, trip: &Trip) -> bool {
        if self.time_slots.is_empty() {
            return true;
        }
        let hour = departure_hour(&trip.departure_time);
        self.time_slots.iter().any(|slot| slot.contains_hour(hour))
    }

    fn matches_transfers(&self, trip: &Trip) -> bool {
        match self.show_transfers {
            Some(TransferPreference::No) => !trip.has_transfers,
            Some(TransferPreference::Yes) | None => true,
        }
    }
}

/// Hour before the first `:` of an `HH:MM` string; 0 when unparseable.
pub fn departure_hour(time: &str) -> u32 {
    let mut fields = time.split(':');
    match (fields.next(), fields.next()) {
        (Some(hour), Some(_)) => hour.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Keep the trips that pass `filters`, preserving order.
pub fn apply_filters(trips: Vec<Trip>, filters: &FilterOptions) -> Vec<Trip> {
    trips.into_iter().filter(|t| filters.matches(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trips::trip::{CarrierSummary, TRANSFER_INFO, TripId};
    use chrono::{FixedOffset, TimeZone};

    fn trip(departure: &str, has_transfers: bool) -> Trip {
        Trip {
            id: TripId::generate(),
            carrier: CarrierSummary {
                title: "РЖД".to_string(),
                logo: None,
                code: None,
            },
            departure_time: departure.to_string(),
            arrival_time: "23:00".to_string(),
            duration_text: "1 час".to_string(),
            date_text: "1 марта".to_string(),
            has_transfers,
            transfer_info: has_transfers.then(|| TRANSFER_INFO.to_string()),
            sort_key: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2026, 3, 1, 0, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn morning_trip_kept_by_morning_dropped_by_evening() {
        let trips = vec![trip("07:15", false)];

        let morning = FilterOptions::new().with_slot(TimeSlot::Morning);
        assert_eq!(apply_filters(trips.clone(), &morning).len(), 1);

        let evening = FilterOptions::new().with_slot(TimeSlot::Evening);
        assert!(apply_filters(trips, &evening).is_empty());
    }

    #[test]
    fn empty_slot_set_keeps_everything() {
        let trips = vec![trip("00:00", false), trip("13:00", false), trip("junk", false)];
        assert_eq!(apply_filters(trips, &FilterOptions::new()).len(), 3);
    }

    #[test]
    fn slot_boundaries_are_half_open() {
        let morning = FilterOptions::new().with_slot(TimeSlot::Morning);
        assert!(morning.matches(&trip("06:00", false)));
        assert!(morning.matches(&trip("11:59", false)));
        assert!(!morning.matches(&trip("12:00", false)));
        assert!(!morning.matches(&trip("05:59", false)));
    }

    #[test]
    fn unparseable_hour_counts_as_night() {
        let night = FilterOptions::new().with_slot(TimeSlot::Night);
        assert!(night.matches(&trip("Москва", false)));
        assert!(night.matches(&trip("xx:10", false)));

        let day = FilterOptions::new().with_slot(TimeSlot::Day);
        assert!(!day.matches(&trip("Москва", false)));
    }

    #[test]
    fn multiple_slots_are_a_union() {
        let filters = FilterOptions::new()
            .with_slot(TimeSlot::Morning)
            .with_slot(TimeSlot::Night);
        let trips = vec![
            trip("03:00", false),
            trip("14:00", false),
            trip("09:00", false),
            trip("20:00", false),
        ];

        let kept: Vec<_> = apply_filters(trips, &filters)
            .into_iter()
            .map(|t| t.departure_time)
            .collect();
        assert_eq!(kept, vec!["03:00", "09:00"]);
    }

    #[test]
    fn transfer_preference_no_drops_transfers() {
        let trips = vec![trip("10:00", true), trip("11:00", false)];

        let no = FilterOptions::new().with_transfers(TransferPreference::No);
        let kept = apply_filters(trips.clone(), &no);
        assert_eq!(kept.len(), 1);
        assert!(!kept[0].has_transfers);

        let yes = FilterOptions::new().with_transfers(TransferPreference::Yes);
        assert_eq!(apply_filters(trips, &yes).len(), 2);
    }

    #[test]
    fn selection_and_query_param() {
        assert!(!FilterOptions::new().has_any_selection());
        assert!(FilterOptions::new().with_slot(TimeSlot::Day).has_any_selection());

        let filters = FilterOptions::new().with_transfers(TransferPreference::No);
        assert!(filters.has_any_selection());
        assert_eq!(filters.transfers_param(), Some(false));
        assert_eq!(FilterOptions::new().transfers_param(), None);
    }

    #[test]
    fn parse_slot_lists() {
        let slots = FilterOptions::parse_slots("morning, Evening,,").unwrap();
        assert_eq!(
            slots.into_iter().collect::<Vec<_>>(),
            vec![TimeSlot::Morning, TimeSlot::Evening]
        );
        assert!(FilterOptions::parse_slots("").unwrap().is_empty());
        assert!(FilterOptions::parse_slots("brunch").is_err());
    }

    #[test]
    fn parse_transfer_preference() {
        assert_eq!("yes".parse::<TransferPreference>(), Ok(TransferPreference::Yes));
        assert_eq!("Нет".parse::<TransferPreference>(), Ok(TransferPreference::No));
        assert!("maybe".parse::<TransferPreference>().is_err());
    }

    #[test]
    fn departure_hour_parsing() {
        assert_eq!(departure_hour("07:15"), 7);
        assert_eq!(departure_hour("23:59"), 23);
        assert_eq!(departure_hour("7"), 0);
        assert_eq!(departure_hour(""), 0);
    }

    #[test]
    fn labels() {
        assert_eq!(TimeSlot::Evening.label(), "Вечер 18:00 - 00:00");
        assert_eq!(TransferPreference::Yes.label(), "Да");
    }
}
