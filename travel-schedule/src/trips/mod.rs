//! Trip result pipeline.
//!
//! Turns a raw schedule search response into display-ready [`Trip`]s:
//! normalize direct and interval segments, apply the user's filters, and
//! sort by departure instant.

mod filter;
mod format;
mod processor;
mod trip;

pub use filter::{
    FilterOptions, InvalidFilter, TimeSlot, TransferPreference, apply_filters, departure_hour,
};
pub use format::{
    UNKNOWN_CARRIER, clean_carrier_title, format_date, format_day_month, format_duration,
    format_time, month_name, parse_sort_key, pluralize_hours,
};
pub use processor::TripResultProcessor;
pub use trip::{CarrierSummary, TRANSFER_INFO, Trip, TripId};
