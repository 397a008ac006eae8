//! Yandex Rasp (schedule API) client.
//!
//! This module provides an HTTP client for the Rasp v3.0 API, which serves
//! point-to-point schedule searches, carrier details and the station
//! directory.
//!
//! Key characteristics of Rasp:
//! - Authentication is an `apikey` query parameter, not a header
//! - Searches return two arrays: direct `segments` and multi-leg
//!   `interval_segments`, the latter without precise timestamps
//! - The station directory is one large response covering every country

mod client;
mod error;
mod mock;
mod source;
mod types;

pub use client::{RaspClient, RaspConfig, SearchQuery};
pub use error::{ErrorKind, RaspError};
pub use mock::MockScheduleSource;
pub use source::ScheduleSource;
pub use types::{
    Carrier, CarrierResponse, Country, DirectoryStationDto,
    IntervalSegment, Pagination, Place, Region, Segment, SegmentsResponse, Settlement,
    StationCodes, StationsList, Thread,
};
