//! Rasp API response DTOs.
//!
//! These types map directly to the Yandex Rasp v3.0 JSON responses.
//! Nearly every field is `Option` because the API omits fields freely
//! and the pipeline is expected to skip incomplete records, not fail.

use serde::{Deserialize, Deserializer, Serialize};

/// Response from `/v3.0/search/`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SegmentsResponse {
    /// Direct point-to-point segments.
    pub segments: Option<Vec<Segment>>,

    /// Multi-leg options summarized as one row each.
    pub interval_segments: Option<Vec<IntervalSegment>>,

    /// Paging information for the result set.
    pub pagination: Option<Pagination>,
}

/// A direct trip leg.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Segment {
    /// Departure timestamp, e.g. `2026-03-01T22:30:00+03:00` or `2026-03-01 22:30`.
    pub departure: Option<String>,

    /// Arrival timestamp, same formats as `departure`.
    pub arrival: Option<String>,

    /// Trip duration in seconds.
    #[serde(default, deserialize_with = "seconds")]
    pub duration: Option<i64>,

    /// Departure point.
    pub from: Option<Place>,

    /// Arrival point.
    pub to: Option<Place>,

    /// The train thread, which carries the carrier reference.
    pub thread: Option<Thread>,

    /// Whether the API itself reports transfers on this leg.
    pub has_transfers: Option<bool>,

    /// Date the thread starts running.
    pub start_date: Option<String>,
}

/// A multi-leg option without per-leg detail.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IntervalSegment {
    /// Origin point. Only the title is used downstream.
    pub from: Option<Place>,

    /// Destination point.
    pub to: Option<Place>,

    /// Aggregate duration in seconds.
    #[serde(default, deserialize_with = "seconds")]
    pub duration: Option<i64>,

    /// Thread summary carrying the carrier reference.
    pub thread: Option<Thread>,

    /// Whether the option involves changing trains.
    pub has_transfers: Option<bool>,
}

/// A station or settlement referenced by a segment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Place {
    pub code: Option<String>,
    pub title: Option<String>,
    pub station_type: Option<String>,
    pub transport_type: Option<String>,
}

/// A train thread (one scheduled run).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Thread {
    pub uid: Option<String>,
    pub title: Option<String>,
    pub number: Option<String>,
    pub transport_type: Option<String>,
    pub carrier: Option<Carrier>,
}

/// Carrier reference as embedded in segments and the carrier endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Carrier {
    /// Numeric carrier code, usable with `/v3.0/carrier/`.
    pub code: Option<i64>,
    pub title: Option<String>,
    pub logo: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contacts: Option<String>,
    pub address: Option<String>,
}

/// Paging block of a search response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pagination {
    pub total: Option<u32>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

/// Response from `/v3.0/carrier/`.
///
/// The API returns `carrier` for a single match and `carriers` when the
/// code is ambiguous across coding systems.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CarrierResponse {
    pub carrier: Option<Carrier>,
    pub carriers: Option<Vec<Carrier>>,
}

impl CarrierResponse {
    /// The first carrier in the response, whichever shape it came in.
    pub fn first(&self) -> Option<&Carrier> {
        self.carrier
            .as_ref()
            .or_else(|| self.carriers.as_ref().and_then(|c| c.first()))
    }
}

/// Response from `/v3.0/stations_list/`: the full station directory.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StationsList {
    #[serde(default)]
    pub countries: Vec<Country>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Country {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub regions: Vec<Region>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Region {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settlement {
    #[serde(default)]
    pub title: String,
    pub popular_title: Option<String>,
    pub short_title: Option<String>,
    #[serde(default)]
    pub stations: Vec<DirectoryStationDto>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoryStationDto {
    pub title: Option<String>,
    pub short_title: Option<String>,
    pub transport_type: Option<String>,
    pub station_type: Option<String>,
    pub codes: Option<StationCodes>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StationCodes {
    pub yandex_code: Option<String>,
    pub esr_code: Option<String>,
}

/// Durations arrive as JSON numbers that are sometimes fractional (`35100.0`).
fn seconds<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| v as i64))
}
