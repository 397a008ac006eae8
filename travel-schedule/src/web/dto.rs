//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::directory::{DirectoryCity, DirectoryStation};
use crate::rasp::Carrier;
use crate::trips::{CarrierSummary, Trip, clean_carrier_title};

/// Shown instead of a list when a search yields no trips.
pub const NO_TRIPS_MESSAGE: &str = "Вариантов нет";

/// Request for the stations of one city.
#[derive(Debug, Deserialize)]
pub struct StationsRequest {
    pub city: String,
}

/// Request to search for trips.
///
/// Endpoints are given either as city and station titles, resolved through
/// the directory, or directly as `from`/`to` station codes.
#[derive(Debug, Default, Deserialize)]
pub struct TripsRequest {
    pub from_city: Option<String>,
    pub from_station: Option<String>,
    pub to_city: Option<String>,
    pub to_station: Option<String>,

    /// Origin station code (e.g. `s2000002`)
    pub from: Option<String>,

    /// Destination station code
    pub to: Option<String>,

    /// Travel date as `YYYY-MM-DD`
    pub date: Option<String>,

    /// Comma-separated departure slots, e.g. `morning,evening`
    pub slots: Option<String>,

    /// `yes` or `no`
    pub transfers: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

impl From<Vec<DirectoryCity>> for CitiesResponse {
    fn from(cities: Vec<DirectoryCity>) -> Self {
        Self {
            cities: cities.into_iter().map(|c| c.title).collect(),
        }
    }
}

/// A station on the station picker.
#[derive(Debug, Serialize)]
pub struct StationView {
    pub title: String,
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationView>,
}

impl From<Vec<DirectoryStation>> for StationsResponse {
    fn from(stations: Vec<DirectoryStation>) -> Self {
        Self {
            stations: stations
                .into_iter()
                .map(|s| StationView {
                    title: s.title,
                    code: s.yandex_code,
                })
                .collect(),
        }
    }
}

/// A trip card.
#[derive(Debug, Serialize)]
pub struct TripView {
    pub id: String,

    /// Carrier display title
    pub carrier: String,

    /// HTTPS logo URL, if the carrier has one
    pub logo: Option<String>,

    /// Fallback shown in place of a missing logo
    pub initials: String,

    /// Carrier code for `/api/carriers/{code}`
    pub carrier_code: Option<i64>,

    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub date: String,
    pub has_transfers: bool,
    pub transfer_info: Option<String>,
}

impl From<&Trip> for TripView {
    fn from(trip: &Trip) -> Self {
        Self {
            id: trip.id.to_string(),
            carrier: trip.carrier.title.clone(),
            logo: trip.carrier.secure_logo_url(),
            initials: trip.carrier.initials(),
            carrier_code: trip.carrier.code,
            departure_time: trip.departure_time.clone(),
            arrival_time: trip.arrival_time.clone(),
            duration: trip.duration_text.clone(),
            date: trip.date_text.clone(),
            has_transfers: trip.has_transfers,
            transfer_info: trip.transfer_info.clone(),
        }
    }
}

/// Search results.
#[derive(Debug, Serialize)]
pub struct TripsResponse {
    pub trips: Vec<TripView>,

    /// Set only when there are no trips
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&[Trip]> for TripsResponse {
    fn from(trips: &[Trip]) -> Self {
        let message = trips.is_empty().then(|| NO_TRIPS_MESSAGE.to_string());
        Self {
            trips: trips.iter().map(TripView::from).collect(),
            message,
        }
    }
}

/// Carrier details page.
#[derive(Debug, Serialize)]
pub struct CarrierView {
    pub code: Option<i64>,
    pub title: String,
    pub logo: Option<String>,
    pub url: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub contacts: Option<String>,
    pub address: Option<String>,
}

impl From<&Carrier> for CarrierView {
    fn from(carrier: &Carrier) -> Self {
        let summary = CarrierSummary {
            title: clean_carrier_title(carrier.title.as_deref()),
            logo: carrier.logo.clone(),
            code: carrier.code,
        };
        Self {
            code: carrier.code,
            logo: summary.secure_logo_url(),
            title: summary.title,
            url: carrier.url.clone(),
            email: carrier.email.clone(),
            phone: carrier.phone.clone(),
            contacts: carrier.contacts.clone(),
            address: carrier.address.clone(),
        }
    }
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,

    /// `no_internet` or `server_error` for upstream failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
}
