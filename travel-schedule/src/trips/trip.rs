//! Display-ready trip records.

use std::fmt;

use chrono::{DateTime, FixedOffset};
use uuid::Uuid;

/// Annotation attached to trips that involve changing trains.
pub const TRANSFER_INFO: &str = "С пересадками";

/// Opaque identity of a trip, generated when the trip is built.
///
/// Two trips built from the same segment in different searches get
/// different ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TripId(Uuid);

impl TripId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Carrier as shown on a trip card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierSummary {
    /// Cleaned, never-empty display title.
    pub title: String,
    pub logo: Option<String>,
    /// Numeric code for looking up carrier details.
    pub code: Option<i64>,
}

impl CarrierSummary {
    /// Up to two uppercase initials, used when there is no logo.
    ///
    /// ```
    /// use travel_schedule::trips::CarrierSummary;
    ///
    /// let carrier = CarrierSummary { title: "Гранд сервис экспресс".into(), logo: None, code: None };
    /// assert_eq!(carrier.initials(), "ГС");
    /// ```
    pub fn initials(&self) -> String {
        self.title
            .split_whitespace()
            .take(2)
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// Logo URL upgraded to HTTPS, if there is a logo.
    pub fn secure_logo_url(&self) -> Option<String> {
        self.logo.as_deref().map(|url| match url.strip_prefix("http://") {
            Some(rest) => format!("https://{rest}"),
            None => url.to_string(),
        })
    }
}

/// A uniform, display-ready trip built from either kind of raw segment.
#[derive(Debug, Clone)]
pub struct Trip {
    pub id: TripId,
    pub carrier: CarrierSummary,
    /// `HH:MM`
    pub departure_time: String,
    /// `HH:MM`
    pub arrival_time: String,
    /// e.g. `"9 часов"`
    pub duration_text: String,
    /// e.g. `"1 марта"`
    pub date_text: String,
    pub has_transfers: bool,
    /// Present exactly when `has_transfers` is true.
    pub transfer_info: Option<String>,
    /// Only meaningful for ordering; not for display.
    pub sort_key: DateTime<FixedOffset>,
}

impl Trip {
    /// Whether two trips carry the same content, ignoring identity.
    pub fn same_content(&self, other: &Trip) -> bool {
        self.carrier == other.carrier
            && self.departure_time == other.departure_time
            && self.arrival_time == other.arrival_time
            && self.duration_text == other.duration_text
            && self.date_text == other.date_text
            && self.has_transfers == other.has_transfers
            && self.transfer_info == other.transfer_info
            && self.sort_key == other.sort_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carrier(title: &str, logo: Option<&str>) -> CarrierSummary {
        CarrierSummary {
            title: title.to_string(),
            logo: logo.map(str::to_string),
            code: None,
        }
    }

    #[test]
    fn initials_of_one_and_many_words() {
        assert_eq!(carrier("РЖД", None).initials(), "Р");
        assert_eq!(carrier("Северо-Западная ППК", None).initials(), "СП");
        assert_eq!(carrier("a b c", None).initials(), "AB");
        assert_eq!(carrier("", None).initials(), "");
    }

    #[test]
    fn logo_upgraded_to_https() {
        let c = carrier("РЖД", Some("http://yastat.net/rzd.svg"));
        assert_eq!(c.secure_logo_url().as_deref(), Some("https://yastat.net/rzd.svg"));

        let c = carrier("РЖД", Some("https://yastat.net/rzd.svg"));
        assert_eq!(c.secure_logo_url().as_deref(), Some("https://yastat.net/rzd.svg"));

        assert!(carrier("РЖД", None).secure_logo_url().is_none());
    }

    #[test]
    fn generated_ids_are_distinct() {
        assert_ne!(TripId::generate(), TripId::generate());
    }
}
