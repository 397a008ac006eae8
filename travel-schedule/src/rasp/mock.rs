//! Mock schedule source for running without API access.
//!
//! Loads a sample search response and station directory from JSON files
//! and serves them as if they were live API responses.

use std::path::Path;
use std::sync::Arc;

use super::client::SearchQuery;
use super::error::RaspError;
use super::source::ScheduleSource;
use super::types::{CarrierResponse, SegmentsResponse, StationsList};

/// Mock source that serves data from JSON files.
///
/// Expects `search.json` and `stations_list.json` in the data directory.
/// Every search returns the same response regardless of the stations asked
/// for; carriers are looked up among those appearing in that response.
#[derive(Debug, Clone)]
pub struct MockScheduleSource {
    search: Arc<SegmentsResponse>,
    stations: StationsList,
}

impl MockScheduleSource {
    /// Create a new mock source by loading JSON files from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, RaspError> {
        let data_dir = data_dir.as_ref();
        let search: SegmentsResponse = load(&data_dir.join("search.json"))?;
        let stations: StationsList = load(&data_dir.join("stations_list.json"))?;

        Ok(Self {
            search: Arc::new(search),
            stations,
        })
    }

    /// Build a mock from in-memory responses.
    pub fn from_parts(search: SegmentsResponse, stations: StationsList) -> Self {
        Self {
            search: Arc::new(search),
            stations,
        }
    }
}

fn load<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, RaspError> {
    let json = std::fs::read_to_string(path).map_err(|e| RaspError::Api {
        status: 0,
        message: format!("Failed to read {:?}: {}", path, e),
    })?;

    serde_json::from_str(&json).map_err(|e| RaspError::Json {
        message: format!("Failed to parse {:?}: {}", path, e),
        body: None,
    })
}

impl ScheduleSource for MockScheduleSource {
    async fn search(&self, _query: &SearchQuery) -> Result<Arc<SegmentsResponse>, RaspError> {
        Ok(self.search.clone())
    }

    async fn stations_list(&self) -> Result<StationsList, RaspError> {
        Ok(self.stations.clone())
    }

    async fn carrier(&self, code: i64) -> Result<CarrierResponse, RaspError> {
        let direct = self.search.segments.iter().flatten().map(|s| &s.thread);
        let interval = self
            .search
            .interval_segments
            .iter()
            .flatten()
            .map(|s| &s.thread);

        direct
            .chain(interval)
            .flatten()
            .filter_map(|t| t.carrier.as_ref())
            .find(|c| c.code == Some(code))
            .map(|c| CarrierResponse {
                carrier: Some(c.clone()),
                carriers: None,
            })
            .ok_or_else(|| RaspError::NotFound(format!("carrier {code}")))
    }
}
