//! Memoized station directory.

use std::sync::Arc;

use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::rasp::{ScheduleSource, StationsList};

use super::error::DirectoryError;
use super::lookup::{self, DirectoryCity, DirectoryStation};
use super::snapshot::DirectorySnapshot;

/// Station directory fetched at most once per instance.
///
/// Concurrent callers share a single in-flight fetch. A failed fetch leaves
/// nothing cached, so the next caller tries again.
pub struct StationDirectory<S> {
    source: Arc<S>,
    directory: OnceCell<Arc<StationsList>>,
    snapshot: Option<DirectorySnapshot>,
}

impl<S: ScheduleSource> StationDirectory<S> {
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            directory: OnceCell::new(),
            snapshot: None,
        }
    }

    /// Read from and write to a disk snapshot around the API fetch.
    pub fn with_snapshot(mut self, snapshot: DirectorySnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Whether the directory has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        self.directory.initialized()
    }

    /// The full directory, loading it on first use.
    pub async fn load(&self) -> Result<Arc<StationsList>, DirectoryError> {
        self.directory
            .get_or_try_init(|| self.fetch())
            .await
            .cloned()
    }

    async fn fetch(&self) -> Result<Arc<StationsList>, DirectoryError> {
        if let Some(snapshot) = &self.snapshot
            && let Some(directory) = snapshot.load()
        {
            info!(path = %snapshot.path().display(), "loaded station directory snapshot");
            return Ok(Arc::new(directory));
        }

        info!("fetching station directory");
        let directory = self.source.stations_list().await?;
        info!(countries = directory.countries.len(), "station directory loaded");

        if let Some(snapshot) = &self.snapshot
            && let Err(e) = snapshot.save(&directory)
        {
            warn!(error = %e, "failed to write station directory snapshot");
        }

        Ok(Arc::new(directory))
    }

    /// All cities, sorted.
    pub async fn cities(&self) -> Result<Vec<DirectoryCity>, DirectoryError> {
        Ok(lookup::cities(&*self.load().await?))
    }

    /// Train stations of a city, sorted for display.
    pub async fn stations_in_city(
        &self,
        city: &str,
    ) -> Result<Vec<DirectoryStation>, DirectoryError> {
        if city.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(lookup::stations_in_city(&*self.load().await?, city))
    }

    /// Search code of the station titled `station` in `city`.
    pub async fn resolve_code(&self, city: &str, station: &str) -> Result<String, DirectoryError> {
        self.stations_in_city(city)
            .await?
            .into_iter()
            .find(|s| s.title == station)
            .map(|s| s.yandex_code)
            .ok_or_else(|| DirectoryError::StationNotFound {
                city: city.to_string(),
                station: station.to_string(),
            })
    }
}
