//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::CachedScheduleClient;
use crate::directory::StationDirectory;
use crate::rasp::ScheduleSource;

/// Shared application state.
///
/// Searches go through the cached client; the directory shares the same
/// cached client as its source.
pub struct AppState<S> {
    pub schedule: Arc<CachedScheduleClient<S>>,
    pub directory: Arc<StationDirectory<CachedScheduleClient<S>>>,
}

impl<S: ScheduleSource> AppState<S> {
    /// Create a new app state from a cached client and a directory built on it.
    pub fn new(
        schedule: Arc<CachedScheduleClient<S>>,
        directory: StationDirectory<CachedScheduleClient<S>>,
    ) -> Self {
        Self {
            schedule,
            directory: Arc::new(directory),
        }
    }

    /// State with a directory that has no disk snapshot.
    pub fn from_client(schedule: CachedScheduleClient<S>) -> Self {
        let schedule = Arc::new(schedule);
        let directory = StationDirectory::new(schedule.clone());
        Self::new(schedule, directory)
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            schedule: self.schedule.clone(),
            directory: self.directory.clone(),
        }
    }
}
