//! Station directory error types.

use crate::rasp::{ErrorKind, RaspError};

/// Errors that can occur when looking up the station directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// Fetching the directory from the API failed
    #[error("directory fetch failed: {0}")]
    Source(#[from] RaspError),

    /// No train station with that title in that city
    #[error("station {station:?} not found in {city:?}")]
    StationNotFound { city: String, station: String },

    /// Snapshot file operation failed
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}

impl DirectoryError {
    /// Classify for user-visible error handling.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DirectoryError::Source(e) => e.kind(),
            _ => ErrorKind::Server,
        }
    }
}
