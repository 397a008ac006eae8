//! Station directory: cities, their train stations, and search codes.
//!
//! The directory is fetched from the Rasp `stations_list` endpoint once per
//! [`StationDirectory`] and optionally snapshotted to disk.

mod cache;
mod error;
mod lookup;
mod snapshot;

pub use cache::StationDirectory;
pub use error::DirectoryError;
pub use lookup::{
    DirectoryCity, DirectoryStation, cities, extract_station_name, normalize, stations_in_city,
};
pub use snapshot::{DirectorySnapshot, SnapshotConfig};
