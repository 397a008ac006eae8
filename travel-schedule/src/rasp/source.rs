//! Abstraction over where schedule data comes from.

use std::future::Future;
use std::sync::Arc;

use super::client::{RaspClient, SearchQuery};
use super::error::RaspError;
use super::types::{CarrierResponse, SegmentsResponse, StationsList};

/// Trait for providing schedule data.
///
/// Implemented by the live client, the caching wrapper and the fixture-backed
/// mock, so the directory and web layers can be exercised without network.
pub trait ScheduleSource: Send + Sync + 'static {
    /// Search for segments between two stations.
    fn search(
        &self,
        query: &SearchQuery,
    ) -> impl Future<Output = Result<Arc<SegmentsResponse>, RaspError>> + Send;

    /// Fetch the full station directory.
    fn stations_list(&self) -> impl Future<Output = Result<StationsList, RaspError>> + Send;

    /// Look up carrier details by numeric code.
    fn carrier(&self, code: i64)
    -> impl Future<Output = Result<CarrierResponse, RaspError>> + Send;
}

impl ScheduleSource for RaspClient {
    async fn search(&self, query: &SearchQuery) -> Result<Arc<SegmentsResponse>, RaspError> {
        RaspClient::search(self, query).await.map(Arc::new)
    }

    async fn stations_list(&self) -> Result<StationsList, RaspError> {
        RaspClient::stations_list(self).await
    }

    async fn carrier(&self, code: i64) -> Result<CarrierResponse, RaspError> {
        RaspClient::carrier(self, code).await
    }
}
