//! Rasp HTTP client.
//!
//! Provides async methods for the handful of Yandex Rasp v3.0 endpoints the
//! application uses. Every request carries the API key, `format=json` and the
//! configured language.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use super::error::RaspError;
use super::types::{CarrierResponse, SegmentsResponse, StationsList};

/// Default base URL for the Rasp API.
const DEFAULT_BASE_URL: &str = "https://api.rasp.yandex.net";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Default response language.
const DEFAULT_LANG: &str = "ru_RU";

/// Default page size for searches; large enough to get a whole day.
const DEFAULT_SEARCH_LIMIT: u32 = 1000;

/// Configuration for the Rasp client.
#[derive(Debug, Clone)]
pub struct RaspConfig {
    /// API key, sent as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API (defaults to production Rasp)
    pub base_url: String,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Response language, e.g. `ru_RU`
    pub lang: String,
}

impl RaspConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
            lang: DEFAULT_LANG.to_string(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set response language.
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }
}

/// Parameters of a schedule search between two stations.
///
/// Doubles as the cache key for [`crate::cache::CachedScheduleClient`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    /// Origin station code (e.g. `s9600213`)
    pub from: String,
    /// Destination station code
    pub to: String,
    /// Travel date as `YYYY-MM-DD`; all dates when absent
    pub date: Option<String>,
    /// Comma-separated transport types
    pub transport_types: String,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
    pub result_timezone: Option<String>,
    /// Whether to include options with transfers
    pub transfers: Option<bool>,
}

impl SearchQuery {
    /// Train search between two station codes with the app's defaults.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            date: None,
            transport_types: "train".to_string(),
            offset: None,
            limit: Some(DEFAULT_SEARCH_LIMIT),
            result_timezone: None,
            transfers: None,
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_transfers(mut self, transfers: Option<bool>) -> Self {
        self.transfers = transfers;
        self
    }

    /// Query parameters specific to this search.
    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("from", self.from.clone()),
            ("to", self.to.clone()),
            ("transport_types", self.transport_types.clone()),
        ];
        if let Some(date) = &self.date {
            params.push(("date", date.clone()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(tz) = &self.result_timezone {
            params.push(("result_timezone", tz.clone()));
        }
        if let Some(transfers) = self.transfers {
            params.push(("transfers", transfers.to_string()));
        }
        params
    }
}

/// Rasp API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct RaspClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    lang: String,
    semaphore: Arc<Semaphore>,
}

impl RaspClient {
    /// Create a new Rasp client with the given configuration.
    pub fn new(config: RaspConfig) -> Result<Self, RaspError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
            lang: config.lang,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }

    /// Search for schedule segments between two stations.
    pub async fn search(&self, query: &SearchQuery) -> Result<SegmentsResponse, RaspError> {
        self.get_json("/v3.0/search/", &query.params()).await
    }

    /// Get carrier details by numeric code.
    pub async fn carrier(&self, code: i64) -> Result<CarrierResponse, RaspError> {
        let response: CarrierResponse = self
            .get_json("/v3.0/carrier/", &[("code", code.to_string())])
            .await?;

        if response.first().is_none() {
            return Err(RaspError::NotFound(format!("carrier {code}")));
        }
        Ok(response)
    }

    /// Fetch the full station directory.
    ///
    /// This is a multi-megabyte response; callers should cache it.
    pub async fn stations_list(&self) -> Result<StationsList, RaspError> {
        self.get_json("/v3.0/stations_list/", &[]).await
    }

    /// Issue a GET and decode a JSON body, mapping status codes to errors.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&'static str, String)],
    ) -> Result<T, RaspError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| RaspError::Api {
                status: 0,
                message: "Semaphore closed".to_string(),
            })?;

        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "rasp request");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("format", "json"),
                ("lang", self.lang.as_str()),
            ])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(RaspError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RaspError::RateLimited);
        }

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RaspError::NotFound(path.to_string()));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), %url, "rasp returned error status");
            return Err(RaspError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| RaspError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasp::ErrorKind;
    use axum::{Router, extract::Query, http::StatusCode, routing::get};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    #[test]
    fn config_builder() {
        let config = RaspConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_max_concurrent(10)
            .with_timeout(60)
            .with_lang("uk_UA");

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 10);
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.lang, "uk_UA");
    }

    #[test]
    fn config_defaults() {
        let config = RaspConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.lang, "ru_RU");
    }

    #[test]
    fn client_creation_trims_trailing_slash() {
        let config = RaspConfig::new("test-key").with_base_url("http://localhost:8080/");
        let client = RaspClient::new(config).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn search_params_include_only_set_fields() {
        let query = SearchQuery::new("s1", "s2");
        let params = query.params();

        assert!(params.contains(&("from", "s1".to_string())));
        assert!(params.contains(&("to", "s2".to_string())));
        assert!(params.contains(&("transport_types", "train".to_string())));
        assert!(params.contains(&("limit", "1000".to_string())));
        assert!(!params.iter().any(|(k, _)| *k == "date" || *k == "transfers"));

        let query = SearchQuery::new("s1", "s2")
            .with_date("2026-03-01")
            .with_transfers(Some(false));
        let params = query.params();
        assert!(params.contains(&("date", "2026-03-01".to_string())));
        assert!(params.contains(&("transfers", "false".to_string())));
    }

    /// Serve `app` on an ephemeral local port and point a client at it.
    async fn client_for(app: Router) -> RaspClient {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = RaspConfig::new("test-key").with_base_url(format!("http://{addr}"));
        RaspClient::new(config).unwrap()
    }

    /// Client for a server that answers every request with `status` and `body`.
    async fn client_answering(status: StatusCode, body: &str) -> RaspClient {
        let body = body.to_string();
        let app = Router::new().fallback(move || {
            let body = body.clone();
            async move { (status, body) }
        });
        client_for(app).await
    }

    #[tokio::test]
    async fn sends_credentials_and_decodes_search() {
        let app = Router::new().route(
            "/v3.0/search/",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let expected = [
                    ("apikey", "test-key"),
                    ("format", "json"),
                    ("lang", "ru_RU"),
                    ("from", "s1"),
                    ("to", "s2"),
                    ("date", "2026-03-01"),
                ];
                let ok = expected
                    .iter()
                    .all(|(k, v)| params.get(*k).map(String::as_str) == Some(*v));
                if ok {
                    (StatusCode::OK, r#"{"segments": [{"duration": 3600.0}]}"#)
                } else {
                    (StatusCode::BAD_REQUEST, "missing params")
                }
            }),
        );
        let client = client_for(app).await;

        let query = SearchQuery::new("s1", "s2").with_date("2026-03-01");
        let response = client.search(&query).await.unwrap();
        let segments = response.segments.unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].duration, Some(3600));
    }

    #[tokio::test]
    async fn auth_failures_are_unauthorized() {
        for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
            let client = client_answering(status, "denied").await;
            let err = client.stations_list().await.unwrap_err();
            assert!(matches!(err, RaspError::Unauthorized), "{status}: {err:?}");
        }
    }

    #[tokio::test]
    async fn missing_resource_is_not_found() {
        let client = client_answering(StatusCode::NOT_FOUND, "").await;
        let err = client.stations_list().await.unwrap_err();
        assert!(matches!(err, RaspError::NotFound(ref path) if path == "/v3.0/stations_list/"));
    }

    #[tokio::test]
    async fn too_many_requests_is_rate_limited() {
        let client = client_answering(StatusCode::TOO_MANY_REQUESTS, "slow down").await;
        let err = client.search(&SearchQuery::new("s1", "s2")).await.unwrap_err();
        assert!(matches!(err, RaspError::RateLimited));
    }

    #[tokio::test]
    async fn other_error_status_keeps_body() {
        let client = client_answering(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;
        let err = client.stations_list().await.unwrap_err();

        match err {
            RaspError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "boom");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert_eq!(
            RaspError::Api {
                status: 500,
                message: String::new()
            }
            .kind(),
            ErrorKind::Server
        );
    }

    #[tokio::test]
    async fn undecodable_body_is_json_error() {
        let client = client_answering(StatusCode::OK, "not json").await;
        let err = client.stations_list().await.unwrap_err();
        assert!(matches!(err, RaspError::Json { body: Some(ref b), .. } if b == "not json"));
    }

    #[tokio::test]
    async fn json_error_body_is_truncated() {
        let long = "я".repeat(800);
        let client = client_answering(StatusCode::OK, &long).await;

        match client.stations_list().await.unwrap_err() {
            RaspError::Json { body: Some(body), .. } => assert_eq!(body.chars().count(), 500),
            other => panic!("expected Json error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn carrier_without_data_is_not_found() {
        let client = client_answering(StatusCode::OK, r#"{"carriers": []}"#).await;
        let err = client.carrier(112).await.unwrap_err();
        assert!(matches!(err, RaspError::NotFound(ref what) if what == "carrier 112"));
    }
}
