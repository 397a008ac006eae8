//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

use crate::directory::DirectoryError;
use crate::rasp::{ErrorKind, RaspError, ScheduleSource, SearchQuery};
use crate::trips::{FilterOptions, TransferPreference, TripResultProcessor};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S: ScheduleSource>(state: AppState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cities", get(list_cities::<S>))
        .route("/api/stations", get(list_stations::<S>))
        .route("/api/trips", get(search_trips::<S>))
        .route("/api/carriers/:code", get(carrier_details::<S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn list_cities<S: ScheduleSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<CitiesResponse>, AppError> {
    let cities = state.directory.cities().await?;
    Ok(Json(cities.into()))
}

async fn list_stations<S: ScheduleSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<StationsRequest>,
) -> Result<Json<StationsResponse>, AppError> {
    let stations = state.directory.stations_in_city(&req.city).await?;
    Ok(Json(stations.into()))
}

/// Search trips between two stations and apply the chosen filters.
async fn search_trips<S: ScheduleSource>(
    State(state): State<AppState<S>>,
    Query(req): Query<TripsRequest>,
) -> Result<Json<TripsResponse>, AppError> {
    let filters = parse_filters(&req)?;
    let (from, to) = resolve_endpoints(&state, &req).await?;

    let mut query = SearchQuery::new(from, to).with_transfers(filters.transfers_param());
    if let Some(date) = req.date.as_deref().filter(|d| !d.is_empty()) {
        NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| AppError::BadRequest {
            message: format!("Invalid date: {date}"),
        })?;
        query = query.with_date(date);
    }

    let response = state.schedule.search(&query).await?;

    let processor = TripResultProcessor::at_local_now();
    let active = filters.has_any_selection().then_some(&filters);
    let trips = processor.build_trip_list(&response, active);
    info!(from = %query.from, to = %query.to, trips = trips.len(), "trip search");

    Ok(Json(TripsResponse::from(trips.as_slice())))
}

async fn carrier_details<S: ScheduleSource>(
    State(state): State<AppState<S>>,
    Path(code): Path<i64>,
) -> Result<Json<CarrierView>, AppError> {
    let response = state.schedule.carrier(code).await?;
    let carrier = response.first().ok_or_else(|| AppError::NotFound {
        message: format!("Carrier not found: {code}"),
    })?;
    Ok(Json(CarrierView::from(carrier)))
}

fn parse_filters(req: &TripsRequest) -> Result<FilterOptions, AppError> {
    let mut filters = FilterOptions::new();

    if let Some(slots) = &req.slots {
        filters.time_slots = FilterOptions::parse_slots(slots).map_err(bad_request)?;
    }

    if let Some(transfers) = req.transfers.as_deref().filter(|t| !t.is_empty()) {
        let preference: TransferPreference = transfers.parse().map_err(bad_request)?;
        filters = filters.with_transfers(preference);
    }

    Ok(filters)
}

/// Station codes to search between.
///
/// Explicit codes win; otherwise both city and station titles are needed
/// on each side.
async fn resolve_endpoints<S: ScheduleSource>(
    state: &AppState<S>,
    req: &TripsRequest,
) -> Result<(String, String), AppError> {
    if let (Some(from), Some(to)) = (non_blank(&req.from), non_blank(&req.to)) {
        return Ok((from.to_string(), to.to_string()));
    }

    let (Some(from_city), Some(from_station), Some(to_city), Some(to_station)) = (
        non_blank(&req.from_city),
        non_blank(&req.from_station),
        non_blank(&req.to_city),
        non_blank(&req.to_station),
    ) else {
        return Err(AppError::BadRequest {
            message: "Either from/to codes or city and station on both sides are required"
                .to_string(),
        });
    };

    let from = state.directory.resolve_code(from_city, from_station).await?;
    let to = state.directory.resolve_code(to_city, to_station).await?;
    Ok((from, to))
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn bad_request(e: impl std::fmt::Display) -> AppError {
    AppError::BadRequest {
        message: e.to_string(),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Upstream { kind: ErrorKind, message: String },
}

impl From<RaspError> for AppError {
    fn from(e: RaspError) -> Self {
        match e {
            RaspError::NotFound(what) => AppError::NotFound {
                message: format!("Not found: {what}"),
            },
            _ => AppError::Upstream {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        match e {
            DirectoryError::Source(e) => e.into(),
            DirectoryError::StationNotFound { .. } => AppError::NotFound {
                message: e.to_string(),
            },
            DirectoryError::Snapshot { .. } => AppError::Upstream {
                kind: e.kind(),
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, kind) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message, None),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message, None),
            AppError::Upstream { kind, message } => {
                let status = match kind {
                    ErrorKind::NoInternet => StatusCode::SERVICE_UNAVAILABLE,
                    ErrorKind::Server => StatusCode::BAD_GATEWAY,
                };
                (status, message, Some(kind.as_str()))
            }
        };

        if is_upstream_failure(status) {
            warn!(%status, kind, "{message}");
        } else {
            debug!(%status, "{message}");
        }

        let body = Json(ErrorResponse {
            error: message,
            kind,
        });
        (status, body).into_response()
    }
}

/// Statuses logged at `warn`; the rest go to `debug`.
fn is_upstream_failure(status: StatusCode) -> bool {
    status.is_server_error()
}
