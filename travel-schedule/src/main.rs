use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use travel_schedule::cache::{CacheConfig, CachedScheduleClient};
use travel_schedule::directory::{DirectorySnapshot, SnapshotConfig, StationDirectory};
use travel_schedule::rasp::{MockScheduleSource, RaspClient, RaspConfig, ScheduleSource};
use travel_schedule::web::{AppState, create_router};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    // Fixture data instead of the live API
    if let Ok(dir) = std::env::var("RASP_MOCK_DIR") {
        info!(%dir, "serving mock schedule data");
        return serve(MockScheduleSource::new(&dir)?, addr).await;
    }

    let api_key = std::env::var("RASP_API_KEY").map_err(|_| "RASP_API_KEY is not set")?;
    let mut config = RaspConfig::new(api_key);
    if let Ok(base_url) = std::env::var("RASP_BASE_URL") {
        config = config.with_base_url(base_url);
    }

    serve(RaspClient::new(config)?, addr).await
}

async fn serve<S: ScheduleSource>(source: S, addr: SocketAddr) -> Result<(), Box<dyn Error>> {
    let schedule = Arc::new(CachedScheduleClient::new(source, &CacheConfig::default()));

    let mut directory = StationDirectory::new(schedule.clone());
    if let Ok(path) = std::env::var("DIRECTORY_CACHE_PATH") {
        directory = directory.with_snapshot(DirectorySnapshot::new(SnapshotConfig::new(path)));
    }

    let app = create_router(AppState::new(schedule, directory));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("travel schedule listening on http://{addr}");
    info!("  GET /health");
    info!("  GET /api/cities");
    info!("  GET /api/stations?city=");
    info!("  GET /api/trips?from=&to=[&date=][&slots=][&transfers=]");
    info!("  GET /api/carriers/{{code}}");

    axum::serve(listener, app).await?;
    Ok(())
}
