use std::net::SocketAddr;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use tour_server::catalog::Catalog;
use tour_server::planner::SearchConfig;
use tour_server::transit::{ResolverConfig, TransitResolver, TransitTable};
use tour_server::web::{AppState, create_router};

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_SEARCH_TIMEOUT_SECS: u64 = 30;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog_path = std::env::var("TOUR_CATALOG").unwrap_or_else(|_| "activities.csv".into());
    let transit_path = std::env::var("TOUR_TRANSIT").unwrap_or_else(|_| "transit.json".into());
    let addr: SocketAddr = std::env::var("TOUR_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.into())
        .parse()
        .expect("TOUR_ADDR must be a socket address");
    let search_timeout = std::env::var("TOUR_SEARCH_TIMEOUT_SECS")
        .ok()
        .map(|secs| secs.parse().expect("TOUR_SEARCH_TIMEOUT_SECS must be a whole number"))
        .unwrap_or(DEFAULT_SEARCH_TIMEOUT_SECS);

    // Load the network first: every catalog station must resolve against it
    let table = TransitTable::load(&transit_path).expect("Failed to load transit network");
    info!(
        stations = table.station_count(),
        routes = table.route_count(),
        path = %transit_path,
        "loaded transit network"
    );

    let catalog = Catalog::load(&catalog_path, &table).expect("Failed to load activity catalog");
    info!(activities = catalog.len(), path = %catalog_path, "loaded activity catalog");

    let resolver = TransitResolver::new(table, &ResolverConfig::default());
    let state = AppState::new(
        catalog,
        resolver,
        SearchConfig::default(),
        Duration::from_secs(search_timeout),
    );

    let app = create_router(state);

    info!("Tour planner listening on http://{addr}");
    info!("  GET  /health        - Health check");
    info!("  GET  /activities    - Activity catalog");
    info!("  POST /tours/search  - Search for tours");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
