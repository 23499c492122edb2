#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the contagion heat-map application.
//!
//! Serves the heat-map aggregation endpoint consumed by the mobile
//! client's map view. The position store is injected into [`AppState`]
//! at construction time, so the request path is testable against an
//! in-memory store with no backend present.

mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use contagion_map_datasource::PositionStore;
use contagion_map_datasource::memory::MemoryStore;
use std::path::Path;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    /// Source of user positions and city reference data.
    pub store: Arc<dyn PositionStore>,
}

/// Starts the contagion map API server.
///
/// Loads the snapshot-backed store (paths from `USERS_SNAPSHOT` /
/// `CITIES_SNAPSHOT`, defaulting to `data/usersposition.json` and
/// `data/cities.json`) and starts the Actix-Web HTTP server. This is a
/// regular async function — the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
///
/// # Panics
///
/// Panics if the snapshot files cannot be loaded.
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let users_path =
        std::env::var("USERS_SNAPSHOT").unwrap_or_else(|_| "data/usersposition.json".to_string());
    let cities_path =
        std::env::var("CITIES_SNAPSHOT").unwrap_or_else(|_| "data/cities.json".to_string());

    log::info!("Loading snapshot store ({users_path}, {cities_path})...");
    let store = MemoryStore::from_snapshot_files(Path::new(&users_path), Path::new(&cities_path))
        .expect("Failed to load snapshot store");

    let state = web::Data::new(AppState {
        store: Arc::new(store),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .route(
                "/heatmap/getMapElementsByPosition",
                web::post().to(handlers::map_elements_by_position),
            )
            .service(web::scope("/api").route("/health", web::get().to(handlers::health)))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
