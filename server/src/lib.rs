//! Superheroes Directory API Service
//!
//! Thin HTTP shell over the record store: routes requests to handlers, maps
//! outcomes to status codes and JSON bodies. Business rules live in
//! `heroes-core` and storage in `heroes-db`.

pub mod error;
pub mod routes;
pub mod state;

use axum::http::{header, HeaderValue, Method};
use axum::routing::get;
use axum::Router;
use std::future::Future;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

/// Browser origins allowed to call the API with credentials.
pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Initialize tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,heroes=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(filter)
        .init();
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(ALLOWED_ORIGINS.map(HeaderValue::from_static))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    use routes::superheroes::{
        create_superhero, delete_superhero, get_superhero, list_superheroes, update_superhero,
    };

    Router::new()
        .route(
            "/api/superheroes",
            get(list_superheroes).post(create_superhero),
        )
        .route(
            "/api/superheroes/{id}",
            get(get_superhero)
                .put(update_superhero)
                .delete(delete_superhero),
        )
        .route("/api/health", get(routes::health::health_check))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
/// Returns an I/O error if the listener fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Server is running on {}", addr);
    }
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
