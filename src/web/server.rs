// Passkeep — Local web server
//
// Serves the companion UI's API on loopback. Routes map 1:1 to the
// Credential Service; CORS is restricted to the local UI origins.

use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, patch, post, put};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::error::AppError;

use super::handlers::{self, AppState};

/// Default port for the companion UI API.
pub const DEFAULT_PORT: u16 = 3000;

/// Origins the companion UI may call from.
const ALLOWED_ORIGINS: &[&str] = &["http://localhost:5173", "http://127.0.0.1:5173"];

/// Build the application router.
pub fn router(service: AppState) -> Router {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/data", get(handlers::get_data))
        .route("/new-org", post(handlers::new_org))
        .route("/new-password", post(handlers::new_password))
        .route("/update-password", put(handlers::update_password))
        .route("/delete-password", delete(handlers::delete_password))
        .route("/delete-org", delete(handlers::delete_org))
        .route("/favourite", patch(handlers::favourite))
        .route("/archive", patch(handlers::archive))
        .layer(cors)
        .with_state(service)
}

/// Bind on loopback and serve until the process is terminated.
pub async fn run(service: AppState, port: u16) -> Result<(), AppError> {
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tracing::info!(port, "Passkeep web server listening on http://127.0.0.1:{port}");
    axum::serve(listener, app).await?;
    Ok(())
}
