//! Axum router configuration with middleware.
//!
//! API routes are under `/api/`. Middleware: CORS, tracing.

use axum::Router;
use axum::response::Html;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route("/signup", post(handlers::signup::signup))
        .route("/code-review", post(handlers::review::code_review))
        .route("/fetch-user-chats", post(handlers::chats::fetch_user_chats));

    Router::new()
        .nest("/api", api_routes)
        .route("/", get(home))
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - Landing page.
async fn home() -> Html<&'static str> {
    Html("<h1>Welcome to CodeMentor</h1><p>AI code review assistant for beginners</p>")
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
