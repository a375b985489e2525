//! The interactive view: an axum server around the library.
//!
//! Routes:
//! * `GET  /` — two-pane page (preview left, summary right)
//! * `POST /documents` — multipart PDF upload; opens a session
//! * `GET  /documents/{id}/pages/{n}` — rendered PNG for page n (1-based)
//! * `POST /documents/{id}/summarize` — summarise the selected page
//! * `DELETE /documents/{id}` — drop the session and its rendered images
//!
//! Every failure is converted to a JSON error body at the handler boundary;
//! the server itself never dies on a bad upload or a rejected credential.

pub mod handlers;
pub mod state;
pub mod template;

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post};
use axum::Router;
use state::AppState;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = DefaultBodyLimit::max(state.options.upload_limit_bytes);

    Router::new()
        .route("/", get(handlers::index))
        .route("/documents", post(handlers::upload))
        .route("/documents/{id}/pages/{page}", get(handlers::page_image))
        .route("/documents/{id}/summarize", post(handlers::summarize))
        .route("/documents/{id}", delete(handlers::close))
        .layer(body_limit)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
