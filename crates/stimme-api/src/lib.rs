pub mod admin;
pub mod auth;
pub mod middleware;
pub mod response;
pub mod sanitize;
pub mod state;
pub mod voices;

use axum::Router;
use axum::routing::{get, patch, post};

pub use state::{AppState, AppStateInner};

/// Assemble the full API router. The server binary adds CORS and trace
/// layers on top; integration tests drive this router directly.
pub fn router(state: AppState) -> Router {
    let public = Router::new()
        .route(
            "/api/voices",
            get(voices::list_voices).post(voices::submit_voice),
        )
        .route("/api/admin/login", post(auth::login))
        .with_state(state.clone());

    let admin = Router::new()
        .route("/api/admin/voices", get(admin::list_voices))
        .route(
            "/api/admin/voices/{id}",
            patch(admin::patch_voice).delete(admin::delete_voice),
        )
        .route("/api/admin/session", get(auth::session))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/password", post(auth::change_password))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_admin,
        ))
        .with_state(state);

    Router::new().merge(public).merge(admin)
}
