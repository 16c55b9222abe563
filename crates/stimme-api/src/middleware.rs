use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::extract::cookie::CookieJar;
use tracing::{error, warn};

use crate::auth::SESSION_COOKIE;
use crate::response;
use crate::state::AppState;

/// Session gate for every `/api/admin/*` route except login. The cookie's
/// token must match a live (unexpired) session row; anything else is a 401.
/// A storage failure during the check also fails closed.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return response::unauthorized();
    };
    let token = cookie.value().to_string();

    let db_state = state.clone();
    let result =
        tokio::task::spawn_blocking(move || db_state.db.get_live_session(&token)).await;

    match result {
        Ok(Ok(Some(_session))) => next.run(req).await,
        Ok(Ok(None)) => response::unauthorized(),
        Ok(Err(err)) => {
            warn!("session check failed closed: {}", err);
            response::unauthorized()
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            response::unauthorized()
        }
    }
}
