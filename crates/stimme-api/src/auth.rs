//! Admin authentication: Argon2id credential verification, opaque session
//! tokens persisted server-side, and the change-password flow. Exactly one
//! credential exists (the singleton admin row); sessions are rows in SQLite
//! and all of them are revoked when the password changes.

use argon2::password_hash::SaltString;
use argon2::password_hash::rand_core::OsRng;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use serde_json::Value;
use tracing::{error, info, warn};

use stimme_db::{Database, DbError};
use stimme_types::api::{LoginRequest, OkResponse};

use crate::response;
use crate::state::AppState;
use crate::voices::lang_of;

pub const SESSION_COOKIE: &str = "admin_session";
const SESSION_TTL_DAYS: i64 = 7;
const SESSION_MAX_AGE_SECS: i64 = SESSION_TTL_DAYS * 24 * 60 * 60;
const MIN_PASSWORD_CHARS: usize = 8;

// -- Credential helpers --

pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("password hash failed: {}", e))?;
    Ok(hash.to_string())
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

/// Create the singleton admin credential if missing. Runs once at startup,
/// before the server accepts traffic.
pub fn bootstrap_admin(db: &Database, default_password: &str) -> anyhow::Result<()> {
    if db.get_admin_hash()?.is_some() {
        return Ok(());
    }
    let hash = hash_password(default_password)?;
    if db.ensure_admin(&hash)? {
        info!("Admin credential initialized from default password");
    }
    Ok(())
}

fn new_session_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn session_expiry() -> String {
    (chrono::Utc::now() + chrono::Duration::days(SESSION_TTL_DAYS))
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

fn session_cookie(token: &str, secure: bool) -> Cookie<'static> {
    let secure_attr = if secure { "; Secure" } else { "" };
    let raw = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={SESSION_MAX_AGE_SECS}{secure_attr}"
    );
    Cookie::parse(raw).unwrap_or_else(|_| {
        // Unreachable for our own format; keep a bare cookie as fallback.
        Cookie::build((SESSION_COOKIE, token.to_string()))
            .http_only(true)
            .path("/")
            .build()
    })
}

fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}

// -- Handlers --

pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    let lang = lang_of(&headers);
    let Some(password) = req.password.filter(|p| !p.is_empty()) else {
        return response::validation("Password is required");
    };

    let token = new_session_token();
    let expires_at = session_expiry();

    let db_state = state.clone();
    let session_token = token.clone();
    let result = tokio::task::spawn_blocking(move || {
        let Some(hash) = db_state.db.get_admin_hash()? else {
            warn!("login attempted with no admin credential configured");
            return Ok(false);
        };
        if !verify_password(&password, &hash) {
            return Ok(false);
        }
        db_state.db.create_session(&session_token, &expires_at)?;
        Ok::<_, DbError>(true)
    })
    .await;

    match result {
        Ok(Ok(true)) => {
            let jar = jar.add(session_cookie(&token, state.secure_cookies));
            (jar, Json(OkResponse::new())).into_response()
        }
        Ok(Ok(false)) => response::unauthorized(),
        Ok(Err(err)) => {
            error!("login degraded: {}", err);
            response::degraded(&err, lang)
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            response::degraded(&DbError::Connection, lang)
        }
    }
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        let token = cookie.value().to_string();
        let db_state = state.clone();
        let result =
            tokio::task::spawn_blocking(move || db_state.db.delete_session(&token)).await;
        // The cookie is cleared either way; a failed row delete only means
        // the session dies at its natural expiry.
        if let Ok(Err(err)) = result {
            warn!("session delete failed on logout: {}", err);
        }
    }
    let jar = jar.remove(removal_cookie());
    (jar, Json(OkResponse::new())).into_response()
}

/// Reached only through the session gate, so arriving here *is* the answer.
/// The frontend uses this to decide between dashboard and login page.
pub async fn session() -> Response {
    Json(serde_json::json!({ "ok": true })).into_response()
}

pub async fn change_password(State(state): State<AppState>, Json(body): Json<Value>) -> Response {
    // Both spellings occur in the wild; accept either.
    let old_password = body
        .get("oldPassword")
        .or_else(|| body.get("currentPassword"))
        .and_then(Value::as_str);
    let new_password = body.get("newPassword").and_then(Value::as_str);

    let (Some(old_password), Some(new_password)) = (old_password, new_password) else {
        return response::validation("Old password and new password are required");
    };
    if new_password.chars().count() < MIN_PASSWORD_CHARS {
        return response::validation("New password must be at least 8 characters");
    }

    let old_password = old_password.to_string();
    let new_password = new_password.to_string();
    let db_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let Some(hash) = db_state.db.get_admin_hash()? else {
            return Err(DbError::NotFound);
        };
        if !verify_password(&old_password, &hash) {
            return Ok(false);
        }
        let new_hash = hash_password(&new_password).map_err(DbError::Other)?;
        db_state.db.set_admin_hash(&new_hash)?;
        // Every session dies with the old password, including the caller's.
        db_state.db.delete_all_sessions()?;
        Ok::<_, DbError>(true)
    })
    .await;

    match result {
        Ok(Ok(true)) => Json(OkResponse::new()).into_response(),
        Ok(Ok(false)) => response::validation("Old password is incorrect"),
        Ok(Err(err)) => {
            error!("password change degraded: {}", err);
            response::degraded(&err, stimme_i18n::Lang::En)
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            response::degraded(&DbError::Connection, stimme_i18n::Lang::En)
        }
    }
}
