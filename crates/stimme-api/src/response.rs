//! The one response envelope. Success bodies carry `ok: true`; failures are
//! `{ok: false, error: {code, message}}` with `degraded: true` added when a
//! backend failure was swallowed into a 200.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use stimme_db::DbError;
use stimme_i18n::Lang;
use stimme_types::api::ErrorResponse;
use stimme_types::error::{ApiError, ErrorCode};

pub fn error(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        ok: false,
        error: ApiError::new(code, message),
        degraded: false,
    };
    (status, Json(body)).into_response()
}

pub fn validation(message: impl Into<String>) -> Response {
    error(StatusCode::BAD_REQUEST, ErrorCode::ValidationError, message)
}

pub fn unauthorized() -> Response {
    error(
        StatusCode::UNAUTHORIZED,
        ErrorCode::Unauthorized,
        "Unauthorized",
    )
}

pub fn not_found(message: impl Into<String>) -> Response {
    error(StatusCode::NOT_FOUND, ErrorCode::NotFound, message)
}

/// Storage failure swallowed into a 200 so the caller never sees a raw
/// server error. The message is the localized retry hint.
pub fn degraded(err: &DbError, lang: Lang) -> Response {
    let body = ErrorResponse {
        ok: false,
        error: ApiError::new(db_error_code(err), stimme_i18n::text(lang, "api.degraded")),
        degraded: true,
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub fn db_error_code(err: &DbError) -> ErrorCode {
    match err {
        DbError::Locked => ErrorCode::DbLocked,
        DbError::Connection => ErrorCode::DbConnection,
        DbError::NotFound => ErrorCode::NotFound,
        DbError::Other(_) => ErrorCode::InternalError,
    }
}
