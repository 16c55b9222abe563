//! Admin moderation endpoints. All of these sit behind the session gate in
//! `middleware`; unauthenticated calls never reach them.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use stimme_db::DbError;
use stimme_db::models::VoiceRow;
use stimme_db::queries::VoiceFilter;
use stimme_i18n::Lang;
use stimme_types::api::{AdminVoiceItem, OkResponse, VoiceListResponse};
use stimme_types::models::{Sort, Status};
use stimme_types::page::{PageInfo, PageParams};

use crate::response;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 20;
const MIN_MESSAGE_CHARS: usize = 20;
const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AdminListQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

fn admin_item(row: VoiceRow) -> AdminVoiceItem {
    let status = Status::parse(&row.status).unwrap_or_else(|| {
        warn!("Corrupt status {:?} on voice {}", row.status, row.id);
        Status::Pending
    });
    AdminVoiceItem {
        id: row.id,
        message: row.message,
        topic_tags: row.topic_tags,
        status,
        created_at: row.created_at,
    }
}

pub async fn list_voices(
    State(state): State<AppState>,
    Query(query): Query<AdminListQuery>,
) -> Response {
    let params = PageParams::clamped(
        query.page.as_deref(),
        query.size.as_deref(),
        DEFAULT_PAGE_SIZE,
    );
    let sort = Sort::parse(query.sort.as_deref().unwrap_or("newest"));
    // "all", absence, and unknown values all mean: no status filter.
    let filter = VoiceFilter {
        status: query.status.as_deref().and_then(Status::parse),
        search: query.search.filter(|s| !s.is_empty()),
    };

    let db_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let rows = db_state
            .db
            .list_voices(&filter, sort, params.size, params.skip())?;
        let total = db_state.db.count_voices(&filter)?;
        Ok::<_, DbError>((rows, total))
    })
    .await;

    match result {
        Ok(Ok((rows, total))) => Json(VoiceListResponse {
            ok: true,
            degraded: false,
            items: rows.into_iter().map(admin_item).collect::<Vec<_>>(),
            page: PageInfo::new(params, total),
        })
        .into_response(),
        Ok(Err(err)) => {
            error!("admin listing degraded: {}", err);
            Json(VoiceListResponse::<AdminVoiceItem> {
                ok: false,
                degraded: true,
                items: vec![],
                page: PageInfo::empty(params),
            })
            .into_response()
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            Json(VoiceListResponse::<AdminVoiceItem> {
                ok: false,
                degraded: true,
                items: vec![],
                page: PageInfo::empty(params),
            })
            .into_response()
        }
    }
}

#[derive(Debug, Serialize)]
struct VoiceUpdated {
    ok: bool,
    item: AdminVoiceItem,
}

/// Partial update: `{action: approve|reject}` and/or `{status}` and/or
/// `{message}`. A direct `status` wins over `action`; message edits are
/// re-validated and re-sanitized but never touch the status.
pub async fn patch_voice(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    let mut new_status = match body.get("action").and_then(Value::as_str) {
        Some("approve") => Some(Status::Approved),
        Some("reject") => Some(Status::Rejected),
        _ => None,
    };

    if let Some(status_value) = body.get("status") {
        match status_value.as_str().and_then(Status::parse) {
            Some(status) => new_status = Some(status),
            None => {
                return response::validation("Status must be PENDING, APPROVED, or REJECTED");
            }
        }
    }

    let mut new_message = None;
    if let Some(message_value) = body.get("message") {
        let Some(message) = message_value.as_str() else {
            return response::validation("Message must be a string");
        };
        let trimmed = message.trim();
        let chars = trimmed.chars().count();
        if chars < MIN_MESSAGE_CHARS {
            return response::validation("Message must be at least 20 characters");
        }
        if chars > MAX_MESSAGE_CHARS {
            return response::validation("Message must be less than 2000 characters");
        }
        new_message = Some(crate::sanitize::sanitize_message(trimmed));
    }

    if new_status.is_none() && new_message.is_none() {
        return response::validation("No fields to update");
    }

    let db_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        db_state
            .db
            .update_voice(&id, new_message.as_deref(), new_status)
    })
    .await;

    match result {
        Ok(Ok(row)) => Json(VoiceUpdated {
            ok: true,
            item: admin_item(row),
        })
        .into_response(),
        Ok(Err(DbError::NotFound)) => response::not_found("Voice not found"),
        Ok(Err(err)) => {
            error!("voice update degraded: {}", err);
            response::degraded(&err, Lang::En)
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            response::degraded(&DbError::Connection, Lang::En)
        }
    }
}

pub async fn delete_voice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let db_state = state.clone();
    let result = tokio::task::spawn_blocking(move || db_state.db.delete_voice(&id)).await;

    match result {
        Ok(Ok(())) => Json(OkResponse::new()).into_response(),
        Ok(Err(DbError::NotFound)) => response::not_found("Voice not found"),
        Ok(Err(err)) => {
            error!("voice delete degraded: {}", err);
            response::degraded(&err, Lang::En)
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            response::degraded(&DbError::Connection, Lang::En)
        }
    }
}
