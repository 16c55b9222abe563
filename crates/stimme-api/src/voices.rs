//! Public endpoints: anonymous submission intake and the approved-only
//! listing. Both carry the never-500 guarantee — storage failures come back
//! as 200 with `degraded: true`, and only malformed input produces a 4xx.

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::Value;
use tracing::error;
use uuid::Uuid;

use stimme_db::queries::VoiceFilter;
use stimme_i18n::{Lang, text};
use stimme_types::api::{SubmitAck, VoiceItem, VoiceListResponse};
use stimme_types::models::Sort;
use stimme_types::page::{PageInfo, PageParams};

use crate::response;
use crate::state::AppState;

const DEFAULT_PAGE_SIZE: u32 = 12;
const MIN_MESSAGE_CHARS: usize = 20;
const MAX_MESSAGE_CHARS: usize = 2000;

/// Raw query strings, parsed leniently: garbage never 400s a listing,
/// it just falls back to defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub page: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
}

pub fn lang_of(headers: &HeaderMap) -> Lang {
    Lang::from_accept_language(
        headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|v| v.to_str().ok()),
    )
}

pub async fn list_voices(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let params = PageParams::clamped(
        query.page.as_deref(),
        query.size.as_deref(),
        DEFAULT_PAGE_SIZE,
    );
    let sort = Sort::parse(query.sort.as_deref().unwrap_or("newest"));

    let db_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let filter = VoiceFilter::approved();
        let rows = db_state
            .db
            .list_voices(&filter, sort, params.size, params.skip())?;
        let total = db_state.db.count_voices(&filter)?;
        Ok::<_, stimme_db::DbError>((rows, total))
    })
    .await;

    match result {
        Ok(Ok((rows, total))) => {
            let items = rows
                .into_iter()
                .map(|row| VoiceItem {
                    id: row.id,
                    message: row.message,
                    topic_tags: row.topic_tags,
                    created_at: row.created_at,
                })
                .collect();
            Json(VoiceListResponse {
                ok: true,
                degraded: false,
                items,
                page: PageInfo::new(params, total),
            })
            .into_response()
        }
        Ok(Err(err)) => {
            error!("public listing degraded: {}", err);
            degraded_list(params)
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            degraded_list(params)
        }
    }
}

fn degraded_list(params: PageParams) -> Response {
    Json(VoiceListResponse::<VoiceItem> {
        ok: false,
        degraded: true,
        items: vec![],
        page: PageInfo::empty(params),
    })
    .into_response()
}

pub async fn submit_voice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let lang = lang_of(&headers);

    // Manual field extraction so a missing or non-string message is our
    // VALIDATION_ERROR, not a framework deserialization reject.
    let Some(message) = body.get("message").and_then(Value::as_str) else {
        return response::validation(text(lang, "api.submit.required"));
    };

    let trimmed = message.trim();
    let chars = trimmed.chars().count();
    if chars < MIN_MESSAGE_CHARS {
        return response::validation(text(lang, "api.submit.tooShort"));
    }
    if chars > MAX_MESSAGE_CHARS {
        return response::validation(text(lang, "api.submit.tooLong"));
    }

    let sanitized = crate::sanitize::sanitize_message(trimmed);
    let tags = body
        .get("topicTags")
        .and_then(Value::as_str)
        .and_then(crate::sanitize::sanitize_tags);

    let id = Uuid::new_v4().to_string();
    let db_state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        db_state.db.insert_voice(&id, &sanitized, tags.as_deref())
    })
    .await;

    match result {
        Ok(Ok(())) => Json(SubmitAck {
            ok: true,
            pending: true,
            message: text(lang, "api.submit.pending"),
        })
        .into_response(),
        Ok(Err(err)) => {
            error!("voice insert degraded: {}", err);
            response::degraded(&err, lang)
        }
        Err(join_err) => {
            error!("spawn_blocking join error: {}", join_err);
            response::degraded(&stimme_db::DbError::Connection, lang)
        }
    }
}
