use rusqlite::{Connection, params, params_from_iter};

use stimme_types::models::{Sort, Status};

use crate::models::{SessionRow, VoiceRow};
use crate::{Database, DbError, DbResult, now_string};

/// Filter for the admin listing. The public listing uses
/// `VoiceFilter::approved()`.
#[derive(Debug, Default, Clone)]
pub struct VoiceFilter {
    pub status: Option<Status>,
    pub search: Option<String>,
}

impl VoiceFilter {
    pub fn approved() -> Self {
        VoiceFilter {
            status: Some(Status::Approved),
            search: None,
        }
    }
}

impl Database {
    // -- Voices --

    pub fn insert_voice(
        &self,
        id: &str,
        message: &str,
        topic_tags: Option<&str>,
    ) -> DbResult<()> {
        self.with_retry(|conn| {
            conn.execute(
                "INSERT INTO voices (id, message, topic_tags, status, created_at)
                 VALUES (?1, ?2, ?3, 'PENDING', ?4)",
                params![id, message, topic_tags, now_string()],
            )?;
            Ok(())
        })
    }

    pub fn get_voice(&self, id: &str) -> DbResult<Option<VoiceRow>> {
        self.with_retry(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, message, topic_tags, status, created_at FROM voices WHERE id = ?1",
            )?;
            stmt.query_row([id], voice_from_row).optional()
        })
    }

    pub fn list_voices(
        &self,
        filter: &VoiceFilter,
        sort: Sort,
        limit: u32,
        offset: u64,
    ) -> DbResult<Vec<VoiceRow>> {
        self.with_retry(|conn| query_voices(conn, filter, sort, limit, offset))
    }

    pub fn count_voices(&self, filter: &VoiceFilter) -> DbResult<u64> {
        self.with_retry(|conn| {
            let (where_sql, binds) = where_clause(filter);
            let sql = format!("SELECT COUNT(*) FROM voices{where_sql}");
            let count: u64 =
                conn.query_row(&sql, params_from_iter(binds.iter()), |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Partial update of message and/or status. At least one field must be
    /// set; an unknown id is `DbError::NotFound`. Returns the updated row.
    pub fn update_voice(
        &self,
        id: &str,
        message: Option<&str>,
        status: Option<Status>,
    ) -> DbResult<VoiceRow> {
        if message.is_none() && status.is_none() {
            return Err(DbError::Other(anyhow::anyhow!("empty voice update")));
        }

        self.with_retry(|conn| {
            let mut sets = Vec::new();
            let mut binds: Vec<String> = Vec::new();
            if let Some(m) = message {
                sets.push("message = ?");
                binds.push(m.to_string());
            }
            if let Some(s) = status {
                sets.push("status = ?");
                binds.push(s.as_str().to_string());
            }
            binds.push(id.to_string());

            let sql = format!("UPDATE voices SET {} WHERE id = ?", sets.join(", "));
            let affected = conn.execute(&sql, params_from_iter(binds.iter()))?;
            if affected == 0 {
                return Err(DbError::NotFound);
            }

            let mut stmt = conn.prepare(
                "SELECT id, message, topic_tags, status, created_at FROM voices WHERE id = ?1",
            )?;
            Ok(stmt.query_row([id], voice_from_row)?)
        })
    }

    pub fn delete_voice(&self, id: &str) -> DbResult<()> {
        self.with_retry(|conn| {
            let affected = conn.execute("DELETE FROM voices WHERE id = ?1", [id])?;
            if affected == 0 {
                return Err(DbError::NotFound);
            }
            Ok(())
        })
    }

    // -- Admin credential --

    pub fn get_admin_hash(&self) -> DbResult<Option<String>> {
        self.with_retry(|conn| {
            conn.query_row(
                "SELECT password_hash FROM admin_config WHERE id = 'singleton'",
                [],
                |row| row.get(0),
            )
            .optional()
        })
    }

    /// Create the singleton credential if it does not exist yet.
    /// Returns true when this call created it.
    pub fn ensure_admin(&self, password_hash: &str) -> DbResult<bool> {
        self.with_retry(|conn| {
            let affected = conn.execute(
                "INSERT OR IGNORE INTO admin_config (id, password_hash, updated_at)
                 VALUES ('singleton', ?1, ?2)",
                params![password_hash, now_string()],
            )?;
            Ok(affected > 0)
        })
    }

    pub fn set_admin_hash(&self, password_hash: &str) -> DbResult<()> {
        self.with_retry(|conn| {
            let affected = conn.execute(
                "UPDATE admin_config SET password_hash = ?1, updated_at = ?2
                 WHERE id = 'singleton'",
                params![password_hash, now_string()],
            )?;
            if affected == 0 {
                return Err(DbError::NotFound);
            }
            Ok(())
        })
    }

    // -- Sessions --

    pub fn create_session(&self, token: &str, expires_at: &str) -> DbResult<()> {
        self.with_retry(|conn| {
            conn.execute(
                "INSERT INTO sessions (token, created_at, expires_at) VALUES (?1, ?2, ?3)",
                params![token, now_string(), expires_at],
            )?;
            Ok(())
        })
    }

    /// Look up an unexpired session. Expired rows for this token are removed
    /// on the way, so stale sessions never validate twice.
    pub fn get_live_session(&self, token: &str) -> DbResult<Option<SessionRow>> {
        self.with_retry(|conn| {
            conn.execute(
                "DELETE FROM sessions WHERE expires_at <= ?1",
                [now_string()],
            )?;
            let mut stmt = conn.prepare(
                "SELECT token, created_at, expires_at FROM sessions WHERE token = ?1",
            )?;
            stmt.query_row([token], |row| {
                Ok(SessionRow {
                    token: row.get(0)?,
                    created_at: row.get(1)?,
                    expires_at: row.get(2)?,
                })
            })
            .optional()
        })
    }

    pub fn delete_session(&self, token: &str) -> DbResult<()> {
        self.with_retry(|conn| {
            conn.execute("DELETE FROM sessions WHERE token = ?1", [token])?;
            Ok(())
        })
    }

    /// Revoke everything. Runs on password change.
    pub fn delete_all_sessions(&self) -> DbResult<()> {
        self.with_retry(|conn| {
            conn.execute("DELETE FROM sessions", [])?;
            Ok(())
        })
    }
}

fn query_voices(
    conn: &Connection,
    filter: &VoiceFilter,
    sort: Sort,
    limit: u32,
    offset: u64,
) -> DbResult<Vec<VoiceRow>> {
    let (where_sql, binds) = where_clause(filter);
    let order = match sort {
        Sort::Newest => "DESC",
        Sort::Oldest => "ASC",
    };
    // rowid breaks ties between rows created in the same millisecond.
    // limit/offset are already-clamped integers, safe to inline.
    let sql = format!(
        "SELECT id, message, topic_tags, status, created_at FROM voices{where_sql}
         ORDER BY created_at {order}, rowid {order} LIMIT {limit} OFFSET {offset}"
    );

    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params_from_iter(binds.iter()), voice_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Shared WHERE builder for the listing and count queries, so both always
/// see the same subset. SQLite LIKE is ASCII-case-insensitive, which is the
/// documented behavior for admin search.
fn where_clause(filter: &VoiceFilter) -> (String, Vec<String>) {
    let mut clauses: Vec<&str> = Vec::new();
    let mut binds: Vec<String> = Vec::new();

    if let Some(status) = filter.status {
        clauses.push("status = ?");
        binds.push(status.as_str().to_string());
    }
    if let Some(search) = filter.search.as_deref()
        && !search.is_empty()
    {
        clauses.push("message LIKE '%' || ? || '%'");
        binds.push(search.to_string());
    }

    if clauses.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", clauses.join(" AND ")), binds)
    }
}

fn voice_from_row(row: &rusqlite::Row<'_>) -> std::result::Result<VoiceRow, rusqlite::Error> {
    Ok(VoiceRow {
        id: row.get(0)?,
        message: row.get(1)?,
        topic_tags: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
    })
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> DbResult<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> DbResult<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
