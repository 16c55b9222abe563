pub mod error;
pub mod migrations;
pub mod models;
pub mod queries;

use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::Connection;
use tracing::{info, warn};

pub use error::{DbError, DbResult};

/// Retries after a SQLITE_BUSY/LOCKED failure: 50ms, then 100ms.
const BUSY_RETRIES: u32 = 2;
const BUSY_BASE_DELAY_MS: u64 = 50;

pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    pub fn open(path: &Path) -> DbResult<Self> {
        let conn = Connection::open(path).map_err(DbError::from)?;
        Self::init(conn, &path.display().to_string())
    }

    /// In-memory database for tests.
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(DbError::from)?;
        Self::init(conn, ":memory:")
    }

    fn init(conn: Connection, label: &str) -> DbResult<Self> {
        // WAL mode for concurrent reads
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        migrations::run(&conn)?;

        info!("Database opened at {}", label);
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn with_conn<F, T>(&self, f: F) -> DbResult<T>
    where
        F: FnOnce(&Connection) -> DbResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| DbError::Other(anyhow::anyhow!("DB lock poisoned: {}", e)))?;
        f(&conn)
    }

    /// Like `with_conn`, but retries the closure on a locked database with
    /// a short exponential backoff. Every other failure class fails fast;
    /// callers map it into a degraded response instead of a 5xx.
    pub fn with_retry<F, T>(&self, f: F) -> DbResult<T>
    where
        F: Fn(&Connection) -> DbResult<T>,
    {
        let mut attempt = 0;
        loop {
            match self.with_conn(&f) {
                Err(DbError::Locked) if attempt < BUSY_RETRIES => {
                    let delay = BUSY_BASE_DELAY_MS << attempt;
                    warn!(attempt = attempt + 1, delay_ms = delay, "database locked, retrying");
                    std::thread::sleep(Duration::from_millis(delay));
                    attempt += 1;
                }
                other => return other,
            }
        }
    }
}

/// Consistent timestamp format for every stored row. Millisecond precision
/// keeps the strings lexicographically comparable in SQL.
pub(crate) fn now_string() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
