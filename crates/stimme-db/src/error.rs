use rusqlite::ErrorCode;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Storage failure classes. `Locked` is the only retryable one; `NotFound`
/// is the only one a handler surfaces as a 404 — the rest become degraded
/// responses.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database is locked")]
    Locked,
    #[error("database connection failed")]
    Connection,
    #[error("row not found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DbError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound)
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::QueryReturnedNoRows => DbError::NotFound,
            rusqlite::Error::SqliteFailure(e, _) => match e.code {
                ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked => DbError::Locked,
                ErrorCode::CannotOpen | ErrorCode::NotADatabase => DbError::Connection,
                _ => DbError::Other(err.into()),
            },
            _ => DbError::Other(err.into()),
        }
    }
}
