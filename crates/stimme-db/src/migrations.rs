use rusqlite::Connection;
use tracing::info;

use crate::DbResult;

pub fn run(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS voices (
            id          TEXT PRIMARY KEY,
            message     TEXT NOT NULL,
            topic_tags  TEXT,
            status      TEXT NOT NULL DEFAULT 'PENDING'
                        CHECK (status IN ('PENDING', 'APPROVED', 'REJECTED')),
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_voices_status_created
            ON voices(status, created_at);

        -- Single admin credential; the fixed id keeps it that way.
        CREATE TABLE IF NOT EXISTS admin_config (
            id             TEXT PRIMARY KEY CHECK (id = 'singleton'),
            password_hash  TEXT NOT NULL,
            updated_at     TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS sessions (
            token       TEXT PRIMARY KEY,
            created_at  TEXT NOT NULL,
            expires_at  TEXT NOT NULL
        );
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
