/// Database row types — these map directly to SQLite rows.
/// Distinct from the stimme-types API models to keep the DB layer independent.

#[derive(Debug)]
pub struct VoiceRow {
    pub id: String,
    pub message: String,
    pub topic_tags: Option<String>,
    pub status: String,
    pub created_at: String,
}

pub struct SessionRow {
    pub token: String,
    pub created_at: String,
    pub expires_at: String,
}
