use std::sync::Arc;

use stimme_db::Database;

pub type AppState = Arc<AppStateInner>;

/// Application context, constructed once in `main` and injected into every
/// handler. Holds the database handle and the few config flags handlers
/// need; there is no module-level mutable state anywhere.
pub struct AppStateInner {
    pub db: Database,
    /// Set the `Secure` attribute on the session cookie (production).
    pub secure_cookies: bool,
}
