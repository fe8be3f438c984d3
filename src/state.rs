use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::Settings;
use crate::db::Database;

/// Resources shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,

    pub db: Database,
}

impl AppState {
    #[must_use]
    pub fn new(settings: Settings, db: Database) -> Self {
        Self {
            settings: Arc::new(settings),
            db,
        }
    }
}

impl FromRef<Arc<AppState>> for Database {
    fn from_ref(state: &Arc<AppState>) -> Self {
        state.db.clone()
    }
}
