use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod items;
mod session;
mod types;

pub use session::DbSession;
pub use types::*;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(items::root))
        .route("/items/{item_id}", get(items::read_item))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
