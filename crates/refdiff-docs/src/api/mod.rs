mod docs;
mod health;

use axum::Router;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/swagger", docs::router())
        .nest("/health", health::router())
}
