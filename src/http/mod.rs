use axum::extract::DefaultBodyLimit;
use axum::Router;

use crate::AppState;

mod auth;
mod error;
mod handlers;
mod routes;

pub use auth::ApiKey;
pub use error::ApiError;

pub fn router(state: AppState) -> Router {
    // Leave headroom over the configured file limit so oversized uploads get
    // the handler's error payload instead of a bare 413.
    let body_limit = DefaultBodyLimit::max(state.upload_max_bytes * 2);

    Router::new()
        .merge(routes::health())
        .merge(routes::users())
        .merge(routes::tweets())
        .merge(routes::medias().layer(body_limit))
        .with_state(state)
}
