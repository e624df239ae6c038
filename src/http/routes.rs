use axum::{routing::delete, routing::get, routing::post, Router};

use crate::http::handlers;
use crate::AppState;

pub fn health() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health))
}

pub fn users() -> Router<AppState> {
    Router::new()
        .route("/api/users/me", get(handlers::get_me))
        .route("/api/users/:id", get(handlers::get_user))
        .route("/api/users/:id/follow", post(handlers::follow_user))
        .route("/api/users/:id/follow", delete(handlers::unfollow_user))
}

pub fn tweets() -> Router<AppState> {
    Router::new()
        .route("/api/tweets", get(handlers::get_feed))
        .route("/api/tweets", post(handlers::create_tweet))
        .route("/api/tweets/:id", delete(handlers::delete_tweet))
        .route("/api/tweets/:id/likes", post(handlers::like_tweet))
        .route("/api/tweets/:id/likes", delete(handlers::unlike_tweet))
}

pub fn medias() -> Router<AppState> {
    Router::new().route("/api/medias", post(handlers::upload_media))
}
