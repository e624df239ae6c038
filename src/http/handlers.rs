use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::feed::FeedService;
use crate::app::likes::LikeService;
use crate::app::media::MediaService;
use crate::app::social::SocialService;
use crate::app::tweets::TweetService;
use crate::app::users::UserService;
use crate::domain::tweet::EnrichedTweet;
use crate::domain::user::UserProfile;
use crate::http::{ApiError, ApiKey};
use crate::AppState;

const ALLOWED_MEDIA_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Serialize)]
pub struct ResultResponse {
    pub result: bool,
}

#[derive(Serialize)]
pub struct UserResponse {
    pub result: bool,
    pub user: UserProfile,
}

#[derive(Serialize)]
pub struct FeedResponse {
    pub result: bool,
    pub tweets: Vec<EnrichedTweet>,
}

#[derive(Serialize)]
pub struct TweetCreatedResponse {
    pub result: bool,
    pub tweet_id: i64,
}

#[derive(Serialize)]
pub struct MediaCreatedResponse {
    pub result: bool,
    pub media_id: i64,
}

pub(crate) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let status = if state.db.ping().await.is_ok() {
        "ok"
    } else {
        "degraded"
    };
    Json(HealthResponse { status })
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub async fn get_me(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
) -> Result<Json<UserResponse>, ApiError> {
    let service = UserService::new(state.db.clone());
    let user = service.profile_by_api_key(&api_key).await?;

    Ok(Json(UserResponse { result: true, user }))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<UserResponse>, ApiError> {
    let service = UserService::new(state.db.clone());
    let user = service.profile_by_id(user_id).await?;

    Ok(Json(UserResponse { result: true, user }))
}

// ---------------------------------------------------------------------------
// Tweets and the feed
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct CreateTweetRequest {
    pub tweet_data: String,
    #[serde(default)]
    pub tweet_media_ids: Option<Vec<i64>>,
}

pub async fn get_feed(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
) -> Result<Json<FeedResponse>, ApiError> {
    let service = FeedService::new(state.db.clone());
    let tweets = service.get_feed(&api_key).await?;

    Ok(Json(FeedResponse {
        result: true,
        tweets,
    }))
}

pub async fn create_tweet(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Json(payload): Json<CreateTweetRequest>,
) -> Result<(StatusCode, Json<TweetCreatedResponse>), ApiError> {
    if payload.tweet_data.trim().is_empty() {
        return Err(ApiError::bad_request("tweet_data is required"));
    }

    let media_ids = payload.tweet_media_ids.unwrap_or_default();
    let service = TweetService::new(state.db.clone());
    let tweet_id = service
        .create(&api_key, &payload.tweet_data, &media_ids)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(TweetCreatedResponse {
            result: true,
            tweet_id,
        }),
    ))
}

pub async fn delete_tweet(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Path(tweet_id): Path<i64>,
) -> Result<Json<ResultResponse>, ApiError> {
    let service = TweetService::new(state.db.clone());
    let orphaned_files = service.delete(&api_key, tweet_id).await?;

    // Rows are gone at this point; file removal is best-effort cleanup.
    for local_path in &orphaned_files {
        state.media.remove(local_path).await;
    }

    Ok(Json(ResultResponse { result: true }))
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

pub async fn upload_media(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<MediaCreatedResponse>), ApiError> {
    let field = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::bad_request("invalid multipart body"))?
        .ok_or_else(|| ApiError::bad_request("file field is required"))?;

    let content_type = field.content_type().unwrap_or_default().to_string();
    if !ALLOWED_MEDIA_TYPES.contains(&content_type.as_str()) {
        return Err(ApiError::bad_request("Invalid file type"));
    }

    let file_name = field.file_name().unwrap_or("upload.bin").to_string();
    let contents = field
        .bytes()
        .await
        .map_err(|_| ApiError::bad_request("File is too large (over 2Mb)"))?;
    if contents.len() > state.upload_max_bytes {
        return Err(ApiError::bad_request("File is too large (over 2Mb)"));
    }

    let service = MediaService::new(state.db.clone(), state.media.clone());
    let media = service.register(&api_key, &file_name).await?;

    state.media.save(&media.file_name, &contents).await.map_err(|err| {
        tracing::error!(error = %err, media_id = media.id, "failed to store media file");
        ApiError::internal("failed to store media file")
    })?;

    Ok((
        StatusCode::CREATED,
        Json(MediaCreatedResponse {
            result: true,
            media_id: media.id,
        }),
    ))
}

// ---------------------------------------------------------------------------
// Likes and follows
// ---------------------------------------------------------------------------

pub async fn like_tweet(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Path(tweet_id): Path<i64>,
) -> Result<(StatusCode, Json<ResultResponse>), ApiError> {
    let service = LikeService::new(state.db.clone());
    let result = service.like(&api_key, tweet_id).await?;

    Ok((StatusCode::CREATED, Json(ResultResponse { result })))
}

pub async fn unlike_tweet(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Path(tweet_id): Path<i64>,
) -> Result<Json<ResultResponse>, ApiError> {
    let service = LikeService::new(state.db.clone());
    let result = service.unlike(&api_key, tweet_id).await?;

    Ok(Json(ResultResponse { result }))
}

pub async fn follow_user(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Path(user_id): Path<i64>,
) -> Result<(StatusCode, Json<ResultResponse>), ApiError> {
    let service = SocialService::new(state.db.clone());
    let result = service.follow(&api_key, user_id).await?;

    Ok((StatusCode::CREATED, Json(ResultResponse { result })))
}

pub async fn unfollow_user(
    State(state): State<AppState>,
    ApiKey(api_key): ApiKey,
    Path(user_id): Path<i64>,
) -> Result<Json<ResultResponse>, ApiError> {
    let service = SocialService::new(state.db.clone());
    let result = service.unfollow(&api_key, user_id).await?;

    Ok(Json(ResultResponse { result }))
}
