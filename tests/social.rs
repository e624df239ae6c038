//! Follow and Like Tests
//!
//! Covers the follow graph and like contracts, including the self-follow
//! and self-like refusals.

mod common;

use axum::http::StatusCode;
use common::try_app;
use serde_json::json;

// ===========================================================================
// Follows
// ===========================================================================

#[tokio::test]
async fn follow_user() {
    let Some(app) = try_app().await else { return };
    app.create_user("Soc A", "soc_follow_a").await;
    let user_b = app.create_user("Soc B", "soc_follow_b").await;

    let resp = app
        .post_json(
            &format!("/api/users/{}/follow", user_b),
            json!({}),
            Some("soc_follow_a"),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["result"], true);
}

#[tokio::test]
async fn duplicate_follow_returns_false() {
    let Some(app) = try_app().await else { return };
    app.create_user("Soc Dup A", "soc_dup_a").await;
    let user_b = app.create_user("Soc Dup B", "soc_dup_b").await;

    let first = app
        .post_json(
            &format!("/api/users/{}/follow", user_b),
            json!({}),
            Some("soc_dup_a"),
        )
        .await;
    assert_eq!(first.json()["result"], true);

    let second = app
        .post_json(
            &format!("/api/users/{}/follow", user_b),
            json!({}),
            Some("soc_dup_a"),
        )
        .await;
    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.json()["result"], false);
}

#[tokio::test]
async fn self_follow_returns_false() {
    let Some(app) = try_app().await else { return };
    let me = app.create_user("Soc Self", "soc_self").await;

    let resp = app
        .post_json(
            &format!("/api/users/{}/follow", me),
            json!({}),
            Some("soc_self"),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["result"], false);

    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM follow_relations WHERE follower_id = $1 AND following_id = $1",
    )
    .bind(me)
    .fetch_one(app.pool())
    .await
    .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn follow_unknown_user_is_not_found() {
    let Some(app) = try_app().await else { return };
    app.create_user("Soc Ghost Hunter", "soc_ghost_hunter").await;

    let resp = app
        .post_json(
            "/api/users/999999999/follow",
            json!({}),
            Some("soc_ghost_hunter"),
        )
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.error_type(), "NotFound");
}

#[tokio::test]
async fn unfollow_removes_the_relation() {
    let Some(app) = try_app().await else { return };
    let user_a = app.create_user("Soc Un A", "soc_un_a").await;
    let user_b = app.create_user("Soc Un B", "soc_un_b").await;
    app.follow(user_a, user_b).await;

    let resp = app
        .delete(&format!("/api/users/{}/follow", user_b), Some("soc_un_a"))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["result"], true);
}

#[tokio::test]
async fn unfollow_without_follow_is_not_found() {
    let Some(app) = try_app().await else { return };
    app.create_user("Soc NoRel A", "soc_norel_a").await;
    let user_b = app.create_user("Soc NoRel B", "soc_norel_b").await;

    let resp = app
        .delete(&format!("/api/users/{}/follow", user_b), Some("soc_norel_a"))
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

// ===========================================================================
// Likes
// ===========================================================================

#[tokio::test]
async fn like_tweet() {
    let Some(app) = try_app().await else { return };
    let author = app.create_user("Like Author", "lik_author").await;
    app.create_user("Like Fan", "lik_fan").await;
    let tweet = app.create_tweet(author, "like me", &[]).await;

    let resp = app
        .post_json(
            &format!("/api/tweets/{}/likes", tweet),
            json!({}),
            Some("lik_fan"),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["result"], true);
}

#[tokio::test]
async fn like_own_tweet_returns_false() {
    let Some(app) = try_app().await else { return };
    let author = app.create_user("Like Self", "lik_self").await;
    let tweet = app.create_tweet(author, "my own", &[]).await;

    let resp = app
        .post_json(
            &format!("/api/tweets/{}/likes", tweet),
            json!({}),
            Some("lik_self"),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["result"], false);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM likes WHERE tweet_id = $1")
        .bind(tweet)
        .fetch_one(app.pool())
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn duplicate_like_returns_false() {
    let Some(app) = try_app().await else { return };
    let author = app.create_user("Like Dup Author", "lik_dup_author").await;
    let fan = app.create_user("Like Dup Fan", "lik_dup_fan").await;
    let tweet = app.create_tweet(author, "only once", &[]).await;
    app.like(fan, tweet).await;

    let resp = app
        .post_json(
            &format!("/api/tweets/{}/likes", tweet),
            json!({}),
            Some("lik_dup_fan"),
        )
        .await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.json()["result"], false);
}

#[tokio::test]
async fn like_missing_tweet_is_not_found() {
    let Some(app) = try_app().await else { return };
    app.create_user("Like Ghost", "lik_ghost").await;

    let resp = app
        .post_json("/api/tweets/999999999/likes", json!({}), Some("lik_ghost"))
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unlike_removes_the_like() {
    let Some(app) = try_app().await else { return };
    let author = app.create_user("Unlike Author", "unl_author").await;
    let fan = app.create_user("Unlike Fan", "unl_fan").await;
    let tweet = app.create_tweet(author, "fickle hearts", &[]).await;
    app.like(fan, tweet).await;

    let resp = app
        .delete(&format!("/api/tweets/{}/likes", tweet), Some("unl_fan"))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["result"], true);
}

#[tokio::test]
async fn unlike_without_like_is_not_found() {
    let Some(app) = try_app().await else { return };
    let author = app.create_user("Unlike Miss Author", "unl_miss_author").await;
    app.create_user("Unlike Miss Fan", "unl_miss_fan").await;
    let tweet = app.create_tweet(author, "never liked", &[]).await;

    let resp = app
        .delete(&format!("/api/tweets/{}/likes", tweet), Some("unl_miss_fan"))
        .await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
