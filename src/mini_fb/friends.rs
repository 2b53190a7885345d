use axum::{debug_handler, extract::{Path, State}, response::{Html, Redirect}};
use sqlx::SqlitePool;

use crate::{AppResult, res};

use super::{graph, load_profile, profile_url, render};

#[debug_handler]
pub(crate) async fn add_friend(
    Path((profile_id, other_id)): Path<(String, String)>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Redirect> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    let other = load_profile(&db_pool, &other_id).await?;

    graph::add_friend(&db_pool, profile.id, other.id).await?;

    Ok(Redirect::to(&profile_url(profile.id)))
}

#[debug_handler]
pub(crate) async fn friend_suggestions(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    let suggestions = graph::get_friend_suggestions(&db_pool, profile.id).await?;

    Ok(res::page(
        "Friend suggestions",
        &render::friend_suggestions(&profile, &suggestions),
    ))
}

#[debug_handler]
pub(crate) async fn news_feed(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    let feed = graph::get_news_feed(&db_pool, profile.id).await?;

    Ok(res::page(
        &format!("News feed for {}", profile.full_name()),
        &render::news_feed(&profile, &feed),
    ))
}
