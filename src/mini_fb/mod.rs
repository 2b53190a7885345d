//! Mini Facebook: profiles, status messages and the friend graph.

pub mod forms;
pub mod graph;
pub mod models;
pub mod store;

mod friends;
mod profiles;
mod render;
mod status;

use axum::{Router, routing::{get, post}};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{AppError, AppResult, AppState, OrNotFound};

use models::{Profile, StatusMessage};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(profiles::list_profiles))
        .route("/me", get(profiles::me))
        .route("/create_profile", get(profiles::create_profile_page).post(profiles::create_profile))
        .route("/profile/{id}", get(profiles::profile))
        .route("/profile/{id}/update", get(profiles::update_profile_page).post(profiles::update_profile))
        .route("/profile/{id}/delete", post(profiles::delete_profile))
        .route("/profile/{id}/create_status", get(status::create_status_page).post(status::create_status))
        .route("/profile/{id}/add_friend/{other_id}", post(friends::add_friend))
        .route("/profile/{id}/friend_suggestions", get(friends::friend_suggestions))
        .route("/profile/{id}/news_feed", get(friends::news_feed))
        .route("/status/{id}/update", get(status::update_status_page).post(status::update_status))
        .route("/status/{id}/delete", get(status::delete_status_page).post(status::delete_status))
}

/// A malformed id can't name anything, so it is a 404 like any other miss.
fn parse_id(raw: &str, what: &'static str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFound(what))
}

async fn load_profile(db_pool: &SqlitePool, raw_id: &str) -> AppResult<Profile> {
    let id = parse_id(raw_id, "profile")?;
    store::get_profile(db_pool, id).await?.or_not_found("profile")
}

async fn load_status(db_pool: &SqlitePool, raw_id: &str) -> AppResult<(StatusMessage, Profile)> {
    let id = parse_id(raw_id, "status message")?;
    let status = store::get_status(db_pool, id).await?.or_not_found("status message")?;
    let author = store::get_profile(db_pool, status.profile_id).await?.or_not_found("profile")?;
    Ok((status, author))
}

fn profile_url(id: Uuid) -> String {
    format!("/mini_fb/profile/{id}")
}
