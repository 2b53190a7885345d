//! Profile and status message persistence.

use sqlx::SqlitePool;
use uuid::Uuid;

use super::models::{NewProfile, Profile, ProfileUpdate, StatusMessage, now_millis};

pub(crate) const PROFILE_COLUMNS: &str = "id,user_id,first_name,last_name,city,email,profile_image_url";

pub async fn list_profiles(db_pool: &SqlitePool) -> sqlx::Result<Vec<Profile>> {
    sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY last_name,first_name"))
        .fetch_all(db_pool)
        .await
}

pub async fn get_profile(db_pool: &SqlitePool, id: Uuid) -> sqlx::Result<Option<Profile>> {
    sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id=?"))
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn profile_for_user(db_pool: &SqlitePool, user_id: &str) -> sqlx::Result<Option<Profile>> {
    sqlx::query_as(&format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE user_id=?"))
        .bind(user_id)
        .fetch_optional(db_pool)
        .await
}

pub async fn email_taken(db_pool: &SqlitePool, email: &str, except: Option<Uuid>) -> sqlx::Result<bool> {
    let owner: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM profiles WHERE email=?")
        .bind(email)
        .fetch_optional(db_pool)
        .await?;
    Ok(owner.is_some_and(|(id,)| Some(id) != except))
}

pub async fn create_profile(db_pool: &SqlitePool, new: NewProfile) -> sqlx::Result<Profile> {
    let id = Uuid::now_v7();
    tracing::info!("adding profile {id} for {} {} <{}>", new.first_name, new.last_name, new.email);

    sqlx::query_as(&format!(
        "INSERT INTO profiles ({PROFILE_COLUMNS}) VALUES (?,?,?,?,?,?,?) RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(id)
    .bind(new.user_id)
    .bind(new.first_name)
    .bind(new.last_name)
    .bind(new.city)
    .bind(new.email)
    .bind(new.profile_image_url)
    .fetch_one(db_pool)
    .await
}

pub async fn update_profile(db_pool: &SqlitePool, id: Uuid, update: ProfileUpdate) -> sqlx::Result<Option<Profile>> {
    sqlx::query_as(&format!(
        "UPDATE profiles SET city=?,email=?,profile_image_url=? WHERE id=? RETURNING {PROFILE_COLUMNS}"
    ))
    .bind(update.city)
    .bind(update.email)
    .bind(update.profile_image_url)
    .bind(id)
    .fetch_optional(db_pool)
    .await
}

/// Statuses and friend edges go with it.
pub async fn delete_profile(db_pool: &SqlitePool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM profiles WHERE id=?")
        .bind(id)
        .execute(db_pool)
        .await?;
    if result.rows_affected() > 0 {
        tracing::info!("deleted profile {id}");
    }
    Ok(result.rows_affected() > 0)
}

/// Newest first.
pub async fn statuses_for(db_pool: &SqlitePool, profile_id: Uuid) -> sqlx::Result<Vec<StatusMessage>> {
    sqlx::query_as(
        "SELECT id,profile_id,message,timestamp FROM status_messages
        WHERE profile_id=? ORDER BY timestamp DESC, id DESC",
    )
    .bind(profile_id)
    .fetch_all(db_pool)
    .await
}

pub async fn create_status(db_pool: &SqlitePool, profile_id: Uuid, message: &str) -> sqlx::Result<StatusMessage> {
    create_status_at(db_pool, profile_id, message, now_millis()).await
}

pub(crate) async fn create_status_at(
    db_pool: &SqlitePool,
    profile_id: Uuid,
    message: &str,
    timestamp: i64,
) -> sqlx::Result<StatusMessage> {
    sqlx::query_as(
        "INSERT INTO status_messages (id,profile_id,message,timestamp) VALUES (?,?,?,?)
        RETURNING id,profile_id,message,timestamp",
    )
    .bind(Uuid::now_v7())
    .bind(profile_id)
    .bind(message)
    .bind(timestamp)
    .fetch_one(db_pool)
    .await
}

pub async fn get_status(db_pool: &SqlitePool, id: Uuid) -> sqlx::Result<Option<StatusMessage>> {
    sqlx::query_as("SELECT id,profile_id,message,timestamp FROM status_messages WHERE id=?")
        .bind(id)
        .fetch_optional(db_pool)
        .await
}

pub async fn update_status(db_pool: &SqlitePool, id: Uuid, message: &str) -> sqlx::Result<Option<StatusMessage>> {
    sqlx::query_as(
        "UPDATE status_messages SET message=? WHERE id=? RETURNING id,profile_id,message,timestamp",
    )
    .bind(message)
    .bind(id)
    .fetch_optional(db_pool)
    .await
}

pub async fn delete_status(db_pool: &SqlitePool, id: Uuid) -> sqlx::Result<bool> {
    let result = sqlx::query("DELETE FROM status_messages WHERE id=?")
        .bind(id)
        .execute(db_pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
