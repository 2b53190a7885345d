use axum::{Form, debug_handler, extract::{Path, State}, response::{Html, IntoResponse, Redirect, Response}};
use sqlx::SqlitePool;

use crate::{AppError, AppResult, res};

use super::{
    forms::{FieldErrors, StatusForm},
    load_profile, load_status, profile_url, render, store,
};

#[debug_handler]
pub(crate) async fn create_status_page(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    Ok(res::page(
        "Post a status",
        &render::create_status_form(&profile, "", &FieldErrors::default()),
    ))
}

#[debug_handler]
pub(crate) async fn create_status(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    Form(form): Form<StatusForm>,
) -> AppResult<Response> {
    let profile = load_profile(&db_pool, &profile_id).await?;

    let message = match form.to_message() {
        Ok(message) => message,
        Err(errors) => {
            return Ok(res::page(
                "Post a status",
                &render::create_status_form(&profile, &form.message, &errors),
            )
            .into_response());
        }
    };

    let status = store::create_status(&db_pool, profile.id, &message).await?;
    tracing::debug!("{} posted status {}", profile.id, status.id);

    Ok(Redirect::to(&profile_url(profile.id)).into_response())
}

#[debug_handler]
pub(crate) async fn update_status_page(
    Path(status_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let (status, author) = load_status(&db_pool, &status_id).await?;
    Ok(res::page(
        "Edit status",
        &render::update_status_form(&status, &author, &status.message, &FieldErrors::default()),
    ))
}

#[debug_handler]
pub(crate) async fn update_status(
    Path(status_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    Form(form): Form<StatusForm>,
) -> AppResult<Response> {
    let (status, author) = load_status(&db_pool, &status_id).await?;

    let message = match form.to_message() {
        Ok(message) => message,
        Err(errors) => {
            return Ok(res::page(
                "Edit status",
                &render::update_status_form(&status, &author, &form.message, &errors),
            )
            .into_response());
        }
    };

    let Some(status) = store::update_status(&db_pool, status.id, &message).await? else {
        return Err(AppError::NotFound("status message"));
    };

    Ok(Redirect::to(&profile_url(status.profile_id)).into_response())
}

#[debug_handler]
pub(crate) async fn delete_status_page(
    Path(status_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let (status, author) = load_status(&db_pool, &status_id).await?;
    Ok(res::page(
        "Delete status",
        &render::delete_status_confirm(&status, &author),
    ))
}

#[debug_handler]
pub(crate) async fn delete_status(
    Path(status_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Redirect> {
    let (status, _) = load_status(&db_pool, &status_id).await?;
    store::delete_status(&db_pool, status.id).await?;
    tracing::debug!("deleted status {}", status.id);
    Ok(Redirect::to(&profile_url(status.profile_id)))
}
