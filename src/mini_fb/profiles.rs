use axum::{Form, debug_handler, extract::{Path, State}, response::{Html, IntoResponse, Redirect, Response}};
use sqlx::SqlitePool;
use tower_sessions::Session;
use uuid::Uuid;

use crate::{AppError, AppResult, res, session::USER_ID};

use super::{
    forms::{CreateProfileForm, FieldErrors, UpdateProfileForm},
    graph, load_profile, profile_url, render, store,
};

fn email_in_use() -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.add("email", "A profile with this email already exists.");
    errors
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[debug_handler]
pub(crate) async fn list_profiles(State(db_pool): State<SqlitePool>) -> AppResult<Html<String>> {
    let profiles = store::list_profiles(&db_pool).await?;
    Ok(res::page("All profiles", &render::profile_list(&profiles)))
}

#[debug_handler]
pub(crate) async fn profile(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    let statuses = store::statuses_for(&db_pool, profile.id).await?;
    let friends = graph::get_friends(&db_pool, profile.id).await?;

    Ok(res::page(
        &profile.full_name(),
        &render::profile_page(&profile, &statuses, &friends),
    ))
}

/// The session's own profile, or signup if there is none.
#[debug_handler]
pub(crate) async fn me(
    State(db_pool): State<SqlitePool>,
    session: Session,
) -> AppResult<Redirect> {
    let Some(user_id) = session.get::<String>(USER_ID).await? else {
        return Ok(Redirect::to("/mini_fb/create_profile"));
    };

    Ok(match store::profile_for_user(&db_pool, &user_id).await? {
        Some(profile) => Redirect::to(&profile_url(profile.id)),
        None => Redirect::to("/mini_fb/create_profile"),
    })
}

#[debug_handler]
pub(crate) async fn create_profile_page() -> Html<String> {
    res::page(
        "Create a profile",
        &render::create_profile_form(&CreateProfileForm::default(), &FieldErrors::default()),
    )
}

#[debug_handler]
pub(crate) async fn create_profile(
    State(db_pool): State<SqlitePool>,
    session: Session,
    Form(form): Form<CreateProfileForm>,
) -> AppResult<Response> {
    let redisplay = |errors: FieldErrors| -> AppResult<Response> {
        Ok(res::page("Create a profile", &render::create_profile_form(&form, &errors)).into_response())
    };

    let mut new = match form.to_new_profile() {
        Ok(new) => new,
        Err(errors) => return redisplay(errors),
    };
    if store::email_taken(&db_pool, &new.email, None).await? {
        return redisplay(email_in_use());
    }

    let user_id = Uuid::now_v7().to_string();
    new.user_id = Some(user_id.clone());

    let profile = match store::create_profile(&db_pool, new).await {
        Ok(profile) => profile,
        Err(err) if is_unique_violation(&err) => {
            return redisplay(email_in_use());
        }
        Err(err) => return Err(err.into()),
    };

    session.insert(USER_ID, user_id).await?;

    Ok(Redirect::to(&profile_url(profile.id)).into_response())
}

#[debug_handler]
pub(crate) async fn update_profile_page(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Html<String>> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    let form = UpdateProfileForm {
        city: profile.city.clone(),
        email: profile.email.clone(),
        profile_image_url: profile.profile_image_url.clone(),
    };

    Ok(res::page(
        &format!("Update {}", profile.full_name()),
        &render::update_profile_form(&profile, &form, &FieldErrors::default()),
    ))
}

#[debug_handler]
pub(crate) async fn update_profile(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
    Form(form): Form<UpdateProfileForm>,
) -> AppResult<Response> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    let redisplay = |errors: FieldErrors| -> AppResult<Response> {
        Ok(res::page(
            &format!("Update {}", profile.full_name()),
            &render::update_profile_form(&profile, &form, &errors),
        )
        .into_response())
    };

    let update = match form.to_update() {
        Ok(update) => update,
        Err(errors) => return redisplay(errors),
    };
    if store::email_taken(&db_pool, &update.email, Some(profile.id)).await? {
        return redisplay(email_in_use());
    }

    match store::update_profile(&db_pool, profile.id, update).await {
        Ok(Some(updated)) => Ok(Redirect::to(&profile_url(updated.id)).into_response()),
        // deleted between the load and the update
        Ok(None) => Err(AppError::NotFound("profile")),
        Err(err) if is_unique_violation(&err) => {
            redisplay(email_in_use())
        }
        Err(err) => Err(err.into()),
    }
}

#[debug_handler]
pub(crate) async fn delete_profile(
    Path(profile_id): Path<String>,
    State(db_pool): State<SqlitePool>,
) -> AppResult<Redirect> {
    let profile = load_profile(&db_pool, &profile_id).await?;
    store::delete_profile(&db_pool, profile.id).await?;
    Ok(Redirect::to("/mini_fb"))
}
