pub mod appresult;
pub mod circuits;
pub mod config;
pub mod db;
pub mod forms;
pub mod mini_fb;
pub mod quotes;
pub mod res;
pub mod restaurant;
pub mod session;
pub mod voter_analytics;

use axum::{Router, debug_handler, extract::FromRef, response::{Html, IntoResponse}, routing::get};
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer, cookie::SameSite};

pub use appresult::{AppError, AppResult, OrNotFound};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
}

/// The whole site: every app nested under its prefix.
pub fn app(app_state: AppState, session_idle_minutes: i64) -> Router {
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(session_idle_minutes)));

    Router::new()
        .route("/", get(index))
        .nest("/mini_fb", mini_fb::router())
        .nest("/restaurant", restaurant::router())
        .nest("/quotes", quotes::router())
        .nest("/voter_analytics", voter_analytics::router())
        .nest("/circuits", circuits::router())
        .fallback(not_found)
        .with_state(app_state)
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
}

#[debug_handler]
async fn index() -> Html<String> {
    res::page("cs412", include_res!(str, "/pages/index.html"))
}

async fn not_found() -> impl IntoResponse {
    AppError::NotFound("page")
}
