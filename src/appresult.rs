use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::res;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error(transparent)]
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(what) => {
                tracing::debug!("{what} not found");
                (StatusCode::NOT_FOUND, res::sorry(what)).into_response()
            }
            AppError::Internal(err) => {
                tracing::error!("{err:#}\n{}", err.backtrace());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "something went wrong on our side",
                )
                    .into_response()
            }
        }
    }
}

impl From<String> for AppError {
    fn from(err: String) -> Self {
        Self::Internal(anyhow::Error::msg(err))
    }
}

impl From<&str> for AppError {
    fn from(err: &str) -> Self {
        Self::Internal(anyhow::Error::msg(err.to_owned()))
    }
}

macro_rules! apperr_impl {
    ($E:ty) => {
        impl From<$E> for AppError {
            fn from(err: $E) -> Self {
                Self::Internal(anyhow::Error::from(err))
            }
        }
    };
}

apperr_impl!(anyhow::Error);
apperr_impl!(sqlx::Error);
apperr_impl!(tower_sessions::session::Error);

/// Turns a missing row into a 404 for `what`.
pub trait OrNotFound<T> {
    fn or_not_found(self, what: &'static str) -> AppResult<T>;
}

impl<T> OrNotFound<T> for Option<T> {
    fn or_not_found(self, what: &'static str) -> AppResult<T> {
        self.ok_or(AppError::NotFound(what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_rows_become_not_found() {
        let err = None::<u8>.or_not_found("profile").unwrap_err();
        assert!(matches!(err, AppError::NotFound("profile")));
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn string_errors_are_internal() {
        let err: AppError = "pool closed".into();
        assert_eq!(err.to_string(), "pool closed");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
