use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{html, Markup};

use crate::views;

#[derive(Debug)]
pub enum AppError {
    Internal(&'static str),
    NotFound,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
            AppError::NotFound => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        };

        (code, error_page(message)).into_response()
    }
}

/// Log the underlying error and turn it into an [`AppError::Internal`].
pub trait ResultExt<T> {
    fn reject(self, message: &'static str) -> Result<T, AppError>;
}

impl<T, E: std::fmt::Display> ResultExt<T> for Result<T, E> {
    fn reject(self, message: &'static str) -> Result<T, AppError> {
        self.map_err(|e| {
            tracing::error!("{message}: {e}");
            AppError::Internal(message)
        })
    }
}

pub async fn not_found() -> AppError {
    AppError::NotFound
}

fn error_page(message: &str) -> Markup {
    views::page(
        "Error",
        html! {
            h1 { (message) }
        },
        crate::names::DEFAULT_LOCALE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_maps_errors_to_internal() {
        let result: Result<(), &str> = Err("boom");
        let err = result.reject("could not do the thing").unwrap_err();
        assert!(matches!(err, AppError::Internal("could not do the thing")));
    }

    #[test]
    fn app_errors_map_to_status_codes() {
        assert_eq!(
            AppError::Internal("x").into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
