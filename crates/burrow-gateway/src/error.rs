use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use burrow_core::{CaptchaError, ShortenerError};
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

const INTERNAL_ERROR: &str = "internal server error";

/// Errors returned by handlers.
///
/// Backend detail is logged where it happens; the response body only ever
/// carries a fixed message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error(transparent)]
    JsonBody(#[from] JsonRejection),
    #[error("captcha verification failed")]
    CaptchaRejected,
    #[error(transparent)]
    Captcha(#[from] CaptchaError),
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
    #[error("stored target cannot be used as a redirect location")]
    InvalidRedirect,
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::Shortener(ShortenerError::InvalidInput(message)) => {
                (StatusCode::BAD_REQUEST, message.clone())
            }
            AppError::Shortener(ShortenerError::NotFound) => {
                (StatusCode::NOT_FOUND, "link not found".to_string())
            }
            AppError::Shortener(ShortenerError::StoreUnavailable(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            AppError::JsonBody(rejection) => (rejection.status(), rejection.body_text()),
            AppError::CaptchaRejected => {
                (StatusCode::FORBIDDEN, "captcha verification failed".to_string())
            }
            AppError::Captcha(err) => {
                error!(error = %err, "captcha verification unavailable");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            AppError::Render(err) => {
                error!(error = %err, "failed to render template");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
            AppError::InvalidRedirect => {
                error!("stored target is not a valid Location header");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_message();
        (status, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_detail_is_not_exposed() {
        let err = AppError::from(ShortenerError::StoreUnavailable(
            "password authentication failed for user \"burrow\"".to_string(),
        ));

        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_ERROR);
    }

    #[test]
    fn not_found_maps_to_404() {
        let (status, _) = AppError::from(ShortenerError::NotFound).status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_maps_to_400() {
        let err = AppError::from(ShortenerError::InvalidInput("URL cannot be empty".to_string()));

        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "URL cannot be empty");
    }

    #[test]
    fn captcha_backend_failure_is_opaque() {
        let err = AppError::from(CaptchaError::Unavailable("dns error".to_string()));

        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_ERROR);
    }
}
