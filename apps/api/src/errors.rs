use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid slug format")]
    InvalidSlugFormat,

    #[error("Slug already taken")]
    SlugTaken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("An account with this email already exists")]
    DuplicateAccount,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidSlugFormat => (
                StatusCode::BAD_REQUEST,
                "INVALID_SLUG_FORMAT",
                "Slugs may contain only lowercase letters, digits and hyphens".to_string(),
            ),
            AppError::SlugTaken => (
                StatusCode::CONFLICT,
                "SLUG_TAKEN",
                "Slug already taken".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHENTICATED",
                "Authentication required".to_string(),
            ),
            AppError::DuplicateAccount => (
                StatusCode::CONFLICT,
                "DUPLICATE_ACCOUNT",
                "An account with this email already exists".to_string(),
            ),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid credentials".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Translates a unique-index violation on `constraint` into the given
/// conflict error. The index is the final arbiter for slug/email uniqueness;
/// any advisory check preceding the write is fast-path only.
pub fn on_unique_violation(err: sqlx::Error, constraint: &str, conflict: AppError) -> AppError {
    match &err {
        sqlx::Error::Database(db)
            if db.code().as_deref() == Some("23505") && db.constraint() == Some(constraint) =>
        {
            conflict
        }
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_taken_maps_to_conflict() {
        let resp = AppError::SlugTaken.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_duplicate_account_maps_to_conflict() {
        let resp = AppError::DuplicateAccount.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_unauthenticated_and_bad_credentials_map_to_401() {
        assert_eq!(
            AppError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidCredentials.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_invalid_slug_and_validation_map_to_400() {
        assert_eq!(
            AppError::InvalidSlugFormat.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Validation("missing title".to_string())
                .into_response()
                .status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        let resp = AppError::NotFound("Company not found".to_string()).into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_error_renders_generic_message() {
        // Internal detail must never reach the caller.
        let resp = AppError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_non_unique_violation_passes_through() {
        let err = on_unique_violation(sqlx::Error::RowNotFound, "companies_slug_key", AppError::SlugTaken);
        assert!(matches!(err, AppError::Database(_)));
    }
}
