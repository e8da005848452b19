use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::token;
use crate::errors::AppError;
use crate::state::AppState;

/// Authenticated caller, resolved from the `Authorization: Bearer` header.
///
/// Every owner-scoped store operation takes this identity as an explicit
/// argument; "resource not owned by this identity" is indistinguishable
/// from "resource does not exist" at the API boundary.
#[derive(Debug, Clone, Copy)]
pub struct AuthAccount(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthAccount {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthenticated)?;
        let raw = bearer_token(header).ok_or(AppError::Unauthenticated)?;
        let account_id = token::verify(&state.config.jwt_secret, raw)?;
        Ok(AuthAccount(account_id))
    }
}

fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
