use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{password, token};
use crate::company::store;
use crate::errors::{on_unique_violation, AppError};
use crate::identity::registry;
use crate::models::account::{AccountPublic, AccountRow};
use crate::slug;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub company_name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub account: AccountPublic,
}

/// POST /api/v1/auth/register
///
/// Creates the account and its company profile in one transaction, so a
/// losing slug claim leaves nothing behind.
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    validate_registration(&req)?;
    let company_slug = slug::normalize(&req.slug)?;
    let email = req.email.trim().to_lowercase();
    let password_hash = password::hash(&req.password)?;

    let mut tx = state.db.begin().await?;

    let account_id = Uuid::new_v4();
    sqlx::query("INSERT INTO accounts (id, email, password_hash) VALUES ($1, $2, $3)")
        .bind(account_id)
        .bind(&email)
        .bind(&password_hash)
        .execute(&mut *tx)
        .await
        .map_err(|e| on_unique_violation(e, "accounts_email_key", AppError::DuplicateAccount))?;

    let company = registry::claim(&mut tx, &company_slug, account_id, &req.company_name).await?;

    tx.commit().await?;

    tracing::info!("Registered account {account_id} with company slug '{}'", company.slug);

    let token = token::issue(&state.config.jwt_secret, account_id)?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            account: AccountPublic {
                id: account_id,
                email,
                company_slug: company.slug,
            },
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Unknown email and wrong password are indistinguishable to the caller.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = req.email.trim().to_lowercase();
    let account: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE email = $1")
        .bind(&email)
        .fetch_optional(&state.db)
        .await?;
    let account = account.ok_or(AppError::InvalidCredentials)?;

    if !password::verify(&req.password, &account.password_hash) {
        return Err(AppError::InvalidCredentials);
    }

    let company = store::find_by_owner(&state.db, account.id).await?;

    let token = token::issue(&state.config.jwt_secret, account.id)?;
    Ok(Json(AuthResponse {
        token,
        account: AccountPublic {
            id: account.id,
            email: account.email,
            company_slug: company.slug,
        },
    }))
}

fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    let mut missing = Vec::new();
    if req.email.trim().is_empty() || !req.email.contains('@') {
        missing.push("email");
    }
    if req.password.is_empty() {
        missing.push("password");
    }
    if req.company_name.trim().is_empty() {
        missing.push("company_name");
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "missing or invalid fields: {}",
            missing.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> RegisterRequest {
        RegisterRequest {
            email: "owner@acme.test".to_string(),
            password: "pw".to_string(),
            company_name: "Acme".to_string(),
            slug: "acme".to_string(),
        }
    }

    #[test]
    fn test_valid_registration_passes() {
        assert!(validate_registration(&valid_request()).is_ok());
    }

    #[test]
    fn test_registration_collects_all_field_errors() {
        let req = RegisterRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
            company_name: "  ".to_string(),
            slug: "acme".to_string(),
        };
        match validate_registration(&req) {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("email"));
                assert!(msg.contains("password"));
                assert!(msg.contains("company_name"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
